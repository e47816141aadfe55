//! Drag state machine for the selection overlay.

use capture_gdi::Rect;

/// Selections narrower than this in either dimension cancel the session.
pub const MIN_SELECTION: u32 = 3;

/// Drag progress within one overlay session.
///
/// A terminal variant carries its outcome and nothing else, so the illegal
/// combinations of a `dragging`/`done`/`canceled` flag triple cannot occur.
/// Points are desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No button pressed yet.
    Idle,
    /// Button held; the selection spans `anchor` to `current`.
    Dragging {
        anchor: (i32, i32),
        current: (i32, i32),
    },
    /// Terminal: a selection was made.
    Finished(Rect),
    /// Terminal: canceled by the cancel key or a degenerate drag.
    Canceled,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DragState::Finished(_) | DragState::Canceled)
    }

    /// Pointer pressed at `pt`: anchor the drag.
    ///
    /// Returns true when the transition happened and a repaint is due.
    pub fn pointer_down(&mut self, pt: (i32, i32)) -> bool {
        match self {
            DragState::Idle => {
                *self = DragState::Dragging { anchor: pt, current: pt };
                true
            }
            _ => false,
        }
    }

    /// Pointer moved to `pt`.
    ///
    /// Returns true only when the position actually changed; redundant
    /// moves must not trigger repaints.
    pub fn pointer_moved(&mut self, pt: (i32, i32)) -> bool {
        match self {
            DragState::Dragging { current, .. } if *current != pt => {
                *current = pt;
                true
            }
            _ => false,
        }
    }

    /// Button released at `pt`: normalize the rectangle and finish, or
    /// cancel a sub-minimum drag.
    ///
    /// Returns true when a terminal state was reached.
    pub fn pointer_up(&mut self, pt: (i32, i32)) -> bool {
        if let DragState::Dragging { anchor, .. } = *self {
            let rect = Rect::from_points(anchor, pt);
            *self = if rect.width < MIN_SELECTION || rect.height < MIN_SELECTION {
                DragState::Canceled
            } else {
                DragState::Finished(rect)
            };
            true
        } else {
            false
        }
    }

    /// Cancel from any non-terminal state.
    ///
    /// Returns true when the state changed.
    pub fn cancel(&mut self) -> bool {
        if self.is_terminal() {
            false
        } else {
            *self = DragState::Canceled;
            true
        }
    }

    /// Current selection rectangle in desktop coordinates, if any.
    pub fn selection(&self) -> Option<Rect> {
        match *self {
            DragState::Dragging { anchor, current } => Some(Rect::from_points(anchor, current)),
            DragState::Finished(rect) => Some(rect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_drag_finishes_with_normalized_rect() {
        let mut drag = DragState::Idle;
        assert!(drag.pointer_down((400, 300)));
        assert!(drag.pointer_moved((100, 100)));
        assert!(drag.pointer_up((100, 100)));
        assert_eq!(drag, DragState::Finished(Rect::new(100, 100, 300, 200)));
    }

    #[test]
    fn drag_direction_does_not_matter() {
        let mut forward = DragState::Idle;
        forward.pointer_down((100, 100));
        forward.pointer_up((400, 300));

        let mut backward = DragState::Idle;
        backward.pointer_down((400, 300));
        backward.pointer_up((100, 100));

        assert_eq!(forward, backward);
    }

    #[test]
    fn zero_movement_drag_cancels() {
        let mut drag = DragState::Idle;
        drag.pointer_down((100, 100));
        assert!(drag.pointer_up((100, 100)));
        assert_eq!(drag, DragState::Canceled);
    }

    #[test]
    fn sub_minimum_drag_cancels() {
        let mut drag = DragState::Idle;
        drag.pointer_down((10, 10));
        drag.pointer_moved((12, 60));
        drag.pointer_up((12, 60)); // width 2 < 3
        assert_eq!(drag, DragState::Canceled);

        let mut drag = DragState::Idle;
        drag.pointer_down((10, 10));
        drag.pointer_up((13, 13)); // exactly 3x3 survives
        assert_eq!(drag, DragState::Finished(Rect::new(10, 10, 3, 3)));
    }

    #[test]
    fn redundant_moves_request_no_repaint() {
        let mut drag = DragState::Idle;
        drag.pointer_down((5, 5));
        assert!(drag.pointer_moved((6, 6)));
        assert!(!drag.pointer_moved((6, 6)));
    }

    #[test]
    fn cancel_key_works_mid_drag() {
        let mut drag = DragState::Idle;
        drag.pointer_down((50, 50));
        drag.pointer_moved((200, 200));
        assert!(drag.cancel());
        assert_eq!(drag, DragState::Canceled);

        // Terminal states stay put.
        assert!(!drag.cancel());
        let mut finished = DragState::Finished(Rect::new(0, 0, 10, 10));
        assert!(!finished.cancel());
        assert_eq!(finished, DragState::Finished(Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn pointer_events_outside_a_drag_are_ignored() {
        let mut idle = DragState::Idle;
        assert!(!idle.pointer_moved((1, 1)));
        assert!(!idle.pointer_up((1, 1)));

        let mut done = DragState::Canceled;
        assert!(!done.pointer_down((1, 1)));
        assert_eq!(done, DragState::Canceled);
    }

    #[test]
    fn selection_tracks_the_live_drag() {
        let mut drag = DragState::Idle;
        assert_eq!(drag.selection(), None);
        drag.pointer_down((400, 100));
        drag.pointer_moved((100, 300));
        assert_eq!(drag.selection(), Some(Rect::new(100, 100, 300, 200)));
    }
}
