use capture_gdi::Rect;
use overlay::selection::dim_bands;
use overlay::state::DragState;

#[test]
fn zero_movement_drag_ends_canceled() {
    let mut drag = DragState::Idle;
    drag.pointer_down((100, 100));
    assert!(drag.pointer_up((100, 100)));
    assert_eq!(drag, DragState::Canceled);
}

#[test]
fn reference_drag_produces_the_expected_rect_and_bands() {
    // Drag (100,100) -> (400,300) on a 1920x1080 virtual screen.
    let mut drag = DragState::Idle;
    drag.pointer_down((100, 100));
    drag.pointer_moved((250, 180));
    drag.pointer_moved((400, 300));
    assert!(drag.pointer_up((400, 300)));

    let DragState::Finished(rect) = drag else {
        panic!("drag did not finish: {drag:?}");
    };
    assert_eq!(rect, Rect::new(100, 100, 300, 200));

    let [top, bottom, left, right] = dim_bands(1920, 1080, rect);
    assert_eq!(top, Rect::new(0, 0, 1920, 100));
    assert_eq!(bottom, Rect::new(0, 300, 1920, 780));
    assert_eq!(left, Rect::new(0, 100, 100, 200));
    assert_eq!(right, Rect::new(400, 100, 1520, 200));
}

#[test]
fn escape_mid_drag_cancels_immediately() {
    let mut drag = DragState::Idle;
    drag.pointer_down((700, 500));
    drag.pointer_moved((900, 640));
    assert!(drag.cancel());
    assert_eq!(drag, DragState::Canceled);
    // No selection survives for a crop to run on.
    assert_eq!(drag.selection(), None);
}
