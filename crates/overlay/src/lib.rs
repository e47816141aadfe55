//! Selection overlay module for TextSnap
//!
//! Shows the frozen desktop frame in a borderless topmost window, dims
//! everything outside the drag rectangle and resolves to the selected
//! region.

pub mod selection;
pub mod state;

#[cfg(windows)]
mod registry;
#[cfg(windows)]
mod render;
#[cfg(windows)]
pub mod window;

#[cfg(windows)]
pub use window::select_region;

use capture_gdi::Rect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("overlay window class registration failed")]
    ClassRegistration,

    #[error("overlay window creation failed")]
    WindowCreation,
}

pub type OverlayResult<T> = Result<T, OverlayError>;

/// Selection outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// User selected a region (desktop coordinates)
    Region(Rect),
    /// User canceled, or the drag was too small to mean anything
    Canceled,
}
