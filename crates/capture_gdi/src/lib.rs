//! Virtual-desktop capture module for TextSnap
//!
//! Grabs the union of all attached monitors into an immutable RGBA frame
//! via one GDI raster copy.

pub mod frame;
#[cfg(windows)]
mod grab;

pub use frame::{swap_red_blue, VirtualScreenFrame};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to acquire the screen device context")]
    ScreenDc,

    #[error("failed to create a memory device context")]
    MemoryDc,

    #[error("failed to create the capture bitmap")]
    BitmapCreate,

    #[cfg(windows)]
    #[error("raster copy from screen failed: {0}")]
    RasterCopy(windows::core::Error),

    #[error("pixel readback failed")]
    PixelReadback,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Rectangle in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x &&
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// Normalized rectangle spanning two drag endpoints, in either order.
    pub fn from_points(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        let width = (a.0 - b.0).unsigned_abs();
        let height = (a.1 - b.1).unsigned_abs();
        Self { x, y, width, height }
    }

    /// Intersection with a `frame_w`x`frame_h` frame anchored at the origin.
    /// May be zero-sized.
    pub fn clipped_to(&self, frame_w: u32, frame_h: u32) -> Rect {
        let l = self.x.clamp(0, frame_w as i32);
        let t = self.y.clamp(0, frame_h as i32);
        let r = self.right().clamp(0, frame_w as i32);
        let b = self.bottom().clamp(0, frame_h as i32);
        Rect {
            x: l,
            y: t,
            width: (r - l).max(0) as u32,
            height: (b - t).max(0) as u32,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
