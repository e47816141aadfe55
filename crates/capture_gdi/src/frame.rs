//! Immutable virtual-screen pixel frame.

use crate::Rect;
use image::RgbaImage;

/// One frozen capture of the full virtual desktop.
///
/// Pixels are top-down RGBA. `origin_x`/`origin_y` are the desktop
/// coordinates of the top-left pixel; they are negative when a monitor sits
/// left of or above the primary display.
pub struct VirtualScreenFrame {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl VirtualScreenFrame {
    /// Convert desktop coordinates to frame-local coordinates
    pub fn screen_to_local(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.origin_x, y - self.origin_y)
    }

    /// Convert frame-local coordinates to desktop coordinates
    pub fn local_to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.origin_x, y + self.origin_y)
    }

    /// Crop `rect` (desktop coordinates) out of the frame.
    ///
    /// The rectangle is clipped to the frame first; `None` when nothing
    /// remains. The output dimensions equal the clipped rectangle's.
    pub fn crop(&self, rect: Rect) -> Option<RgbaImage> {
        let (lx, ty) = self.screen_to_local(rect.x, rect.y);
        let local = Rect::new(lx, ty, rect.width, rect.height)
            .clipped_to(self.width, self.height);
        if local.width == 0 || local.height == 0 {
            return None;
        }

        let row_bytes = (local.width * 4) as usize;
        let mut out = vec![0u8; row_bytes * local.height as usize];
        for row in 0..local.height {
            let src_y = local.y as u32 + row;
            let src = ((src_y * self.width + local.x as u32) * 4) as usize;
            let dst = row as usize * row_bytes;
            out[dst..dst + row_bytes].copy_from_slice(&self.pixels[src..src + row_bytes]);
        }

        RgbaImage::from_raw(local.width, local.height, out)
    }
}

/// Swap the red and blue channels of a 32-bit pixel buffer in place.
///
/// GDI reads back and blits in BGRA order; the frame is kept in RGBA.
/// The permutation is its own inverse, so the same call converts both ways.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_frame(origin_x: i32, origin_y: i32, width: u32, height: u32) -> VirtualScreenFrame {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        for y in 0..height {
            for x in 0..width {
                let off = ((y * width + x) * 4) as usize;
                pixels[off] = x as u8;
                pixels[off + 1] = y as u8;
                pixels[off + 2] = 0xAB;
                pixels[off + 3] = 0xFF;
            }
        }
        VirtualScreenFrame { origin_x, origin_y, width, height, pixels }
    }

    #[test]
    fn coordinate_conversion_round_trips() {
        let frame = checker_frame(-1920, -200, 8, 8);
        let (lx, ly) = frame.screen_to_local(-1900, -100);
        assert_eq!((lx, ly), (20, 100));
        assert_eq!(frame.local_to_screen(lx, ly), (-1900, -100));
    }

    #[test]
    fn crop_dimensions_match_selection() {
        let frame = checker_frame(0, 0, 64, 48);
        let img = frame.crop(Rect::new(10, 12, 30, 20)).unwrap();
        assert_eq!((img.width(), img.height()), (30, 20));

        // Top-left pixel of the crop is frame pixel (10, 12).
        let px = img.get_pixel(0, 0);
        assert_eq!(px.0, [10, 12, 0xAB, 0xFF]);
    }

    #[test]
    fn crop_respects_frame_origin() {
        let frame = checker_frame(-32, -16, 64, 48);
        // Desktop (0, 0) is frame-local (32, 16).
        let img = frame.crop(Rect::new(0, 0, 8, 8)).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
        assert_eq!(img.get_pixel(0, 0).0, [32, 16, 0xAB, 0xFF]);
    }

    #[test]
    fn crop_clips_to_frame_bounds() {
        let frame = checker_frame(0, 0, 40, 40);
        let img = frame.crop(Rect::new(30, 35, 100, 100)).unwrap();
        assert_eq!((img.width(), img.height()), (10, 5));
    }

    #[test]
    fn crop_outside_frame_is_none() {
        let frame = checker_frame(0, 0, 40, 40);
        assert!(frame.crop(Rect::new(100, 100, 10, 10)).is_none());
        assert!(frame.crop(Rect::new(10, 10, 0, 0)).is_none());
    }

    #[test]
    fn swap_red_blue_is_an_involution() {
        let original = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut buf = original.clone();
        swap_red_blue(&mut buf);
        assert_eq!(buf, vec![3, 2, 1, 4, 7, 6, 5, 8]);
        swap_red_blue(&mut buf);
        assert_eq!(buf, original);
    }
}
