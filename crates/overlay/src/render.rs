//! Double-buffered dim/highlight rendering for the overlay.

use capture_gdi::{swap_red_blue, Rect, VirtualScreenFrame};
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    AlphaBlend, BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreatePen,
    CreateSolidBrush, DeleteDC, DeleteObject, EndPaint, FillRect, LineTo, MoveToEx, SelectObject,
    SetDIBitsToDevice, AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION,
    DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, PAINTSTRUCT, PS_SOLID, SRCCOPY,
};

use crate::selection::dim_bands;
use crate::state::DragState;

/// Border drawn on the selection boundary: 5px solid cyan.
const BORDER_WIDTH: i32 = 5;
const BORDER_COLOR: COLORREF = COLORREF(0x00FF_FF00);

/// Opacity of the dimmed area, ~18%.
const DIM_ALPHA: u8 = 46;

/// Mutable state for one overlay session.
///
/// Created when the overlay window is created, mutated only by that
/// window's event handler, torn down on window destruction.
pub struct SessionState {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
    /// Frame pixels in GDI byte order, blitted into the back buffer on
    /// every repaint.
    bgra: Vec<u8>,
    pub drag: DragState,
    pub resources: RenderResources,
}

impl SessionState {
    pub fn new(frame: &VirtualScreenFrame) -> Self {
        let mut bgra = frame.pixels.clone();
        swap_red_blue(&mut bgra);
        Self {
            origin_x: frame.origin_x,
            origin_y: frame.origin_y,
            width: frame.width,
            height: frame.height,
            bgra,
            drag: DragState::Idle,
            resources: RenderResources::default(),
        }
    }

    /// Current selection clipped to the frame, in frame-local coordinates.
    fn local_selection(&self) -> Option<Rect> {
        let sel = self.drag.selection()?;
        let local = Rect::new(
            sel.x - self.origin_x,
            sel.y - self.origin_y,
            sel.width,
            sel.height,
        );
        Some(local.clipped_to(self.width, self.height))
    }

    /// Compose one frame into the back buffer and present it.
    pub fn paint(&mut self, hwnd: HWND) {
        unsafe {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);
            if hdc.is_invalid() {
                return;
            }

            self.resources.ensure(hdc, self.width, self.height);
            let dst = self.resources.back_dc().unwrap_or(hdc);

            self.blit_frame(dst);
            self.dim_and_outline(dst);

            // One visible copy; everything above happened off screen.
            if let Some(back) = self.resources.back_dc() {
                let _ = BitBlt(
                    hdc,
                    0,
                    0,
                    self.width as i32,
                    self.height as i32,
                    back,
                    0,
                    0,
                    SRCCOPY,
                );
            }

            let _ = EndPaint(hwnd, &ps);
        }
    }

    unsafe fn blit_frame(&self, dst: HDC) {
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: self.width as i32,
                biHeight: -(self.height as i32), // Top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            bmiColors: [Default::default()],
        };

        SetDIBitsToDevice(
            dst,
            0,
            0,
            self.width,
            self.height,
            0,
            0,
            0,
            self.height,
            self.bgra.as_ptr() as *const _,
            &bmi,
            DIB_RGB_COLORS,
        );
    }

    unsafe fn dim_and_outline(&self, dst: HDC) {
        let dim_src = self.resources.dim_source_dc();

        match self.local_selection() {
            None => {
                // Nothing selected yet: dim the whole frame.
                let whole = Rect::new(0, 0, self.width, self.height);
                alpha_fill(dst, dim_src, whole, DIM_ALPHA);
            }
            Some(sel) => {
                for band in dim_bands(self.width, self.height, sel) {
                    alpha_fill(dst, dim_src, band, DIM_ALPHA);
                }
                if sel.width >= 1 && sel.height >= 1 {
                    draw_border(dst, sel.x, sel.y, sel.right(), sel.bottom());
                }
            }
        }
    }
}

/// Session-scoped GDI render resources, created lazily on first paint and
/// released exactly once on window teardown.
///
/// Handles are kept as raw integers so the state can live in the shared
/// session registry (the worker thread is their only user).
#[derive(Default)]
pub struct RenderResources {
    back_dc: isize,
    back_bmp: isize,
    back_old: isize,
    dim_dc: isize,
    dim_bmp: isize,
    dim_old: isize,
}

impl RenderResources {
    fn back_dc(&self) -> Option<HDC> {
        (self.back_dc != 0).then(|| HDC(self.back_dc as *mut _))
    }

    fn dim_source_dc(&self) -> Option<HDC> {
        (self.dim_dc != 0).then(|| HDC(self.dim_dc as *mut _))
    }

    /// Create the back buffer and the cached 1x1 dim source if missing.
    unsafe fn ensure(&mut self, paint_hdc: HDC, width: u32, height: u32) {
        if self.back_dc == 0 {
            if let Some((dc, bmp, old)) =
                create_offscreen(paint_hdc, width as i32, height as i32)
            {
                self.back_dc = dc;
                self.back_bmp = bmp;
                self.back_old = old;
            }
        }

        if self.dim_dc == 0 {
            if let Some((dc, bmp, old)) = create_offscreen(paint_hdc, 1, 1) {
                // Fill the single pixel black; AlphaBlend stretches it over
                // each band at constant alpha.
                let brush = CreateSolidBrush(COLORREF(0));
                if !brush.is_invalid() {
                    let px = RECT { left: 0, top: 0, right: 1, bottom: 1 };
                    FillRect(HDC(dc as *mut _), &px, brush);
                    DeleteObject(brush);
                }
                self.dim_dc = dc;
                self.dim_bmp = bmp;
                self.dim_old = old;
            }
        }
    }

    /// Release everything. Safe to call more than once.
    pub fn release(&mut self) {
        unsafe {
            release_offscreen(&mut self.back_dc, &mut self.back_bmp, &mut self.back_old);
            release_offscreen(&mut self.dim_dc, &mut self.dim_bmp, &mut self.dim_old);
        }
    }
}

impl Drop for RenderResources {
    fn drop(&mut self) {
        self.release();
    }
}

unsafe fn create_offscreen(paint_hdc: HDC, width: i32, height: i32) -> Option<(isize, isize, isize)> {
    let dc = CreateCompatibleDC(paint_hdc);
    if dc.is_invalid() {
        return None;
    }
    let bmp = CreateCompatibleBitmap(paint_hdc, width, height);
    if bmp.is_invalid() {
        let _ = DeleteDC(dc);
        return None;
    }
    let old = SelectObject(dc, bmp);
    Some((dc.0 as isize, bmp.0 as isize, old.0 as isize))
}

unsafe fn release_offscreen(dc: &mut isize, bmp: &mut isize, old: &mut isize) {
    if *dc != 0 {
        SelectObject(HDC(*dc as *mut _), HGDIOBJ(*old as *mut _));
        DeleteObject(HBITMAP(*bmp as *mut _));
        let _ = DeleteDC(HDC(*dc as *mut _));
        *dc = 0;
        *bmp = 0;
        *old = 0;
    }
}

/// Stretch the cached 1x1 source over `rc` at constant alpha.
unsafe fn alpha_fill(dst: HDC, src: Option<HDC>, rc: Rect, alpha: u8) {
    let Some(src) = src else { return };
    if rc.width == 0 || rc.height == 0 {
        return;
    }

    let blend = BLENDFUNCTION {
        BlendOp: AC_SRC_OVER as u8,
        BlendFlags: 0,
        SourceConstantAlpha: alpha,
        AlphaFormat: 0,
    };
    let _ = AlphaBlend(
        dst,
        rc.x,
        rc.y,
        rc.width as i32,
        rc.height as i32,
        src,
        0,
        0,
        1,
        1,
        blend,
    );
}

/// Four line segments forming a closed rectangle on the selection boundary.
unsafe fn draw_border(hdc: HDC, l: i32, t: i32, r: i32, b: i32) {
    let pen = CreatePen(PS_SOLID, BORDER_WIDTH, BORDER_COLOR);
    if pen.is_invalid() {
        return;
    }
    let old = SelectObject(hdc, pen);

    let _ = MoveToEx(hdc, l, t, None);
    let _ = LineTo(hdc, r, t);
    let _ = LineTo(hdc, r, b);
    let _ = LineTo(hdc, l, b);
    let _ = LineTo(hdc, l, t);

    SelectObject(hdc, old);
    DeleteObject(pen);
}
