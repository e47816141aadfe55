//! GDI capture path: one raster copy of the whole virtual desktop.

use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

use crate::frame::{swap_red_blue, VirtualScreenFrame};
use crate::{CaptureError, CaptureResult};

/// Screen device context, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> CaptureResult<Self> {
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            return Err(CaptureError::ScreenDc);
        }
        Ok(Self(hdc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(None, self.0);
        }
    }
}

/// Off-screen memory device context, deleted on drop.
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(screen: &ScreenDc) -> CaptureResult<Self> {
        let hdc = unsafe { CreateCompatibleDC(screen.0) };
        if hdc.is_invalid() {
            return Err(CaptureError::MemoryDc);
        }
        Ok(Self(hdc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// Capture bitmap, deleted on drop.
struct CaptureBitmap(HBITMAP);

impl CaptureBitmap {
    fn compatible_with(screen: &ScreenDc, width: i32, height: i32) -> CaptureResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CaptureError::BitmapCreate);
        }
        let hbm = unsafe { CreateCompatibleBitmap(screen.0, width, height) };
        if hbm.is_invalid() {
            return Err(CaptureError::BitmapCreate);
        }
        Ok(Self(hbm))
    }
}

impl Drop for CaptureBitmap {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.0);
        }
    }
}

/// Keeps a bitmap selected into a DC, restoring the previous one on drop.
struct BitmapSelection {
    dc: HDC,
    old: HGDIOBJ,
}

impl BitmapSelection {
    fn select(dc: &MemoryDc, bitmap: &CaptureBitmap) -> Self {
        let old = unsafe { SelectObject(dc.0, bitmap.0) };
        Self { dc: dc.0, old }
    }
}

impl Drop for BitmapSelection {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.old);
        }
    }
}

impl VirtualScreenFrame {
    /// Capture the entire virtual desktop in one raster copy.
    ///
    /// Deterministic: a failure means a resource or driver problem, so no
    /// stage is retried. Each stage reports its own cause.
    pub fn capture() -> CaptureResult<Self> {
        let (vx, vy, vw, vh) = unsafe {
            (
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            )
        };

        let screen = ScreenDc::acquire()?;
        let mem = MemoryDc::compatible_with(&screen)?;
        let bitmap = CaptureBitmap::compatible_with(&screen, vw, vh)?;
        let _selected = BitmapSelection::select(&mem, &bitmap);

        unsafe {
            BitBlt(mem.0, 0, 0, vw, vh, screen.0, vx, vy, SRCCOPY)
                .map_err(CaptureError::RasterCopy)?;
        }

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: vw,
                biHeight: -vh, // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            bmiColors: [Default::default()],
        };

        let mut pixels = vec![0u8; (vw as usize) * (vh as usize) * 4];
        let lines = unsafe {
            GetDIBits(
                mem.0,
                bitmap.0,
                0,
                vh as u32,
                Some(pixels.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            )
        };
        if lines == 0 {
            return Err(CaptureError::PixelReadback);
        }

        swap_red_blue(&mut pixels);

        Ok(VirtualScreenFrame {
            origin_x: vx,
            origin_y: vy,
            width: vw as u32,
            height: vh as u32,
            pixels,
        })
    }
}
