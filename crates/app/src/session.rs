//! Capture-session worker: one request at a time, end to end.

use capture_gdi::VirtualScreenFrame;
use crossbeam_channel::Receiver;
use dispatch::{clipboard, encode, notify, OcrClient};
use overlay::{select_region, SelectionOutcome};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_APP};

pub const ERROR_TITLE: &str = "TextSnap Error";
const RESULT_TITLE: &str = "OCR Result (Copied to clipboard)";

/// Posted to the main thread's queue when a session ends, however it ends;
/// only then is the hotkey re-registered.
pub const WM_SESSION_DONE: u32 = WM_APP + 1;

/// One queued capture session.
pub struct CaptureRequest {
    pub ocr_url: String,
    pub main_thread: u32,
}

/// Posts the completion signal on drop. Every exit path, including a
/// panic in the session body, re-arms the hotkey.
struct CompletionGuard(u32);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = PostThreadMessageW(self.0, WM_SESSION_DONE, WPARAM(0), LPARAM(0));
        }
    }
}

/// Worker loop. Exits when the request channel closes.
///
/// All window and GDI resources are created and torn down on this one
/// thread; window ownership is thread-bound.
pub fn run(requests: Receiver<CaptureRequest>) {
    for request in requests.iter() {
        let _done = CompletionGuard(request.main_thread);
        run_session(&request);
    }
}

fn run_session(request: &CaptureRequest) {
    let frame = match VirtualScreenFrame::capture() {
        Ok(frame) => frame,
        Err(e) => {
            log::error!("screen capture failed: {e}");
            notify::message_box_top(ERROR_TITLE, &e.to_string());
            return;
        }
    };
    log::debug!(
        "captured {}x{} at ({}, {})",
        frame.width,
        frame.height,
        frame.origin_x,
        frame.origin_y
    );

    let rect = match select_region(&frame) {
        Ok(SelectionOutcome::Region(rect)) => rect,
        Ok(SelectionOutcome::Canceled) => {
            log::debug!("selection canceled");
            return;
        }
        Err(e) => {
            log::error!("selection overlay failed: {e}");
            notify::message_box_top(ERROR_TITLE, &e.to_string());
            return;
        }
    };

    let Some(region) = frame.crop(rect) else {
        log::debug!("selection fell outside the frame");
        return;
    };
    log::debug!("selected {}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y);

    let png = match encode::encode_png(&region) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("PNG encoding failed: {e}");
            notify::message_box_top(ERROR_TITLE, &e.to_string());
            return;
        }
    };

    let text = match OcrClient::new(request.ocr_url.as_str()).and_then(|c| c.recognize(png)) {
        Ok(text) => text,
        Err(e) => {
            log::error!("OCR upload failed: {e}");
            notify::message_box_top(ERROR_TITLE, &e.to_string());
            return;
        }
    };

    // Clipboard failure is not fatal; the result is still shown.
    if let Err(e) = clipboard::set_clipboard_text(&text) {
        log::warn!("clipboard write failed: {e}");
    }

    notify::message_box_top(RESULT_TITLE, &notify::display_text(&text));
}
