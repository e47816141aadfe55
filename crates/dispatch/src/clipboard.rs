//! UTF-16 text clipboard sink.

use std::ffi::c_void;

use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
};
use windows::Win32::System::Memory::{GlobalAlloc, GlobalLock, GlobalUnlock, GMEM_MOVEABLE};

use crate::{DispatchError, DispatchResult};

// CF_UNICODETEXT
const CLIPBOARD_FORMAT_UNICODE: u32 = 13;

/// Put `text` on the clipboard as null-terminated UTF-16.
///
/// On success the global memory handle belongs to the system and must not
/// be freed here. The clipboard is closed on every path.
pub fn set_clipboard_text(text: &str) -> DispatchResult<()> {
    let mut wide: Vec<u16> = text.encode_utf16().collect();
    wide.push(0);
    let nbytes = wide.len() * std::mem::size_of::<u16>();

    unsafe {
        if OpenClipboard(None).is_err() {
            return Err(DispatchError::Clipboard("OpenClipboard failed"));
        }

        let result = write_unicode(&wide, nbytes);
        let _ = CloseClipboard();
        result
    }
}

unsafe fn write_unicode(wide: &[u16], nbytes: usize) -> DispatchResult<()> {
    if EmptyClipboard().is_err() {
        return Err(DispatchError::Clipboard("EmptyClipboard failed"));
    }

    let hmem = GlobalAlloc(GMEM_MOVEABLE, nbytes)
        .map_err(|_| DispatchError::Clipboard("GlobalAlloc failed"))?;

    let ptr = GlobalLock(hmem);
    if ptr.is_null() {
        return Err(DispatchError::Clipboard("GlobalLock failed"));
    }
    std::ptr::copy_nonoverlapping(wide.as_ptr() as *const c_void, ptr, nbytes);
    let _ = GlobalUnlock(hmem);

    if SetClipboardData(CLIPBOARD_FORMAT_UNICODE, HANDLE(hmem.0)).is_err() {
        return Err(DispatchError::Clipboard("SetClipboardData failed"));
    }
    Ok(())
}
