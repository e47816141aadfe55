//! Global hotkey registration: Win+Alt+Shift+T.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, MOD_ALT, MOD_SHIFT, MOD_WIN,
};

/// Fixed identifier for the one hotkey this process ever registers.
pub const HOTKEY_ID: i32 = 0xBEEF;

/// Virtual-key code for `T`.
const VK_T: u32 = 0x54;

/// Register the capture hotkey against this thread's message queue.
pub fn register() -> windows::core::Result<()> {
    unsafe { RegisterHotKey(None, HOTKEY_ID, MOD_WIN | MOD_ALT | MOD_SHIFT, VK_T) }
}

pub fn unregister() {
    unsafe {
        let _ = UnregisterHotKey(None, HOTKEY_ID);
    }
}
