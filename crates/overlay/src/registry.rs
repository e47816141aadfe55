//! Shared session-state registry.
//!
//! The window's user-data slot stores an opaque id, never a pointer; the
//! window procedure looks the state up here on every callback. The critical
//! section is a single map operation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongPtrW, SetWindowLongPtrW, GWLP_USERDATA,
};

use crate::render::SessionState;

static SESSIONS: Lazy<Mutex<HashMap<usize, Box<SessionState>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Register a session and return its id.
pub fn insert(state: Box<SessionState>) -> usize {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    SESSIONS.lock().insert(id, state);
    id
}

/// Stash the id on the window so the procedure can find its state.
pub unsafe fn attach(hwnd: HWND, id: usize) {
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, id as isize);
}

pub fn contains(id: usize) -> bool {
    SESSIONS.lock().contains_key(&id)
}

pub fn remove(id: usize) -> Option<Box<SessionState>> {
    SESSIONS.lock().remove(&id)
}

/// Remove the state attached to `hwnd`, clearing the window slot.
pub unsafe fn detach(hwnd: HWND) -> Option<Box<SessionState>> {
    let id = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as usize;
    if id == 0 {
        return None;
    }
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
    remove(id)
}

/// Run `f` on the state attached to `hwnd`.
///
/// Callers must not re-enter the registry (e.g. via `DestroyWindow`) from
/// inside `f`; the lock is held for the duration.
pub fn with<R>(hwnd: HWND, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
    let id = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as usize;
    if id == 0 {
        return None;
    }
    SESSIONS.lock().get_mut(&id).map(|state| f(state))
}
