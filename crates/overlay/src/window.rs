//! Overlay window and its local message loop.

use std::cell::RefCell;
use std::sync::Once;
use std::thread;
use std::time::Duration;

use capture_gdi::VirtualScreenFrame;
use windows::core::w;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, SetCapture, SetFocus, VK_ESCAPE,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetCursorPos, LoadCursorW,
    PeekMessageW, RegisterClassExW, SetForegroundWindow, SetWindowPos, ShowWindow,
    TranslateMessage, HWND_TOPMOST, IDC_CROSS, MSG, PM_REMOVE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_SHOWWINDOW, SW_SHOW, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT, WNDCLASSEXW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_POPUP, WS_VISIBLE,
};

use crate::registry;
use crate::render::SessionState;
use crate::state::DragState;
use crate::{OverlayError, OverlayResult, SelectionOutcome};

const CLASS_NAME: windows::core::PCWSTR = w!("TextSnapOverlay");

thread_local! {
    // WM_DESTROY parks the deregistered session here for the modal loop.
    static FINISHED: RefCell<Option<Box<SessionState>>> = RefCell::new(None);
}

static REGISTER: Once = Once::new();

fn register_class() -> OverlayResult<()> {
    let mut result: OverlayResult<()> = Ok(());
    REGISTER.call_once(|| unsafe {
        let hmodule = match GetModuleHandleW(None) {
            Ok(h) => h,
            Err(e) => {
                result = Err(e.into());
                return;
            }
        };

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(wnd_proc),
            hInstance: HINSTANCE(hmodule.0),
            hCursor: LoadCursorW(None, IDC_CROSS).unwrap_or_default(),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            result = Err(OverlayError::ClassRegistration);
        }
    });
    result
}

/// Run one interactive region selection over the captured frame.
///
/// Creates the topmost overlay window sized to the virtual screen, pumps a
/// local cooperative message loop until the drag reaches a terminal state,
/// and reports the normalized selection in desktop coordinates. Blocks the
/// calling thread; bounded only by user action.
pub fn select_region(frame: &VirtualScreenFrame) -> OverlayResult<SelectionOutcome> {
    register_class()?;

    FINISHED.with(|slot| slot.borrow_mut().take());

    let id = registry::insert(Box::new(SessionState::new(frame)));

    unsafe {
        let hmodule = GetModuleHandleW(None)?;
        let hinstance = HINSTANCE(hmodule.0);

        let hwnd = match CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            CLASS_NAME,
            w!("TextSnap Selection"),
            WS_POPUP | WS_VISIBLE,
            frame.origin_x,
            frame.origin_y,
            frame.width as i32,
            frame.height as i32,
            None,
            None,
            hinstance,
            None,
        ) {
            Ok(hwnd) => hwnd,
            Err(_) => {
                registry::remove(id);
                return Err(OverlayError::WindowCreation);
            }
        };

        registry::attach(hwnd, id);

        let _ = SetWindowPos(
            hwnd,
            HWND_TOPMOST,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_SHOWWINDOW,
        );
        ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
        let _ = SetForegroundWindow(hwnd);
        let _ = SetFocus(hwnd);

        // Cooperative local loop: dispatch pending events, otherwise yield
        // briefly. WM_DESTROY empties the registry slot and ends it.
        let mut msg = MSG::default();
        while registry::contains(id) {
            if PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            } else {
                thread::sleep(Duration::from_millis(1));
            }
        }
    }

    let outcome = FINISHED
        .with(|slot| slot.borrow_mut().take())
        .map(|state| match state.drag {
            DragState::Finished(rect) => SelectionOutcome::Region(rect),
            _ => SelectionOutcome::Canceled,
        })
        .unwrap_or(SelectionOutcome::Canceled);

    Ok(outcome)
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // The back buffer repaints every pixel.
        WM_ERASEBKGND => LRESULT(1),

        WM_PAINT => {
            if registry::with(hwnd, |state| state.paint(hwnd)).is_some() {
                LRESULT(0)
            } else {
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
        }

        WM_LBUTTONDOWN => {
            on_pointer_down(hwnd);
            LRESULT(0)
        }

        WM_MOUSEMOVE => {
            on_pointer_moved(hwnd);
            LRESULT(0)
        }

        WM_LBUTTONUP => {
            on_pointer_up(hwnd);
            LRESULT(0)
        }

        WM_KEYDOWN if wparam.0 as u16 == VK_ESCAPE.0 => {
            if registry::with(hwnd, |state| state.drag.cancel()).unwrap_or(false) {
                let _ = DestroyWindow(hwnd);
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            if let Some(mut state) = registry::detach(hwnd) {
                state.resources.release();
                FINISHED.with(|slot| *slot.borrow_mut() = Some(state));
            }
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

unsafe fn cursor_pos() -> Option<(i32, i32)> {
    let mut pt = POINT::default();
    GetCursorPos(&mut pt).ok()?;
    Some((pt.x, pt.y))
}

unsafe fn on_pointer_down(hwnd: HWND) {
    let Some(pt) = cursor_pos() else { return };
    if registry::with(hwnd, |state| state.drag.pointer_down(pt)).unwrap_or(false) {
        // Exclusive pointer capture for the whole drag.
        SetCapture(hwnd);
        let _ = InvalidateRect(hwnd, None, false);
    }
}

unsafe fn on_pointer_moved(hwnd: HWND) {
    let Some(pt) = cursor_pos() else { return };
    if registry::with(hwnd, |state| state.drag.pointer_moved(pt)).unwrap_or(false) {
        let _ = InvalidateRect(hwnd, None, false);
    }
}

unsafe fn on_pointer_up(hwnd: HWND) {
    let Some(pt) = cursor_pos() else { return };
    let finished = registry::with(hwnd, |state| {
        if !state.drag.is_dragging() {
            return false;
        }
        state.drag.pointer_up(pt)
    })
    .unwrap_or(false);

    if finished {
        let _ = ReleaseCapture();
        let _ = DestroyWindow(hwnd);
    }
}
