//! TextSnap - hotkey-driven screen-region OCR for Windows

mod config;
mod coordinator;
#[cfg(windows)]
mod hotkey;
#[cfg(windows)]
mod session;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    run()
}

#[cfg(not(windows))]
fn main() {
    eprintln!("textsnap only runs on Windows");
    std::process::exit(1);
}

#[cfg(windows)]
fn run() -> anyhow::Result<()> {
    use std::thread;

    use crossbeam_channel::bounded;
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG, WM_HOTKEY,
    };

    use crate::coordinator::{Action, Coordinator};
    use crate::session::{CaptureRequest, ERROR_TITLE, WM_SESSION_DONE};

    env_logger::init();

    let cfg = match config::Config::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            config::print_usage();
            std::process::exit(2);
        }
    };

    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let main_thread = unsafe { GetCurrentThreadId() };

    // Depth 1 is enough: the hotkey is unregistered whenever a request is
    // in flight, so the producer can never block on a full queue.
    let (request_tx, request_rx) = bounded::<CaptureRequest>(1);
    let worker = thread::spawn(move || session::run(request_rx));

    if let Err(e) = hotkey::register() {
        log::error!("hotkey registration failed: {e}");
        dispatch::notify::message_box_top(ERROR_TITLE, &format!("Hotkey registration failed: {e}"));
        anyhow::bail!("hotkey registration failed: {e}");
    }

    log::info!("hotkey ready: Win+Alt+Shift+T");
    log::info!("OCR endpoint: {}", cfg.ocr_url);
    log::info!("Esc cancels an active selection");

    let mut coordinator = Coordinator::new();

    let mut msg = MSG::default();
    unsafe {
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 == 0 || ret.0 == -1 {
                break;
            }

            match msg.message {
                WM_HOTKEY if msg.wParam.0 as i32 == hotkey::HOTKEY_ID => {
                    if coordinator.on_hotkey() == Action::StartSession {
                        // Unregister first; re-entrant triggers are then
                        // impossible while the session runs.
                        hotkey::unregister();
                        let request = CaptureRequest {
                            ocr_url: cfg.ocr_url.clone(),
                            main_thread,
                        };
                        if request_tx.try_send(request).is_err() {
                            // Only possible if the worker died; re-arm.
                            log::warn!("capture worker unavailable");
                            let _ = hotkey::register();
                            coordinator.on_session_done();
                        }
                    }
                }
                WM_SESSION_DONE => {
                    if coordinator.on_session_done() {
                        if let Err(e) = hotkey::register() {
                            log::warn!("hotkey re-registration failed: {e}");
                        }
                    }
                }
                _ => {}
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    hotkey::unregister();
    drop(request_tx);
    let _ = worker.join();

    Ok(())
}
