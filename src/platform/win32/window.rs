// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the window class.
//   • Create the floating tool window, centred on the primary work area.
//   • Own the `AppState` through the window's user data.
//   • Run the Win32 message loop with the Escape key filter.
//   • Dispatch WM_CREATE, WM_SIZE, WM_DPICHANGED, WM_CLOSE, WM_DESTROY.
//   • Expose a safe error-dialog helper for use by main().
//
// ── WindowData lifetime ───────────────────────────────────────────────────────
//
// `run` boxes a `WindowData` and passes the raw pointer as the creation
// parameter.  WM_NCCREATE stores it in GWLP_USERDATA; WM_NCDESTROY takes it
// back and drops it.  A `&mut WindowData` obtained from the user data MUST NOT
// be held across any call that can re-enter `wnd_proc` (SetWindowPos,
// DestroyWindow, ShowWindow, …): the nested call would alias it.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, COLORREF, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM,
        },
        Graphics::Gdi::{GetSysColor, GetSysColorBrush, SetBkColor, UpdateWindow, COLOR_WINDOW, HDC},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            HiDpi::AdjustWindowRectExForDpi,
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
                GetMessageW,
                LoadCursorW, LoadIconW, MessageBoxW, PostQuitMessage, RegisterClassExW,
                SetForegroundWindow, SetWindowPos, ShowWindow, SystemParametersInfoW,
                TranslateMessage, CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
                GWLP_USERDATA, HMENU, IDC_ARROW, IDI_APPLICATION, MB_ICONERROR, MB_OK, MSG,
                SPI_GETWORKAREA, SWP_NOACTIVATE, SWP_NOZORDER, SW_SHOW,
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, WINDOW_EX_STYLE, WM_CLOSE, WM_CREATE,
                WM_CTLCOLORSTATIC, WM_DESTROY, WM_DPICHANGED, WM_NCCREATE,
                WM_NCDESTROY, WM_SIZE, WNDCLASSEXW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
                WS_OVERLAPPEDWINDOW,
            },
        },
    },
};

#[cfg(target_pointer_width = "64")]
use windows::Win32::UI::WindowsAndMessaging::{GetWindowLongPtrW, SetWindowLongPtrW};
#[cfg(target_pointer_width = "32")]
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW as GetWindowLongPtrW, SetWindowLongW as SetWindowLongPtrW,
};

use super::{dpi, text_view::TextView};
use crate::{
    app::{self, AppState, Dismissal, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH},
    error::{GlanceError, Result},
    input::DisplayText,
    platform::layout::{self, Bounds},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register the window class.
const CLASS_NAME: PCWSTR = w!("GlanceResultWindow");

/// Floating (topmost) and kept out of the taskbar and Alt+Tab (tool window).
const EX_STYLE: WINDOW_EX_STYLE = WINDOW_EX_STYLE(WS_EX_TOPMOST.0 | WS_EX_TOOLWINDOW.0);

// ── WindowData ────────────────────────────────────────────────────────────────

/// Everything the window procedure owns.
///
/// Drop order: `view` (deletes the font; the EDIT child is already gone by
/// WM_NCDESTROY), then `app`.
struct WindowData {
    view: Option<TextView>,
    app: AppState,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Show `text` in the floating window and drive the message loop until the
/// window is dismissed.
pub(crate) fn run(text: DisplayText) -> Result<()> {
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    dpi::init();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }?;
    let hinstance = HINSTANCE(hmodule.0);

    register_class(hinstance)?;
    let hwnd = create_window(hinstance, AppState::new(text))?;
    present(hwnd);

    #[cfg(debug_assertions)]
    tracing::debug!(
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        "window visible"
    );

    // Installed once; lives exactly as long as the loop.
    message_loop(move |msg| {
        if app::is_dismiss_message(msg.message, msg.wParam.0) {
            dismiss(hwnd, Dismissal::EscapeKey);
            true
        } else {
            false
        }
    })
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();

    // SAFETY: msg_wide is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            w!("Glance: fatal error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: IDI_APPLICATION is a built-in icon resource.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }?;

    // SAFETY: IDC_ARROW is a built-in cursor resource.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }?;

    // SAFETY: COLOR_WINDOW is a valid system colour index; system colour
    // brushes are owned by the system and never need freeing.
    let bg_brush = unsafe { GetSysColorBrush(COLOR_WINDOW) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, app: AppState) -> Result<HWND> {
    let dpi = dpi::get_system_dpi();
    let (width, height) = frame_size(dpi)?;
    let (x, y) = match work_area() {
        Some(area) => area.center(width, height),
        None => (CW_USEDEFAULT, CW_USEDEFAULT),
    };

    let title: Vec<u16> = WINDOW_TITLE.encode_utf16().chain(std::iter::once(0)).collect();
    let data = Box::into_raw(Box::new(WindowData { view: None, app }));

    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // title outlives the call.  `data` is reclaimed in WM_NCDESTROY, which
    // Windows also sends when creation fails after WM_NCCREATE.
    let hwnd = unsafe {
        CreateWindowExW(
            EX_STYLE,
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            x,
            y,
            width,
            height,
            HWND::default(),
            HMENU::default(),
            hinstance,
            Some(data as *const c_void),
        )
    }?;

    Ok(hwnd)
}

/// Outer window size whose client area is WINDOW_WIDTH × WINDOW_HEIGHT
/// logical units at `dpi`.
fn frame_size(dpi: u32) -> Result<(i32, i32)> {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: layout::scale(WINDOW_WIDTH, dpi),
        bottom: layout::scale(WINDOW_HEIGHT, dpi),
    };

    // SAFETY: rect is a valid in/out pointer for the duration of the call.
    unsafe { AdjustWindowRectExForDpi(&mut rect, WS_OVERLAPPEDWINDOW, FALSE, EX_STYLE, dpi) }?;

    Ok((rect.right - rect.left, rect.bottom - rect.top))
}

/// The primary monitor's work area (screen minus taskbar), if available.
fn work_area() -> Option<Bounds> {
    let mut rect = RECT::default();

    // SAFETY: SPI_GETWORKAREA writes a RECT; &mut rect is valid for the call.
    let ok = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rect as *mut RECT as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };

    if ok.is_err() {
        tracing::warn!("work area unavailable; using default window position");
        return None;
    }

    Some(Bounds {
        x: rect.left,
        y: rect.top,
        width: rect.right - rect.left,
        height: rect.bottom - rect.top,
    })
}

/// Show the window, bring it to the foreground and focus the text.
fn present(hwnd: HWND) {
    // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
    // Return values (previous visibility, success flags) are advisory.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
        if !SetForegroundWindow(hwnd).as_bool() {
            tracing::debug!("foreground request refused by the shell");
        }
    }

    // SAFETY: no re-entrant call happens while the reference is alive;
    // SetFocus only sends focus messages to the EDIT child and default
    // handling on this window.
    if let Some(view) = unsafe { window_data(hwnd) }.and_then(|d| d.view.as_ref()) {
        view.focus();
    }
}

// ── Dismissal ─────────────────────────────────────────────────────────────────

/// Close the window for `by`.  Destroying it posts WM_QUIT, which ends the
/// message loop and with it the process.
fn dismiss(hwnd: HWND, by: Dismissal) {
    // Scoped so the borrow ends before DestroyWindow re-enters wnd_proc.
    let first = {
        // SAFETY: see module header; the reference dies at the end of the block.
        match unsafe { window_data(hwnd) } {
            Some(data) => data.app.dismiss(by),
            // Already destroyed: a late key repeat after the first dismissal.
            None => false,
        }
    };

    if first {
        // SAFETY: hwnd is the live main window.  DestroyWindow sends
        // WM_DESTROY, which posts WM_QUIT via PostQuitMessage.
        if let Err(e) = unsafe { DestroyWindow(hwnd) } {
            tracing::error!(error = %e, "DestroyWindow failed");
        }
    }
}

// ── Message loop ──────────────────────────────────────────────────────────────

/// Pump messages until WM_QUIT.  `filter` sees every message first; returning
/// `true` consumes it (it is neither translated nor dispatched).
fn message_loop<F>(mut filter: F) -> Result<()>
where
    F: FnMut(&MSG) -> bool,
{
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            // GetMessageW returns -1 on error.
            -1 => return Err(last_error("GetMessageW")),
            // Returns 0 when WM_QUIT is retrieved — exit the loop cleanly.
            0 => break,
            _ => {
                if filter(&msg) {
                    continue;
                }
                // SAFETY: msg was populated by a successful GetMessageW call.
                unsafe {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            }
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // ── Lifecycle ─────────────────────────────────────────────────────────
        WM_NCCREATE => {
            // SAFETY: for WM_NCCREATE, lparam points to the CREATESTRUCTW
            // whose lpCreateParams is the WindowData pointer from create_window.
            let cs = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, cs.lpCreateParams as _);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_CREATE => {
            // SAFETY: for WM_CREATE, lparam points to a valid CREATESTRUCTW.
            let cs = &*(lparam.0 as *const CREATESTRUCTW);
            match on_create(hwnd, cs.hInstance) {
                Ok(()) => LRESULT(0),
                Err(e) => {
                    tracing::error!(error = %e, "text view setup failed");
                    // -1 makes CreateWindowExW fail and destroys the window.
                    LRESULT(-1)
                }
            }
        }

        WM_CLOSE => {
            dismiss(hwnd, Dismissal::CloseControl);
            LRESULT(0)
        }

        WM_DESTROY => {
            // A window torn down by a failed WM_CREATE never had a view and
            // must not leave WM_QUIT behind for main()'s error dialog.
            let quit = window_data(hwnd)
                .map(|d| d.app.quit_on_destroy(d.view.is_some()))
                .unwrap_or(false);
            if quit {
                // SAFETY: PostQuitMessage with exit code 0 is always safe to
                // call from WM_DESTROY. It posts WM_QUIT to the thread's queue.
                PostQuitMessage(0);
            }
            LRESULT(0)
        }

        WM_NCDESTROY => {
            // SAFETY: the pointer was stored in WM_NCCREATE and is cleared
            // here, so it is reclaimed exactly once.
            let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WindowData;
            if !ptr.is_null() {
                drop(Box::from_raw(ptr));
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        // ── Layout ────────────────────────────────────────────────────────────
        WM_SIZE => {
            // lparam low word = new client width, high word = new client height.
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            // SAFETY: fill only sends messages to the EDIT child.
            if let Some(view) = window_data(hwnd).and_then(|d| d.view.as_ref()) {
                view.fill(width, height);
            }
            LRESULT(0)
        }

        WM_DPICHANGED => {
            // High word of wparam is the new DPI (X and Y are always equal).
            let new_dpi = ((wparam.0 >> 16) & 0xFFFF) as u32;
            // SAFETY: for WM_DPICHANGED, lparam points to the suggested RECT.
            let suggested = *(lparam.0 as *const RECT);
            on_dpi_changed(hwnd, new_dpi, suggested);
            LRESULT(0)
        }

        // Read-only edit controls ask for the "static" colours; answer with
        // the normal window colours so the text does not sit on grey.
        WM_CTLCOLORSTATIC => {
            let hdc = HDC(wparam.0 as *mut c_void);
            let _ = SetBkColor(hdc, COLORREF(GetSysColor(COLOR_WINDOW)));
            LRESULT(GetSysColorBrush(COLOR_WINDOW).0 as isize)
        }

        // Default processing for all unhandled messages.
        // SAFETY: hwnd and message parameters are valid — provided by Windows.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Message handlers ──────────────────────────────────────────────────────────

fn on_create(hwnd: HWND, hinstance: HINSTANCE) -> Result<()> {
    let view = TextView::create(hwnd, hinstance, dpi::get_for_window(hwnd))?;

    // SAFETY: set_text only sends messages to the EDIT child (and
    // notifications the default branch handles), never WM_NC*/WM_SIZE here.
    let data = unsafe { window_data(hwnd) }.ok_or(GlanceError::Win32 {
        function: "GetWindowLongPtrW",
        code: 0,
    })?;
    view.set_text(data.app.text().as_str())?;
    tracing::debug!(bytes = data.app.text().len(), "text view populated");

    let mut client = RECT::default();
    // SAFETY: hwnd is the window being created; client is a valid out-pointer.
    unsafe { GetClientRect(hwnd, &mut client) }?;
    view.fill(client.right - client.left, client.bottom - client.top);

    data.view = Some(view);

    Ok(())
}

fn on_dpi_changed(hwnd: HWND, new_dpi: u32, suggested: RECT) {
    {
        // SAFETY: set_dpi only talks to the EDIT child; the borrow ends
        // before SetWindowPos re-enters wnd_proc with WM_SIZE.
        if let Some(view) = unsafe { window_data(hwnd) }.and_then(|d| d.view.as_mut()) {
            if let Err(e) = view.set_dpi(new_dpi) {
                tracing::warn!(error = %e, new_dpi, "font rebuild failed; keeping old font");
            }
        }
    }

    // SAFETY: hwnd is valid; the suggested rect comes straight from Windows.
    let moved = unsafe {
        SetWindowPos(
            hwnd,
            HWND::default(),
            suggested.left,
            suggested.top,
            suggested.right - suggested.left,
            suggested.bottom - suggested.top,
            SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
    if let Err(e) = moved {
        tracing::warn!(error = %e, "SetWindowPos after DPI change failed");
    }
}

// ── User data ─────────────────────────────────────────────────────────────────

/// The `WindowData` stored in `hwnd`'s user data, if any.
///
/// # Safety
///
/// The returned reference must not outlive a call that can re-enter
/// `wnd_proc` for `hwnd` (see module header).
unsafe fn window_data<'a>(hwnd: HWND) -> Option<&'a mut WindowData> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowData;
    ptr.as_mut()
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `GlanceError`.
///
/// Call immediately after a Win32 function that signals failure — `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> GlanceError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    GlanceError::Win32 {
        function,
        code: code.0,
    }
}
