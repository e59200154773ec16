// ── Read-only text view ───────────────────────────────────────────────────────
//
// A multiline EDIT child control: vertical scroll bar, word wrap at the
// control width, selectable, not editable.
//
// ── Ownership model ───────────────────────────────────────────────────────────
//
// `TextView` holds the child `HWND` and the `HFONT` it draws with.  The child
// window is destroyed by Windows as part of parent teardown; the font is ours
// and is deleted on `Drop`.  `TextView` lives in the parent's `WindowData`,
// which is dropped in `WM_NCDESTROY`, after the child is already gone, so
// the font is never deleted while still selected into a live control.

#![allow(unsafe_code)]

mod messages;

use messages::{
    EM_SETLIMITTEXT, EM_SETRECT, EM_SETSEL, ES_AUTOVSCROLL, ES_MULTILINE, ES_NOHIDESEL,
    ES_READONLY,
};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, RECT, TRUE, WPARAM},
        Graphics::Gdi::{CreateFontIndirectW, DeleteObject, HFONT, HGDIOBJ},
        UI::{
            HiDpi::SystemParametersInfoForDpi,
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CreateWindowExW, GetClientRect, MoveWindow, SendMessageW, SetWindowTextW,
                HMENU, NONCLIENTMETRICSW, SPI_GETNONCLIENTMETRICS, WINDOW_EX_STYLE,
                WINDOW_STYLE, WM_SETFONT, WS_CHILD, WS_VISIBLE, WS_VSCROLL,
            },
        },
    },
};

use crate::{
    app::{FONT_POINTS, TEXT_PADDING},
    error::{GlanceError, Result},
    platform::layout::{self, Bounds},
};

/// Built-in window class for edit controls.
const CLASS_NAME: PCWSTR = w!("EDIT");

// ── TextView ──────────────────────────────────────────────────────────────────

/// The read-only text area filling the main window's client area.
pub(crate) struct TextView {
    hwnd: HWND,
    font: HFONT,
    dpi: u32,
}

impl TextView {
    /// Create the text control inside `hwnd_parent`, with zero size.
    ///
    /// The parent's `WM_SIZE` handler calls `fill` to give it its real size.
    pub(crate) fn create(hwnd_parent: HWND, hinstance: HINSTANCE, dpi: u32) -> Result<Self> {
        let style = WS_CHILD
            | WS_VISIBLE
            | WS_VSCROLL
            | WINDOW_STYLE(ES_MULTILINE | ES_AUTOVSCROLL | ES_READONLY | ES_NOHIDESEL);

        // SAFETY: CLASS_NAME is the system EDIT class, always registered.
        // hwnd_parent and hinstance are valid handles from WM_CREATE.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                CLASS_NAME,
                PCWSTR::null(),
                style,
                0, 0, 0, 0,
                hwnd_parent,
                HMENU::default(),
                hinstance,
                None,
            )
        }
        .map_err(|e| GlanceError::Win32 {
            function: "CreateWindowExW (EDIT)",
            code: e.code().0 as u32,
        })?;

        let font = reading_font(dpi)?;
        let view = Self { hwnd, font, dpi };
        view.apply_font();

        // SAFETY: hwnd is a valid EDIT control.  A zero limit lifts the
        // default 32 767-character cap so long input is never cut short.
        unsafe {
            let _ = SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));
        }

        Ok(view)
    }

    /// Replace the displayed text.  Line feeds become CRLF for the control.
    pub(crate) fn set_text(&self, text: &str) -> Result<()> {
        let wide: Vec<u16> = layout::to_crlf(text)
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: hwnd valid; wide is null-terminated UTF-16 that outlives the call.
        unsafe { SetWindowTextW(self.hwnd, PCWSTR(wide.as_ptr())) }.map_err(|e| {
            GlanceError::Win32 {
                function: "SetWindowTextW",
                code: e.code().0 as u32,
            }
        })?;

        // SAFETY: hwnd valid.  Collapse the selection to the start so the
        // text does not appear pre-selected when the control takes focus.
        unsafe {
            let _ = SendMessageW(self.hwnd, EM_SETSEL, WPARAM(0), LPARAM(0));
        }
        Ok(())
    }

    /// Resize to cover a `width` × `height` parent client area and re-apply
    /// the text padding.
    pub(crate) fn fill(&self, width: i32, height: i32) {
        // SAFETY: hwnd valid.  MoveWindow failure leaves the old size, which
        // is still usable.
        unsafe {
            let _ = MoveWindow(self.hwnd, 0, 0, width, height, TRUE);
        }
        self.apply_padding();
    }

    /// Rebuild the font for a new monitor DPI.
    pub(crate) fn set_dpi(&mut self, dpi: u32) -> Result<()> {
        if dpi == self.dpi {
            return Ok(());
        }
        let font = reading_font(dpi)?;
        let old = std::mem::replace(&mut self.font, font);
        self.dpi = dpi;
        self.apply_font();
        delete_font(old);
        Ok(())
    }

    /// Give the control keyboard focus.
    pub(crate) fn focus(&self) {
        // SAFETY: hwnd valid and owned by this thread.
        if unsafe { SetFocus(self.hwnd) }.is_err() {
            tracing::debug!("SetFocus on text view failed");
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn apply_font(&self) {
        // SAFETY: hwnd valid; font is a live HFONT owned by self.
        // LPARAM(1) asks the control to redraw.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                WM_SETFONT,
                WPARAM(self.font.0 as usize),
                LPARAM(1),
            );
        }
        self.apply_padding();
    }

    /// Inset the formatting rectangle.  The control resets it on every
    /// resize and font change, so this follows both.
    fn apply_padding(&self) {
        let mut client = RECT::default();
        // SAFETY: hwnd valid; client is a valid out-pointer.
        if unsafe { GetClientRect(self.hwnd, &mut client) }.is_err() {
            return;
        }

        let inner = Bounds {
            x: client.left,
            y: client.top,
            width: client.right - client.left,
            height: client.bottom - client.top,
        }
        .inset(layout::scale(TEXT_PADDING, self.dpi));

        let rect = RECT {
            left: inner.x,
            top: inner.y,
            right: inner.x + inner.width,
            bottom: inner.y + inner.height,
        };

        // SAFETY: hwnd valid; &rect outlives the synchronous SendMessageW call.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_SETRECT,
                WPARAM(0),
                LPARAM(&rect as *const RECT as isize),
            );
        }
    }
}

impl Drop for TextView {
    fn drop(&mut self) {
        delete_font(self.font);
    }
}

// ── Font helpers ──────────────────────────────────────────────────────────────

/// The system message font at `FONT_POINTS`, sized for `dpi`.
fn reading_font(dpi: u32) -> Result<HFONT> {
    let mut metrics = NONCLIENTMETRICSW {
        // NONCLIENTMETRICSW is ~500 bytes; the cast to u32 is always lossless.
        cbSize: std::mem::size_of::<NONCLIENTMETRICSW>() as u32,
        ..Default::default()
    };

    // SAFETY: metrics is a correctly sized NONCLIENTMETRICSW with cbSize set;
    // the pointer is valid for the duration of the call.
    unsafe {
        SystemParametersInfoForDpi(
            SPI_GETNONCLIENTMETRICS.0,
            metrics.cbSize,
            Some(&mut metrics as *mut NONCLIENTMETRICSW as *mut _),
            0,
            dpi,
        )
    }
    .map_err(|e| GlanceError::Win32 {
        function: "SystemParametersInfoForDpi",
        code: e.code().0 as u32,
    })?;

    let mut logfont = metrics.lfMessageFont;
    logfont.lfHeight = -layout::font_height(FONT_POINTS, dpi);

    // SAFETY: logfont is a fully initialised LOGFONTW copied from the system.
    let font = unsafe { CreateFontIndirectW(&logfont) };
    if font.is_invalid() {
        // SAFETY: GetLastError reads thread-local state set by the just-
        // failed CreateFontIndirectW; no Win32 calls between them.
        let code = unsafe { GetLastError().0 };
        return Err(GlanceError::Win32 { function: "CreateFontIndirectW", code });
    }

    Ok(font)
}

fn delete_font(font: HFONT) {
    // SAFETY: font was created by CreateFontIndirectW and is no longer
    // selected into any live control.
    unsafe {
        let _ = DeleteObject(HGDIOBJ(font.0));
    }
}
