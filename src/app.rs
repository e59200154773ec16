// ── Application lifecycle & top-level state ────────────────────────────────────
//
// A single `AppState` is created on startup and handed to the window through
// its creation parameter; the window procedure owns it until the window is
// destroyed.  All mutations happen on the UI thread — there is no global
// mutable state.

use crate::input::DisplayText;

/// Title bar text.
pub(crate) const WINDOW_TITLE: &str = "Translation Result";

/// Client-area size in logical units (96-DPI pixels).
pub(crate) const WINDOW_WIDTH: i32 = 520;
pub(crate) const WINDOW_HEIGHT: i32 = 300;

/// Padding between the text and the edge of the text area, in logical units.
pub(crate) const TEXT_PADDING: i32 = 12;

/// Reading font size in points.
pub(crate) const FONT_POINTS: i32 = 11;

/// Virtual-key code of the Escape key.
const VK_ESCAPE: usize = 0x1B;

/// `WM_KEYDOWN` message id.
const WM_KEYDOWN: u32 = 0x0100;

// ── WindowState ───────────────────────────────────────────────────────────────

/// The window lifecycle.  There is no way back from `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowState {
    Open,
    Closed,
}

/// What closed the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dismissal {
    /// Escape pressed while the application had focus.
    EscapeKey,
    /// The title-bar close button, Alt+F4, or anything else that sends
    /// `WM_CLOSE`.
    CloseControl,
}

// ── AppState ──────────────────────────────────────────────────────────────────

/// Top-level application state.
#[derive(Debug)]
pub(crate) struct AppState {
    text: DisplayText,
    window: WindowState,
}

impl AppState {
    /// State for a window that is about to be shown with `text`.
    pub(crate) fn new(text: DisplayText) -> Self {
        Self {
            text,
            window: WindowState::Open,
        }
    }

    pub(crate) fn text(&self) -> &DisplayText {
        &self.text
    }

    pub(crate) fn window_state(&self) -> WindowState {
        self.window
    }

    /// Move to `Closed`.
    ///
    /// Returns `true` only for the transition itself; later triggers (the
    /// `WM_CLOSE` that follows an Escape, say) are no-ops and return `false`.
    pub(crate) fn dismiss(&mut self, by: Dismissal) -> bool {
        match self.window {
            WindowState::Open => {
                tracing::info!(?by, "window dismissed");
                self.window = WindowState::Closed;
                true
            }
            WindowState::Closed => false,
        }
    }

    /// Whether destroying the window should end the message loop.
    ///
    /// `presented` is `false` when window creation failed part-way: no loop
    /// is running yet, and a stray WM_QUIT would be picked up by the modal
    /// loop of the fatal-error dialog and close it before it is seen.
    pub(crate) fn quit_on_destroy(&self, presented: bool) -> bool {
        presented || self.window_state() == WindowState::Closed
    }
}

// ── Key filter ────────────────────────────────────────────────────────────────

/// `true` when the queued `message` with `wparam` should dismiss the window.
///
/// Only the key-down of Escape counts; the message loop consumes it instead
/// of dispatching it.
pub(crate) fn is_dismiss_message(message: u32, wparam: usize) -> bool {
    message == WM_KEYDOWN && is_dismiss_key(wparam)
}

fn is_dismiss_key(vk: usize) -> bool {
    vk == VK_ESCAPE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str) -> AppState {
        AppState::new(DisplayText::new(text).unwrap())
    }

    #[test]
    fn starts_open_with_the_text() {
        let app = state("hello world");
        assert_eq!(app.window_state(), WindowState::Open);
        assert_eq!(app.text().as_str(), "hello world");
    }

    #[test]
    fn escape_closes() {
        let mut app = state("x");
        assert!(app.dismiss(Dismissal::EscapeKey));
        assert_eq!(app.window_state(), WindowState::Closed);
    }

    #[test]
    fn close_control_closes_the_same_way() {
        let mut app = state("x");
        assert!(app.dismiss(Dismissal::CloseControl));
        assert_eq!(app.window_state(), WindowState::Closed);
    }

    #[test]
    fn second_dismissal_is_ignored() {
        let mut app = state("x");
        assert!(app.dismiss(Dismissal::EscapeKey));
        assert!(!app.dismiss(Dismissal::CloseControl));
        assert_eq!(app.window_state(), WindowState::Closed);
    }

    #[test]
    fn only_escape_dismisses() {
        assert!(is_dismiss_key(0x1B));
        for vk in [0x0D, 0x20, 0x41, 0x70, 0x2E] {
            assert!(!is_dismiss_key(vk), "vk {vk:#x}");
        }
    }

    #[test]
    fn escape_key_down_is_consumed() {
        assert!(is_dismiss_message(WM_KEYDOWN, VK_ESCAPE));
    }

    #[test]
    fn other_escape_messages_pass_through() {
        const WM_KEYUP: u32 = 0x0101;
        const WM_CHAR: u32 = 0x0102;
        const WM_SYSKEYDOWN: u32 = 0x0104;
        for message in [WM_KEYUP, WM_CHAR, WM_SYSKEYDOWN] {
            assert!(!is_dismiss_message(message, VK_ESCAPE), "msg {message:#x}");
        }
        assert!(!is_dismiss_message(WM_KEYDOWN, 0x41));
    }

    #[test]
    fn failed_create_does_not_quit_on_destroy() {
        let app = state("x");
        assert!(!app.quit_on_destroy(false));
    }

    #[test]
    fn presented_window_quits_on_destroy() {
        let app = state("x");
        assert!(app.quit_on_destroy(true));
    }

    #[test]
    fn dismissed_window_quits_on_destroy() {
        let mut app = state("x");
        app.dismiss(Dismissal::CloseControl);
        assert!(app.quit_on_destroy(false));
    }
}
