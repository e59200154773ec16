// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// The window state machine is only driven by the Win32 backend.
#[cfg_attr(not(windows), allow(dead_code))]
mod app;
mod error;
mod input;
mod logging;
mod platform;

fn main() {
    logging::init();

    // Nothing to show is not an error: exit quietly, no window.
    let Some(text) = input::display_text(std::env::args_os().skip(1), std::io::stdin().lock())
    else {
        tracing::debug!("input empty after trimming; exiting");
        return;
    };

    tracing::info!(bytes = text.len(), "presenting text");

    if let Err(e) = platform::run(text) {
        // Startup failed before or during the message loop.
        // Show a modal error dialog — the only safe output path in a GUI app.
        tracing::error!(error = %e, "window failed");
        platform::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}
