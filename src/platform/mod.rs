// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the rest of the codebase uses to put a
// window on screen.  No `unsafe` lives here; all Win32 FFI is confined to the
// `win32` sub-module and never leaks outward.

pub(crate) mod layout;

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub(crate) use win32::window::{run, show_error_dialog};

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub(crate) use unsupported::{run, show_error_dialog};
