// ── Central error type ────────────────────────────────────────────────────────
//
// Only the window layer can fail. Input acquisition has no error path: an
// unreadable stdin is treated the same as an empty one.

use thiserror::Error;

/// Every error that Glance can produce.
#[derive(Debug, Error)]
pub enum GlanceError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// There is no window backend for the OS this binary was built for.
    #[cfg_attr(windows, allow(dead_code))]
    #[error("no window backend for {os}; glance presents its window on Windows only")]
    UnsupportedPlatform { os: &'static str },
}

// Convert a windows-crate error (HRESULT) directly into a GlanceError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for GlanceError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GlanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_error_shows_function_and_hex_code() {
        let e = GlanceError::Win32 {
            function: "CreateWindowExW",
            code: 0x8007_0057,
        };
        assert_eq!(e.to_string(), "CreateWindowExW failed (error 0x80070057)");
    }

    #[test]
    fn unsupported_platform_names_the_os() {
        let e = GlanceError::UnsupportedPlatform { os: "linux" };
        assert!(e.to_string().contains("linux"));
    }
}
