// ── Fallback for targets without a window backend ─────────────────────────────

use crate::error::{GlanceError, Result};
use crate::input::DisplayText;

pub(crate) fn run(text: DisplayText) -> Result<()> {
    tracing::error!(len = text.len(), "cannot present text: no window backend");
    Err(GlanceError::UnsupportedPlatform {
        os: std::env::consts::OS,
    })
}

/// Without a GUI, stderr is the only place left to report a fatal error.
pub(crate) fn show_error_dialog(message: &str) {
    eprintln!("glance: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_the_host_os() {
        let text = DisplayText::new("hello").unwrap();
        match run(text) {
            Err(GlanceError::UnsupportedPlatform { os }) => assert_eq!(os, std::env::consts::OS),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
