// ── Input acquisition & normalisation ─────────────────────────────────────────
//
// The text comes from exactly one place: the command-line arguments when any
// are given, otherwise the whole of stdin.  Both paths end in `DisplayText`,
// which only exists for non-empty trimmed text.

use std::ffi::OsString;
use std::io::Read;

/// The normalised text shown in the window.
///
/// Leading and trailing whitespace (including newlines) is stripped; the
/// interior is left exactly as received.  A `DisplayText` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DisplayText(String);

impl DisplayText {
    /// Trim `raw` and wrap it, or return `None` when nothing is left to show.
    pub(crate) fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Build the raw (untrimmed) text.
///
/// `args` excludes the program name.  When it is empty, `stdin` is read to
/// end-of-stream; otherwise `stdin` is never touched.
pub(crate) fn acquire<I, R>(args: I, stdin: R) -> String
where
    I: IntoIterator<Item = OsString>,
    R: Read,
{
    let args: Vec<String> = args
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    if args.is_empty() {
        tracing::debug!("no arguments; reading stdin");
        read_all(stdin)
    } else {
        tracing::debug!(count = args.len(), "using command-line arguments");
        args.join(" ")
    }
}

/// Read `reader` to end-of-stream.
///
/// A read error ends the stream early: whatever arrived before it is kept.
/// Bytes that are not UTF-8 are replaced rather than rejected.
fn read_all<R: Read>(mut reader: R) -> String {
    let mut buf = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buf) {
        tracing::warn!(error = %e, read = buf.len(), "stdin read failed; using what was read");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// The full startup decision: acquire, then normalise.
///
/// `None` means "nothing to show" and the caller exits without a window.
pub(crate) fn display_text<I, R>(args: I, stdin: R) -> Option<DisplayText>
where
    I: IntoIterator<Item = OsString>,
    R: Read,
{
    DisplayText::new(&acquire(args, stdin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    /// A reader that must never be read; proves args short-circuit stdin.
    struct Untouched;

    impl Read for Untouched {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            panic!("stdin read although arguments were given");
        }
    }

    /// Yields `data`, then fails instead of reporting end-of-stream.
    struct FailsAfter(Vec<u8>);

    impl Read for FailsAfter {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
            }
            let n = out.len().min(self.0.len());
            out[..n].copy_from_slice(&self.0[..n]);
            self.0.drain(..n);
            Ok(n)
        }
    }

    #[test]
    fn arguments_are_joined_with_single_spaces() {
        let text = display_text(os(&["hello", "world"]), Untouched).unwrap();
        assert_eq!(text.as_str(), "hello world");
    }

    #[test]
    fn joined_arguments_are_trimmed_but_inner_spacing_kept() {
        let text = display_text(os(&["  a", "b  c", "\n"]), Untouched).unwrap();
        assert_eq!(text.as_str(), "a b  c");
    }

    #[test]
    fn single_argument_is_used_verbatim() {
        let text = display_text(os(&["--not-a-flag"]), Untouched).unwrap();
        assert_eq!(text.as_str(), "--not-a-flag");
    }

    #[test]
    fn whitespace_only_arguments_yield_nothing() {
        assert!(display_text(os(&[" ", "\t", ""]), Untouched).is_none());
    }

    #[test]
    fn stdin_is_trimmed_and_keeps_inner_newlines() {
        let text = display_text(os(&[]), Cursor::new("  foo\nbar  \n")).unwrap();
        assert_eq!(text.as_str(), "foo\nbar");
    }

    #[test]
    fn stdin_keeps_blank_lines_and_crlf_inside() {
        let text = display_text(os(&[]), Cursor::new("\r\n one\r\n\r\ntwo \r\n")).unwrap();
        assert_eq!(text.as_str(), "one\r\n\r\ntwo");
    }

    #[test]
    fn stdin_without_trailing_newline() {
        let text = display_text(os(&[]), Cursor::new("last line")).unwrap();
        assert_eq!(text.as_str(), "last line");
    }

    #[test]
    fn empty_stdin_yields_nothing() {
        assert!(display_text(os(&[]), Cursor::new("")).is_none());
    }

    #[test]
    fn whitespace_only_stdin_yields_nothing() {
        assert!(display_text(os(&[]), Cursor::new(" \n\t\r\n  \n")).is_none());
    }

    #[test]
    fn unicode_whitespace_is_trimmed() {
        let text = display_text(os(&[]), Cursor::new("\u{3000}翻譯\u{a0}\n")).unwrap();
        assert_eq!(text.as_str(), "翻譯");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_dropped() {
        let text = display_text(os(&[]), Cursor::new(b"ok \xff end\n".to_vec())).unwrap();
        assert_eq!(text.as_str(), "ok \u{fffd} end");
    }

    #[test]
    fn read_error_keeps_what_arrived() {
        let text = display_text(os(&[]), FailsAfter(b" partial\n".to_vec())).unwrap();
        assert_eq!(text.as_str(), "partial");
    }

    #[test]
    fn immediate_read_error_is_empty_input() {
        assert!(display_text(os(&[]), FailsAfter(Vec::new())).is_none());
    }

    #[test]
    fn long_text_is_not_truncated() {
        let body = "x".repeat(200_000);
        let text = display_text(os(&[]), Cursor::new(format!("\n{body}\n"))).unwrap();
        assert_eq!(text.len(), 200_000);
    }
}
