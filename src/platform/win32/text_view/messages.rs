// ── EDIT control styles & messages ────────────────────────────────────────────
//
// Source of truth: WinUser.h.  Only the subset the text view uses is listed.
// Messages are sent via SendMessageW(hwnd_edit, EM_*, wparam, lparam).

// ── Styles ────────────────────────────────────────────────────────────────────

/// Multiple lines; without `ES_AUTOHSCROLL` long lines wrap at the edge.
pub(super) const ES_MULTILINE: u32 = 0x0004;
/// Scroll vertically when the caret moves past the last visible line.
pub(super) const ES_AUTOVSCROLL: u32 = 0x0040;
/// Keep the selection highlighted when focus moves away.
pub(super) const ES_NOHIDESEL: u32 = 0x0100;
/// Selectable but not editable.
pub(super) const ES_READONLY: u32 = 0x0800;

// ── Messages ──────────────────────────────────────────────────────────────────

/// Set the selection.  WPARAM=start; LPARAM=end.
pub(super) const EM_SETSEL: u32 = 0x00B1;
/// Set the formatting rectangle.  WPARAM=0; LPARAM=*const RECT.
pub(super) const EM_SETRECT: u32 = 0x00B3;
/// Set the text limit in characters.  WPARAM=0 means the maximum.
pub(super) const EM_SETLIMITTEXT: u32 = 0x00C5;
