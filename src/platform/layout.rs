// ── Window geometry & text encoding helpers ───────────────────────────────────
//
// Pure arithmetic used by the Win32 layer.  No FFI here, so it builds and is
// tested on every target.

#![cfg_attr(not(windows), allow(dead_code))]

/// Logical units are 96-DPI pixels.
pub(crate) const BASE_DPI: u32 = 96;

/// Scale a pixel value defined at 96 DPI to `dpi`.
pub(crate) fn scale(px: i32, dpi: u32) -> i32 {
    px * dpi as i32 / BASE_DPI as i32
}

/// Character height in device pixels for a `points` font at `dpi`.
///
/// Win32 fonts take a negative height to mean "character height"; the caller
/// negates.
pub(crate) fn font_height(points: i32, dpi: u32) -> i32 {
    // Round to nearest, like MulDiv.
    (points * dpi as i32 + 36) / 72
}

/// An axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Bounds {
    /// Top-left corner that centres a `width` × `height` box inside `self`.
    ///
    /// A box larger than the area is pinned to the area's top-left so the
    /// title bar stays reachable.
    pub(crate) fn center(&self, width: i32, height: i32) -> (i32, i32) {
        let x = self.x + ((self.width - width) / 2).max(0);
        let y = self.y + ((self.height - height) / 2).max(0);
        (x, y)
    }

    /// `self` shrunk by `pad` on every side.  Never yields a negative size.
    pub(crate) fn inset(&self, pad: i32) -> Bounds {
        let pad_x = pad.min(self.width / 2);
        let pad_y = pad.min(self.height / 2);
        Bounds {
            x: self.x + pad_x,
            y: self.y + pad_y,
            width: self.width - 2 * pad_x,
            height: self.height - 2 * pad_y,
        }
    }
}

/// Rewrite bare `\n` line feeds as `\r\n`, the only line break a Win32 EDIT
/// control renders.  Existing `\r\n` pairs are left alone.
pub(crate) fn to_crlf(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut prev = '\0';
    for c in text.chars() {
        if c == '\n' && prev != '\r' {
            out.push('\r');
        }
        out.push(c);
        prev = c;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_identity_at_base_dpi() {
        assert_eq!(scale(520, BASE_DPI), 520);
        assert_eq!(scale(12, BASE_DPI), 12);
    }

    #[test]
    fn scale_doubles_at_200_percent() {
        assert_eq!(scale(520, 192), 1040);
        assert_eq!(scale(300, 144), 450);
    }

    #[test]
    fn eleven_points_is_about_fifteen_pixels() {
        assert_eq!(font_height(11, 96), 15);
        assert_eq!(font_height(11, 192), 29);
    }

    #[test]
    fn center_in_work_area() {
        let area = Bounds { x: 0, y: 40, width: 1920, height: 1040 };
        assert_eq!(area.center(520, 300), (700, 410));
    }

    #[test]
    fn oversized_box_pins_to_top_left() {
        let area = Bounds { x: 10, y: 20, width: 400, height: 200 };
        assert_eq!(area.center(520, 300), (10, 20));
    }

    #[test]
    fn inset_shrinks_every_side() {
        let r = Bounds { x: 0, y: 0, width: 500, height: 280 };
        assert_eq!(r.inset(12), Bounds { x: 12, y: 12, width: 476, height: 256 });
    }

    #[test]
    fn inset_never_goes_negative() {
        let r = Bounds { x: 0, y: 0, width: 10, height: 4 };
        let i = r.inset(12);
        assert!(i.width >= 0 && i.height >= 0);
    }

    #[test]
    fn crlf_conversion() {
        assert_eq!(to_crlf("foo\nbar"), "foo\r\nbar");
        assert_eq!(to_crlf("a\r\nb\n\nc"), "a\r\nb\r\n\r\nc");
        assert_eq!(to_crlf("no breaks"), "no breaks");
        assert_eq!(to_crlf("翻譯\n結果"), "翻譯\r\n結果");
    }
}
