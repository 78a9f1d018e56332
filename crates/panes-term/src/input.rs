// SPDX-License-Identifier: MIT
//
// Key decoding — one terminal read in, one key out.
//
// The reader hands us the bytes of a single `read()` (possibly padded with
// trailing zeros from a fixed-size buffer). We classify them as exactly
// one of:
//
//   - a printable character          → Key { rune, control: false }
//   - a single Ctrl+<key> byte        → Key { rune: byte + 64, control: true }
//   - anything else                   → Key::NONE
//
// Ctrl+<letter> arrives as `letter - 64` (Ctrl+C is 0x03), so adding 64
// back recovers the letter the user held Ctrl with.
//
// Escape-prefixed sequences (arrows, function keys, Alt+key) are not
// decoded yet. They map to `Key::NONE` rather than being misread as a
// Ctrl combination. Decoding never fails.

/// ESC, the first byte of every escape sequence.
const ESC: u8 = 0x1b;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// The character, or for control combinations the letter held with Ctrl.
    pub rune: char,
    /// Whether Ctrl was held.
    pub control: bool,
}

impl Key {
    /// Sentinel for input that does not decode to a key.
    pub const NONE: Self = Self {
        rune: '\0',
        control: false,
    };

    /// Synthetic control key used to force a redraw. No binding can match
    /// it because a decoded control rune is never NUL.
    pub const REDRAW: Self = Self {
        rune: '\0',
        control: true,
    };

    /// A printable key.
    #[inline]
    #[must_use]
    pub const fn char(rune: char) -> Self {
        Self {
            rune,
            control: false,
        }
    }

    /// Ctrl held with `rune` (the letter, not the raw control byte).
    #[inline]
    #[must_use]
    pub const fn ctrl(rune: char) -> Self {
        Self {
            rune,
            control: true,
        }
    }

    /// Whether this is the undecodable sentinel.
    #[inline]
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Decode the bytes of one terminal read.
///
/// ```
/// use panes_term::input::{decode, Key};
///
/// assert_eq!(decode(&[65, 0, 0, 0]), Key::char('A'));
/// assert_eq!(decode(&[3, 0, 0, 0]), Key::ctrl('C'));
/// assert_eq!(decode(b"\x1b[A"), Key::NONE);
/// ```
#[must_use]
pub fn decode(buf: &[u8]) -> Key {
    let bytes = trim_padding(buf);

    match bytes {
        [] | [ESC, ..] => Key::NONE,
        [byte] if byte.is_ascii_control() => control_key(*byte),
        _ => match std::str::from_utf8(bytes) {
            Ok(text) => single_char(text).map_or(Key::NONE, printable_key),
            Err(_) => Key::NONE,
        },
    }
}

/// Strip trailing zero padding, keeping at least the first byte (a lone
/// NUL is Ctrl+@).
fn trim_padding(buf: &[u8]) -> &[u8] {
    match buf.iter().rposition(|&b| b != 0) {
        Some(last) => &buf[..=last],
        None => &buf[..buf.len().min(1)],
    }
}

fn control_key(byte: u8) -> Key {
    let rune = char::from_u32(u32::from(byte) + 64).unwrap_or('\0');
    Key::ctrl(rune)
}

fn printable_key(c: char) -> Key {
    if is_graphic(c) {
        Key::char(c)
    } else if c.is_control() {
        // C1 controls (U+0080..U+009F) arrive as two UTF-8 bytes.
        char::from_u32(u32::from(c) + 64).map_or(Key::NONE, Key::ctrl)
    } else {
        Key::NONE
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Visible characters plus the space; other whitespace and controls are not
/// graphic.
fn is_graphic(c: char) -> bool {
    !c.is_control() && (c == ' ' || !c.is_whitespace())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(bytes: &[u8]) -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        buf
    }

    // ── Printable ─────────────────────────────────────────────────

    #[test]
    fn ascii_letter() {
        assert_eq!(decode(&padded(b"A")), Key::char('A'));
    }

    #[test]
    fn lowercase_and_digits() {
        assert_eq!(decode(&padded(b"z")), Key::char('z'));
        assert_eq!(decode(&padded(b"7")), Key::char('7'));
    }

    #[test]
    fn space_is_printable() {
        assert_eq!(decode(&padded(b" ")), Key::char(' '));
    }

    #[test]
    fn multibyte_utf8() {
        assert_eq!(decode(&padded("é".as_bytes())), Key::char('é'));
        assert_eq!(decode(&padded("界".as_bytes())), Key::char('界'));
    }

    #[test]
    fn unpadded_slice() {
        assert_eq!(decode(b"q"), Key::char('q'));
    }

    // ── Control combinations ──────────────────────────────────────

    #[test]
    fn ctrl_c() {
        assert_eq!(decode(&padded(&[3])), Key::ctrl('C'));
    }

    #[test]
    fn ctrl_q() {
        assert_eq!(decode(&padded(&[17])), Key::ctrl('Q'));
    }

    #[test]
    fn enter_is_ctrl_m() {
        assert_eq!(decode(&padded(b"\r")), Key::ctrl('M'));
    }

    #[test]
    fn tab_is_ctrl_i() {
        assert_eq!(decode(&padded(b"\t")), Key::ctrl('I'));
    }

    #[test]
    fn backspace_is_ctrl_h() {
        assert_eq!(decode(&padded(&[8])), Key::ctrl('H'));
    }

    #[test]
    fn ctrl_close_bracket() {
        assert_eq!(decode(&padded(&[29])), Key::ctrl(']'));
    }

    #[test]
    fn nul_is_ctrl_at() {
        assert_eq!(decode(&[0u8; 8]), Key::ctrl('@'));
    }

    #[test]
    fn delete_shifts_like_other_controls() {
        assert_eq!(decode(&padded(&[0x7f])), Key::ctrl('\u{bf}'));
    }

    // ── Sentinel ──────────────────────────────────────────────────

    #[test]
    fn lone_escape_is_none() {
        assert_eq!(decode(&padded(&[ESC])), Key::NONE);
    }

    #[test]
    fn escape_sequences_are_none() {
        assert_eq!(decode(&padded(b"\x1b[A")), Key::NONE);
        assert_eq!(decode(&padded(b"\x1bOP")), Key::NONE);
        assert_eq!(decode(&padded(b"\x1bx")), Key::NONE);
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(decode(&[]), Key::NONE);
    }

    #[test]
    fn invalid_utf8_is_none() {
        assert_eq!(decode(&padded(&[0xff, 0xfe])), Key::NONE);
    }

    #[test]
    fn several_characters_are_none() {
        assert_eq!(decode(&padded(b"ab")), Key::NONE);
    }

    #[test]
    fn interior_nul_is_none() {
        assert_eq!(decode(&[b'a', 0, b'b', 0]), Key::NONE);
    }

    #[test]
    fn none_helpers() {
        assert!(Key::NONE.is_none());
        assert!(!Key::REDRAW.is_none());
        assert!(!Key::char('a').is_none());
    }
}
