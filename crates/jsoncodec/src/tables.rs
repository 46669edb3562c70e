//! Static character-class tables.
//!
//! Every table is computed by a `const fn` at compile time and never mutated.
//! Tokenizers index them with raw input bytes (or `char`s below 0x80) to decide
//! in one lookup whether a byte may be copied verbatim, whether it starts a
//! multi-byte UTF-8 sequence, whether it may appear in an unquoted field name
//! and, on the output side, which escape sequence a byte needs.

/// Per-byte codes for string content in character input.
///
/// `0` means the byte can be copied as-is. Control characters map to `-1`;
/// `"` and `\` map to themselves. Any nonzero entry ends a fast copy loop.
pub static INPUT_CODES: [i8; 256] = build_input_codes(false);

/// Per-byte codes for string content in UTF-8 input.
///
/// Like [`INPUT_CODES`], but bytes at or above 0x80 map to the total length
/// of the UTF-8 sequence they start (2, 3 or 4), or `-1` when they cannot
/// start a sequence (continuation bytes, overlong leads, bytes above 0xF4).
pub static INPUT_CODES_UTF8: [i8; 256] = build_input_codes(true);

/// `0` for bytes allowed in unquoted field names, `-1` otherwise.
///
/// Allowed: ASCII letters and digits, `_`, `$` and every byte at or above
/// 0x80 (non-ASCII characters are accepted wholesale).
pub static NAME_CODES: [i8; 256] = build_name_codes();

/// Output escape for each ASCII byte.
///
/// `0` when no escaping is needed, `-1` for the generic `\u00XX` form,
/// otherwise the character that follows the backslash (`b`, `t`, `n`, `f`,
/// `r`, `"` or `\`).
pub static OUTPUT_ESCAPES: [i8; 128] = build_output_escapes();

/// Value of each hex digit, `-1` for everything else.
pub static HEX_VALUES: [i8; 256] = build_hex_values();

/// Upper-case hex digits used when writing `\uXXXX`.
pub static HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";

const fn build_input_codes(utf8: bool) -> [i8; 256] {
    let mut table = [0i8; 256];
    let mut i = 0;
    while i < 0x20 {
        table[i] = -1;
        i += 1;
    }
    table[b'"' as usize] = b'"' as i8;
    table[b'\\' as usize] = b'\\' as i8;
    if utf8 {
        let mut b = 0x80;
        while b < 256 {
            table[b] = match b {
                0xC2..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF4 => 4,
                _ => -1,
            };
            b += 1;
        }
    }
    table
}

const fn build_name_codes() -> [i8; 256] {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80 {
            table[i] = 0;
        }
        i += 1;
    }
    table
}

const fn build_output_escapes() -> [i8; 128] {
    let mut table = [0i8; 128];
    let mut i = 0;
    while i < 0x20 {
        table[i] = -1;
        i += 1;
    }
    table[0x08] = b'b' as i8;
    table[0x09] = b't' as i8;
    table[0x0A] = b'n' as i8;
    table[0x0C] = b'f' as i8;
    table[0x0D] = b'r' as i8;
    table[b'"' as usize] = b'"' as i8;
    table[b'\\' as usize] = b'\\' as i8;
    table
}

const fn build_hex_values() -> [i8; 256] {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as i8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as i8;
        table[b'A' as usize + i] = 10 + i as i8;
        i += 1;
    }
    table
}

/// What the generator must write for one byte of string content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    /// Backslash followed by this character.
    Named(u8),
    /// `\u00XX`.
    Unicode,
}

/// Whether `b` must be escaped inside a quoted string.
#[inline]
#[must_use]
pub fn needs_escape(b: u8) -> bool {
    b < 0x80 && OUTPUT_ESCAPES[b as usize] != 0
}

#[inline]
#[must_use]
pub fn escape_for(b: u8) -> Escape {
    if b >= 0x80 {
        return Escape::None;
    }
    match OUTPUT_ESCAPES[b as usize] {
        0 => Escape::None,
        -1 => Escape::Unicode,
        #[expect(clippy::cast_sign_loss)]
        c => Escape::Named(c as u8),
    }
}

/// Hex digit value of a code point, `None` for non-hex input.
#[inline]
#[must_use]
pub fn hex_value(c: u32) -> Option<u32> {
    if c > 0xFF {
        return None;
    }
    match HEX_VALUES[c as usize] {
        -1 => None,
        #[expect(clippy::cast_sign_loss)]
        v => Some(v as u32),
    }
}

/// Total length of the UTF-8 sequence introduced by lead byte `b`, `None` if
/// `b` cannot start a sequence.
#[inline]
#[must_use]
pub fn utf8_sequence_len(b: u8) -> Option<usize> {
    if b < 0x80 {
        return Some(1);
    }
    match INPUT_CODES_UTF8[b as usize] {
        #[expect(clippy::cast_sign_loss)]
        n @ 2..=4 => Some(n as usize),
        _ => None,
    }
}

/// Whether `b` may appear in an unquoted field name.
#[inline]
#[must_use]
pub fn is_name_byte(b: u8) -> bool {
    NAME_CODES[b as usize] == 0
}

/// Writes the six-byte `\u00XX`-style escape for a code unit below 0x10000.
#[inline]
pub(crate) fn unicode_escape(unit: u32) -> [u8; 6] {
    [
        b'\\',
        b'u',
        HEX_CHARS[((unit >> 12) & 0xF) as usize],
        HEX_CHARS[((unit >> 8) & 0xF) as usize],
        HEX_CHARS[((unit >> 4) & 0xF) as usize],
        HEX_CHARS[(unit & 0xF) as usize],
    ]
}
