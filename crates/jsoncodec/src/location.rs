use core::fmt;

/// A position in the input, as reported by tokenizers and carried by parse
/// errors.
///
/// Byte-based tokenizers know byte offsets but not character offsets;
/// character-based tokenizers know character offsets but not byte offsets.
/// Line and column are always tracked and are 1-based. The column counts
/// bytes for byte input and characters for character input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub byte_offset: Option<u64>,
    pub char_offset: Option<u64>,
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Location at the very start of a byte stream.
    pub const BYTES_START: Location = Location {
        byte_offset: Some(0),
        char_offset: None,
        line: 1,
        column: 1,
    };

    /// Location at the very start of a character stream.
    pub const CHARS_START: Location = Location {
        byte_offset: None,
        char_offset: Some(0),
        line: 1,
        column: 1,
    };

    pub(crate) fn in_bytes(offset: u64, line: u32, column: u32) -> Self {
        Self {
            byte_offset: Some(offset),
            char_offset: None,
            line,
            column,
        }
    }

    pub(crate) fn in_chars(offset: u64, line: u32, column: u32) -> Self {
        Self {
            byte_offset: None,
            char_offset: Some(offset),
            line,
            column,
        }
    }

    /// The offset into the input, in whatever unit the tokenizer reads.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.byte_offset.or(self.char_offset).unwrap_or(0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)?;
        match (self.byte_offset, self.char_offset) {
            (Some(b), _) => write!(f, " (byte offset {b})"),
            (None, Some(c)) => write!(f, " (char offset {c})"),
            (None, None) => Ok(()),
        }
    }
}
