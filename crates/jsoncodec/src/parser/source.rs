//! Input abstractions for the tokenizers.

use std::io::{self, Read};

use crate::{
    error::{LimitError, SyntaxError},
    location::Location,
    symbols::Name,
};

/// Size of the read buffers used by byte input and [`Utf8Reader`].
pub(crate) const READ_BUFFER_SIZE: usize = 8000;

/// Wraps a malformed-input condition found while reading so that it can travel
/// through `io::Result` and be reported as a syntax error with a location.
pub(crate) fn malformed(kind: SyntaxError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, kind)
}

/// A stream of characters for [`CharParser`](crate::CharParser).
pub trait CharSource {
    /// Reads the next character, `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// I/O failures of the underlying reader. Undecodable input is reported
    /// as [`io::ErrorKind::InvalidData`] carrying a [`SyntaxError`].
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: core::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Decodes UTF-8 incrementally from a reader.
#[derive(Debug)]
pub struct Utf8Reader<R> {
    reader: R,
    buf: Box<[u8]>,
    pos: usize,
    end: usize,
}

impl<R: Read> Utf8Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; READ_BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            end: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos == self.end {
            self.end = loop {
                match self.reader.read(&mut self.buf) {
                    Ok(n) => break n,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(err),
                }
            };
            self.pos = 0;
            if self.end == 0 {
                return Ok(None);
            }
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }
}

impl<R: Read> CharSource for Utf8Reader<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        if lead < 0x80 {
            return Ok(Some(char::from(lead)));
        }
        let mut bytes = [lead, 0, 0, 0];
        let len = decode_utf8_tail(lead, &mut bytes, || self.next_byte())?;
        Ok(Some(decode_utf8(&bytes[..len])?))
    }
}

/// Reads the continuation bytes of the sequence started by `lead` into
/// `bytes[1..]`, returning the sequence length.
pub(crate) fn decode_utf8_tail(
    lead: u8,
    bytes: &mut [u8; 4],
    mut next: impl FnMut() -> io::Result<Option<u8>>,
) -> io::Result<usize> {
    let len = crate::tables::utf8_sequence_len(lead)
        .ok_or_else(|| malformed(SyntaxError::InvalidUtf8Start(lead)))?;
    for slot in &mut bytes[1..len] {
        let b = next()?.ok_or_else(|| malformed(SyntaxError::UnexpectedEndOfInput))?;
        if b & 0xC0 != 0x80 {
            return Err(malformed(SyntaxError::InvalidUtf8Middle(b)));
        }
        *slot = b;
    }
    Ok(len)
}

/// Validates a complete sequence, rejecting overlong forms and surrogates.
pub(crate) fn decode_utf8(bytes: &[u8]) -> io::Result<char> {
    core::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or_else(|| malformed(SyntaxError::InvalidUtf8Middle(bytes[1])))
}

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// The input side of a [`Parser`](super::Parser): a stream of code units
/// (bytes or characters) plus the symbol table that canonicalizes field
/// names read from it.
///
/// Implemented by [`ByteInput`](super::ByteInput) and
/// [`CharInput`](super::CharInput).
pub trait Input: sealed::Sealed {
    /// Builds a location in this input's unit.
    fn location(offset: u64, line: u32, column: u32) -> Location;

    /// The next code unit without consuming it.
    ///
    /// # Errors
    ///
    /// I/O failures, and undecodable input as described on [`CharSource`].
    fn peek(&mut self) -> io::Result<Option<u32>>;

    /// Consumes the unit returned by the last `peek`.
    fn bump(&mut self);

    /// Completes a non-ASCII character whose first unit was just consumed.
    /// Returns the character and how many further units were consumed.
    ///
    /// # Errors
    ///
    /// As for [`Input::peek`].
    fn finish_char(&mut self, first: u32) -> io::Result<(char, usize)>;

    /// Canonicalizes a decoded field name.
    ///
    /// # Errors
    ///
    /// Symbol table limits.
    fn intern(&mut self, text: &str) -> Result<Name, LimitError>;

    /// Releases the symbol table and the underlying source. Idempotent.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> io::Result<String> {
        let mut reader = Utf8Reader::new(bytes);
        let mut out = String::new();
        while let Some(c) = reader.next_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn utf8_reader_decodes_multibyte() {
        assert_eq!(decode_all("aé€😀".as_bytes()).unwrap(), "aé€😀");
    }

    #[test]
    fn utf8_reader_reports_malformed_input() {
        let err = decode_all(b"a\x80").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let kind = err.get_ref().and_then(|e| e.downcast_ref::<SyntaxError>());
        assert_eq!(kind, Some(&SyntaxError::InvalidUtf8Start(0x80)));

        let err = decode_all(b"\xC3(").unwrap_err();
        let kind = err.get_ref().and_then(|e| e.downcast_ref::<SyntaxError>());
        assert_eq!(kind, Some(&SyntaxError::InvalidUtf8Middle(b'(')));

        // Encoded surrogate.
        assert!(decode_all(b"\xED\xA0\x80").is_err());
    }

    #[test]
    fn str_source() {
        let mut src = StrSource::new("ab");
        assert_eq!(src.next_char().unwrap(), Some('a'));
        assert_eq!(src.next_char().unwrap(), Some('b'));
        assert_eq!(src.next_char().unwrap(), None);
    }
}
