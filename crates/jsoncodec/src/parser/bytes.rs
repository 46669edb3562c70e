use std::io::{self, Read};

use super::{
    Parser,
    source::{Input, READ_BUFFER_SIZE, Sealed, decode_utf8, decode_utf8_tail},
};
use crate::{
    error::LimitError,
    location::Location,
    symbols::{ByteNameTable, Name, pack_quads_into},
};

/// Tokenizer over UTF-8 bytes.
pub type ByteParser<R> = Parser<ByteInput<R>>;

/// Buffered UTF-8 byte input with a quad-keyed symbol table.
pub struct ByteInput<R> {
    source: Option<R>,
    buf: Box<[u8]>,
    pos: usize,
    end: usize,
    names: ByteNameTable,
    quads: Vec<u32>,
}

impl<R: Read> ByteInput<R> {
    pub(crate) fn new(source: R, names: ByteNameTable) -> Self {
        Self {
            source: Some(source),
            buf: vec![0; READ_BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            end: 0,
            names,
            quads: Vec::with_capacity(8),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };
        let n = loop {
            match source.read(&mut self.buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        };
        self.pos = 0;
        self.end = n;
        Ok(n > 0)
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos == self.end && !self.fill()? {
            return Ok(None);
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }
}

impl<R> Sealed for ByteInput<R> {}

impl<R: Read> Input for ByteInput<R> {
    fn location(offset: u64, line: u32, column: u32) -> Location {
        Location::in_bytes(offset, line, column)
    }

    #[inline]
    fn peek(&mut self) -> io::Result<Option<u32>> {
        if self.pos == self.end && !self.fill()? {
            return Ok(None);
        }
        Ok(Some(u32::from(self.buf[self.pos])))
    }

    #[inline]
    fn bump(&mut self) {
        debug_assert!(self.pos < self.end);
        self.pos += 1;
    }

    fn finish_char(&mut self, first: u32) -> io::Result<(char, usize)> {
        let lead = u8::try_from(first).unwrap_or(0xFF);
        let mut bytes = [lead, 0, 0, 0];
        let len = decode_utf8_tail(lead, &mut bytes, || self.next_byte())?;
        Ok((decode_utf8(&bytes[..len])?, len - 1))
    }

    fn intern(&mut self, text: &str) -> Result<Name, LimitError> {
        self.quads.clear();
        pack_quads_into(text.as_bytes(), &mut self.quads);
        let found = match *self.quads.as_slice() {
            [q1] => self.names.find_name1(q1, text.len()),
            [q1, q2] => self.names.find_name2(q1, q2, text.len()),
            [q1, q2, q3] => self.names.find_name3(q1, q2, q3, text.len()),
            ref quads => self.names.find_name(quads, text.len()),
        };
        match found {
            Some(name) => Ok(name),
            None => self.names.add_name(text, &self.quads),
        }
    }

    fn release(&mut self) {
        self.names.release();
        self.source = None;
        self.pos = 0;
        self.end = 0;
    }
}
