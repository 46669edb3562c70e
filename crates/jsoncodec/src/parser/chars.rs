use std::io;

use super::{
    Parser,
    source::{CharSource, Input, Sealed},
};
use crate::{
    error::LimitError,
    location::Location,
    symbols::{CharNameTable, Name},
};

/// Tokenizer over characters.
pub type CharParser<S> = Parser<CharInput<S>>;

/// Character input with a char-keyed symbol table.
pub struct CharInput<S> {
    source: Option<S>,
    peeked: Option<char>,
    names: CharNameTable,
}

impl<S: CharSource> CharInput<S> {
    pub(crate) fn new(source: S, names: CharNameTable) -> Self {
        Self {
            source: Some(source),
            peeked: None,
            names,
        }
    }
}

impl<S> Sealed for CharInput<S> {}

impl<S: CharSource> Input for CharInput<S> {
    fn location(offset: u64, line: u32, column: u32) -> Location {
        Location::in_chars(offset, line, column)
    }

    #[inline]
    fn peek(&mut self) -> io::Result<Option<u32>> {
        if self.peeked.is_none() {
            let Some(source) = self.source.as_mut() else {
                return Ok(None);
            };
            self.peeked = source.next_char()?;
        }
        Ok(self.peeked.map(u32::from))
    }

    #[inline]
    fn bump(&mut self) {
        debug_assert!(self.peeked.is_some());
        self.peeked = None;
    }

    fn finish_char(&mut self, first: u32) -> io::Result<(char, usize)> {
        // Every unit is already a whole character.
        Ok((char::from_u32(first).unwrap_or(char::REPLACEMENT_CHARACTER), 0))
    }

    fn intern(&mut self, text: &str) -> Result<Name, LimitError> {
        self.names.intern(text)
    }

    fn release(&mut self) {
        self.names.release();
        self.source = None;
        self.peeked = None;
    }
}
