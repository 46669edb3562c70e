use core::fmt;
use std::io;

use super::{
    Generator,
    core::{Sealed, Sink},
    pretty::Output,
};
use crate::error::{Error, GenerationError, Result};

/// Generator writing characters to any [`fmt::Write`], such as a `String`.
pub type WriterGenerator<W> = Generator<CharSink<W>>;

/// Unbuffered character output.
#[derive(Debug)]
pub struct CharSink<W: fmt::Write> {
    inner: Option<W>,
}

impl<W: fmt::Write> CharSink<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner: Some(inner) }
    }

    fn inner(&mut self) -> Result<&mut W> {
        self.inner
            .as_mut()
            .ok_or(Error::Generation(GenerationError::Closed))
    }
}

fn write_failed(_: fmt::Error) -> Error {
    Error::Io(io::Error::other("formatter error"))
}

impl<W: fmt::Write> Sealed for CharSink<W> {}

impl<W: fmt::Write> Output for CharSink<W> {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.inner()?.write_str(text).map_err(write_failed)
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        self.inner()?.write_char(c).map_err(write_failed)
    }
}

impl<W: fmt::Write> Sink for CharSink<W> {
    type Inner = W;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn take_inner(&mut self) -> Option<W> {
        self.inner.take()
    }
}
