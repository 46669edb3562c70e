use std::io::Write;

use super::{
    Generator,
    core::{Sealed, Sink},
    pretty::Output,
};
use crate::error::{Error, GenerationError, Result};

const WRITE_BUFFER_SIZE: usize = 8000;

/// Generator writing UTF-8 to any [`io::Write`].
pub type Utf8Generator<W> = Generator<ByteSink<W>>;

/// Buffered UTF-8 output.
#[derive(Debug)]
pub struct ByteSink<W: Write> {
    inner: Option<W>,
    buf: Vec<u8>,
}

impl<W: Write> ByteSink<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            buf: Vec::with_capacity(WRITE_BUFFER_SIZE),
        }
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or(Error::Generation(GenerationError::Closed))?;
        inner.write_all(&self.buf)?;
        self.buf.clear();
        Ok(())
    }
}

impl<W: Write> Sealed for ByteSink<W> {}

impl<W: Write> Output for ByteSink<W> {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        if self.buf.len() + text.len() > WRITE_BUFFER_SIZE {
            self.flush_buffer()?;
            if text.len() >= WRITE_BUFFER_SIZE {
                let inner = self
                    .inner
                    .as_mut()
                    .ok_or(Error::Generation(GenerationError::Closed))?;
                inner.write_all(text.as_bytes())?;
                return Ok(());
            }
        }
        self.buf.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        if c.is_ascii() && self.buf.len() < WRITE_BUFFER_SIZE {
            #[expect(clippy::cast_possible_truncation)]
            self.buf.push(c as u8);
            return Ok(());
        }
        let mut tmp = [0u8; 4];
        self.write_raw(c.encode_utf8(&mut tmp))
    }
}

impl<W: Write> Sink for ByteSink<W> {
    type Inner = W;

    fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        if let Some(inner) = self.inner.as_mut() {
            inner.flush()?;
        }
        Ok(())
    }

    fn take_inner(&mut self) -> Option<W> {
        self.inner.take()
    }
}
