use tracing::trace;

use super::{
    JsonGenerator,
    pretty::{MinimalPrettyPrinter, Output, PrettyPrinter},
};
use crate::{
    context::{ContextKind, ContextStack, WriteStatus},
    error::{Error, GenerationError, LimitError, Result},
    options::{GeneratorOptions, StreamLimits},
    tables::{Escape, escape_for, unicode_escape},
};

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// The output side of a [`Generator`].
///
/// Implemented by [`ByteSink`](super::ByteSink) and
/// [`CharSink`](super::CharSink).
pub trait Sink: Output + sealed::Sealed {
    /// What the sink writes to.
    type Inner;

    /// Pushes buffered output to the inner writer and flushes it.
    ///
    /// # Errors
    ///
    /// Failures of the inner writer.
    fn flush(&mut self) -> Result<()>;

    /// Takes the inner writer out. `None` when already taken.
    fn take_inner(&mut self) -> Option<Self::Inner>;
}

/// Streaming JSON writer over a [`Sink`].
///
/// Use the [`Utf8Generator`](super::Utf8Generator) and
/// [`WriterGenerator`](super::WriterGenerator) aliases, usually created
/// through a [`JsonFactory`](crate::JsonFactory).
///
/// Every write is validated against the context stack before anything is
/// changed or written, so a call rejected with a [`GenerationError`] leaves
/// the generator usable.
pub struct Generator<O: Sink> {
    sink: O,
    context: ContextStack,
    options: GeneratorOptions,
    limits: StreamLimits,
    printer: Box<dyn PrettyPrinter>,
    closed: bool,
}

impl<O: Sink> Generator<O> {
    pub(crate) fn new(sink: O, options: GeneratorOptions, limits: StreamLimits) -> Self {
        let printer = Box::new(MinimalPrettyPrinter::new(&options.root_value_separator));
        Self {
            sink,
            context: ContextStack::new(),
            options,
            limits,
            printer,
            closed: false,
        }
    }

    /// Replaces the pretty printer. Meant to be called before anything is
    /// written.
    #[must_use]
    pub fn with_pretty_printer(mut self, printer: Box<dyn PrettyPrinter>) -> Self {
        self.printer = printer;
        self
    }

    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Closes the generator and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Failures while closing, and [`GenerationError::Closed`] when the
    /// writer was already taken.
    pub fn into_inner(mut self) -> Result<O::Inner> {
        JsonGenerator::close(&mut self)?;
        self.sink
            .take_inner()
            .ok_or(Error::Generation(GenerationError::Closed))
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(GenerationError::Closed.into());
        }
        Ok(())
    }

    /// Validates a value, records it and writes the separator before it.
    fn begin_value(&mut self) -> Result<()> {
        self.check_open()?;
        let status = self.context.write_value()?;
        self.write_value_separator(status)
    }

    fn write_value_separator(&mut self, status: WriteStatus) -> Result<()> {
        let out: &mut dyn Output = &mut self.sink;
        match status {
            WriteStatus::First if self.context.in_array() => self.printer.before_array_values(out),
            WriteStatus::First => Ok(()),
            WriteStatus::AfterComma => self.printer.write_array_value_separator(out),
            WriteStatus::AfterColon => self.printer.write_object_field_value_separator(out),
            WriteStatus::AfterRootValue => self.printer.write_root_value_separator(out),
        }
    }

    fn start_structure(&mut self, kind: ContextKind) -> Result<()> {
        self.check_open()?;
        if self.context.depth() >= self.limits.max_nesting_depth {
            return Err(LimitError::NestingDepth(self.limits.max_nesting_depth).into());
        }
        self.begin_value()?;
        let out: &mut dyn Output = &mut self.sink;
        if kind == ContextKind::Object {
            self.printer.write_start_object(out)?;
        } else {
            self.printer.write_start_array(out)?;
        }
        self.context.push(kind, self.limits.max_nesting_depth)?;
        Ok(())
    }

    fn end_structure(&mut self, kind: ContextKind) -> Result<()> {
        self.check_open()?;
        self.context.check_end(kind)?;
        let entries = self.context.current().entry_count();
        let out: &mut dyn Output = &mut self.sink;
        if kind == ContextKind::Object {
            self.printer.write_end_object(out, entries)?;
        } else {
            self.printer.write_end_array(out, entries)?;
        }
        self.context.pop();
        Ok(())
    }

    /// Writes `text` between double quotes, escaping as needed.
    fn write_quoted(&mut self, text: &str) -> Result<()> {
        self.sink.write_char('"')?;
        self.write_escaped(text)?;
        self.sink.write_char('"')
    }

    fn write_escaped(&mut self, text: &str) -> Result<()> {
        let escape_non_ascii = self.options.escape_non_ascii;
        let bytes = text.as_bytes();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b >= 0x80 {
                if !escape_non_ascii {
                    i += 1;
                    continue;
                }
                let Some(c) = text[i..].chars().next() else {
                    break;
                };
                self.sink.write_raw(&text[start..i])?;
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    self.write_unicode_escape(u32::from(*unit))?;
                }
                i += c.len_utf8();
                start = i;
                continue;
            }
            match escape_for(b) {
                Escape::None => {
                    i += 1;
                    continue;
                }
                Escape::Named(c) => {
                    self.sink.write_raw(&text[start..i])?;
                    self.sink.write_char('\\')?;
                    self.sink.write_char(char::from(c))?;
                }
                Escape::Unicode => {
                    self.sink.write_raw(&text[start..i])?;
                    self.write_unicode_escape(u32::from(b))?;
                }
            }
            i += 1;
            start = i;
        }
        self.sink.write_raw(&text[start..])
    }

    fn write_unicode_escape(&mut self, unit: u32) -> Result<()> {
        for b in unicode_escape(unit) {
            self.sink.write_char(char::from(b))?;
        }
        Ok(())
    }

    /// Writes a number's text, quoted when numbers are written as strings.
    fn write_number_raw(&mut self, text: &str) -> Result<()> {
        self.begin_value()?;
        if self.options.write_numbers_as_strings {
            self.sink.write_char('"')?;
            self.sink.write_raw(text)?;
            self.sink.write_char('"')
        } else {
            self.sink.write_raw(text)
        }
    }

    fn write_non_finite(&mut self, text: &str) -> Result<()> {
        self.begin_value()?;
        if self.options.quote_non_numeric_numbers || self.options.write_numbers_as_strings {
            self.write_quoted(text)
        } else {
            self.sink.write_raw(text)
        }
    }
}

fn non_finite_text(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}

impl<O: Sink> JsonGenerator for Generator<O> {
    fn write_start_object(&mut self) -> Result<()> {
        self.start_structure(ContextKind::Object)
    }

    fn write_end_object(&mut self) -> Result<()> {
        self.end_structure(ContextKind::Object)
    }

    fn write_start_array(&mut self) -> Result<()> {
        self.start_structure(ContextKind::Array)
    }

    fn write_end_array(&mut self) -> Result<()> {
        self.end_structure(ContextKind::Array)
    }

    fn write_field_name(&mut self, name: &str) -> Result<()> {
        self.check_open()?;
        let status = self.context.write_field_name()?;
        let out: &mut dyn Output = &mut self.sink;
        if status == WriteStatus::First {
            self.printer.before_object_entries(out)?;
        } else {
            self.printer.write_object_entry_separator(out)?;
        }
        if self.options.quote_field_names {
            self.write_quoted(name)
        } else {
            self.write_escaped(name)
        }
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.begin_value()?;
        self.write_quoted(text)
    }

    fn write_number_i64(&mut self, v: i64) -> Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_number_raw(buf.format(v))
    }

    fn write_number_u64(&mut self, v: u64) -> Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_number_raw(buf.format(v))
    }

    fn write_number_f32(&mut self, v: f32) -> Result<()> {
        if !v.is_finite() {
            return self.write_non_finite(non_finite_text(f64::from(v)));
        }
        let mut buf = ryu::Buffer::new();
        self.write_number_raw(buf.format_finite(v))
    }

    fn write_number_f64(&mut self, v: f64) -> Result<()> {
        if !v.is_finite() {
            return self.write_non_finite(non_finite_text(v));
        }
        let mut buf = ryu::Buffer::new();
        self.write_number_raw(buf.format_finite(v))
    }

    fn write_number_text(&mut self, text: &str) -> Result<()> {
        self.write_number_raw(text)
    }

    fn write_bool(&mut self, v: bool) -> Result<()> {
        self.begin_value()?;
        self.sink.write_raw(if v { "true" } else { "false" })
    }

    fn write_null(&mut self) -> Result<()> {
        self.begin_value()?;
        self.sink.write_raw("null")
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.check_open()?;
        self.sink.write_raw(text)
    }

    fn write_raw_value(&mut self, text: &str) -> Result<()> {
        self.begin_value()?;
        self.sink.write_raw(text)
    }

    fn context(&self) -> &ContextStack {
        &self.context
    }

    fn flush(&mut self) -> Result<()> {
        self.check_open()?;
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        trace!(depth = self.context.depth(), "closing generator");
        if self.options.auto_close_content {
            while self.context.depth() > 0 {
                if self.context.current().is_name_pending() {
                    self.write_null()?;
                }
                self.end_structure(self.context.kind())?;
            }
        }
        self.closed = true;
        self.sink.flush()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<O: Sink> Drop for Generator<O> {
    fn drop(&mut self) {
        if !self.closed {
            // Best effort: buffered output is not lost, errors are.
            let _ = self.sink.flush();
        }
    }
}

impl<O: Sink> core::fmt::Debug for Generator<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generator")
            .field("depth", &self.context.depth())
            .field("options", &self.options)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
