//! Pluggable whitespace for generators.
//!
//! A generator never writes separators or structure markers itself; it calls
//! the [`PrettyPrinter`] hook for the situation at hand and the printer writes
//! the punctuation together with whatever whitespace it wants.

use crate::error::Result;

/// Destination for the text a [`PrettyPrinter`] writes.
pub trait Output {
    /// Writes `text` verbatim.
    ///
    /// # Errors
    ///
    /// Failures of the underlying sink.
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// # Errors
    ///
    /// As for [`Output::write_raw`].
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_raw(c.encode_utf8(&mut buf))
    }
}

/// Hooks called by a generator at every point where whitespace may go.
///
/// # Errors
///
/// Every hook only fails when the output does.
pub trait PrettyPrinter {
    /// Between two root-level values.
    fn write_root_value_separator(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Writes `{`.
    fn write_start_object(&mut self, out: &mut dyn Output) -> Result<()>;

    /// After `{`, before the first field name.
    fn before_object_entries(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Between a field name and its value; writes `:`.
    fn write_object_field_value_separator(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Between two object entries; writes `,`.
    fn write_object_entry_separator(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Writes `}` after `entries` entries.
    fn write_end_object(&mut self, out: &mut dyn Output, entries: usize) -> Result<()>;

    /// Writes `[`.
    fn write_start_array(&mut self, out: &mut dyn Output) -> Result<()>;

    /// After `[`, before the first value.
    fn before_array_values(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Between two array values; writes `,`.
    fn write_array_value_separator(&mut self, out: &mut dyn Output) -> Result<()>;

    /// Writes `]` after `entries` values.
    fn write_end_array(&mut self, out: &mut dyn Output, entries: usize) -> Result<()>;
}

/// No whitespace at all, except between root values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalPrettyPrinter {
    root_value_separator: String,
}

impl Default for MinimalPrettyPrinter {
    fn default() -> Self {
        Self::new(" ")
    }
}

impl MinimalPrettyPrinter {
    #[must_use]
    pub fn new(root_value_separator: &str) -> Self {
        Self {
            root_value_separator: root_value_separator.to_string(),
        }
    }
}

impl PrettyPrinter for MinimalPrettyPrinter {
    fn write_root_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        if self.root_value_separator.is_empty() {
            return Ok(());
        }
        out.write_raw(&self.root_value_separator)
    }

    fn write_start_object(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char('{')
    }

    fn before_object_entries(&mut self, _out: &mut dyn Output) -> Result<()> {
        Ok(())
    }

    fn write_object_field_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char(':')
    }

    fn write_object_entry_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char(',')
    }

    fn write_end_object(&mut self, out: &mut dyn Output, _entries: usize) -> Result<()> {
        out.write_char('}')
    }

    fn write_start_array(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char('[')
    }

    fn before_array_values(&mut self, _out: &mut dyn Output) -> Result<()> {
        Ok(())
    }

    fn write_array_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char(',')
    }

    fn write_end_array(&mut self, out: &mut dyn Output, _entries: usize) -> Result<()> {
        out.write_char(']')
    }
}

/// How [`DefaultPrettyPrinter`] separates the entries of one kind of
/// structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indenter {
    /// A single space; the structure stays on one line.
    FixedSpace,
    /// A line break followed by `indent` repeated once per nesting level.
    LineFeed { indent: String },
}

impl Indenter {
    /// Line feed and two spaces per level.
    #[must_use]
    pub fn two_spaces() -> Self {
        Self::LineFeed {
            indent: "  ".to_string(),
        }
    }

    fn is_inline(&self) -> bool {
        matches!(self, Self::FixedSpace)
    }

    fn write_indentation(&self, out: &mut dyn Output, level: usize) -> Result<()> {
        match self {
            Self::FixedSpace => out.write_char(' '),
            Self::LineFeed { indent } => {
                out.write_char('\n')?;
                for _ in 0..level {
                    out.write_raw(indent)?;
                }
                Ok(())
            }
        }
    }
}

/// Human-readable output: object entries on their own indented lines,
/// `" : "` between names and values, arrays on one line, and `{ }` / `[ ]`
/// for empty structures.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{DefaultPrettyPrinter, JsonFactory, JsonGenerator};
///
/// let mut generator = JsonFactory::new()
///     .generator_to_string()
///     .with_pretty_printer(Box::new(DefaultPrettyPrinter::new()));
/// generator.write_start_object().unwrap();
/// generator.write_field_name("a").unwrap();
/// generator.write_number_i32(1).unwrap();
/// generator.write_end_object().unwrap();
/// assert_eq!(generator.into_inner().unwrap(), "{\n  \"a\" : 1\n}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPrettyPrinter {
    object_indenter: Indenter,
    array_indenter: Indenter,
    root_value_separator: String,
    nesting: usize,
}

impl Default for DefaultPrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultPrettyPrinter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            object_indenter: Indenter::two_spaces(),
            array_indenter: Indenter::FixedSpace,
            root_value_separator: " ".to_string(),
            nesting: 0,
        }
    }

    #[must_use]
    pub fn with_object_indenter(mut self, indenter: Indenter) -> Self {
        self.object_indenter = indenter;
        self
    }

    #[must_use]
    pub fn with_array_indenter(mut self, indenter: Indenter) -> Self {
        self.array_indenter = indenter;
        self
    }

    #[must_use]
    pub fn with_root_value_separator(mut self, separator: &str) -> Self {
        self.root_value_separator = separator.to_string();
        self
    }
}

impl PrettyPrinter for DefaultPrettyPrinter {
    fn write_root_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_raw(&self.root_value_separator)
    }

    fn write_start_object(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char('{')?;
        if !self.object_indenter.is_inline() {
            self.nesting += 1;
        }
        Ok(())
    }

    fn before_object_entries(&mut self, out: &mut dyn Output) -> Result<()> {
        self.object_indenter.write_indentation(out, self.nesting)
    }

    fn write_object_field_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_raw(" : ")
    }

    fn write_object_entry_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char(',')?;
        self.object_indenter.write_indentation(out, self.nesting)
    }

    fn write_end_object(&mut self, out: &mut dyn Output, entries: usize) -> Result<()> {
        if !self.object_indenter.is_inline() {
            self.nesting = self.nesting.saturating_sub(1);
        }
        if entries > 0 {
            self.object_indenter.write_indentation(out, self.nesting)?;
        } else {
            out.write_char(' ')?;
        }
        out.write_char('}')
    }

    fn write_start_array(&mut self, out: &mut dyn Output) -> Result<()> {
        if !self.array_indenter.is_inline() {
            self.nesting += 1;
        }
        out.write_char('[')
    }

    fn before_array_values(&mut self, out: &mut dyn Output) -> Result<()> {
        self.array_indenter.write_indentation(out, self.nesting)
    }

    fn write_array_value_separator(&mut self, out: &mut dyn Output) -> Result<()> {
        out.write_char(',')?;
        self.array_indenter.write_indentation(out, self.nesting)
    }

    fn write_end_array(&mut self, out: &mut dyn Output, entries: usize) -> Result<()> {
        if !self.array_indenter.is_inline() {
            self.nesting = self.nesting.saturating_sub(1);
        }
        if entries > 0 {
            self.array_indenter.write_indentation(out, self.nesting)?;
        } else {
            out.write_char(' ')?;
        }
        out.write_char(']')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Output for String {
        fn write_raw(&mut self, text: &str) -> Result<()> {
            self.push_str(text);
            Ok(())
        }
    }

    #[test]
    fn empty_structures_get_a_space() {
        let mut pp = DefaultPrettyPrinter::new();
        let mut out = String::new();
        pp.write_start_object(&mut out).unwrap();
        pp.write_end_object(&mut out, 0).unwrap();
        pp.write_start_array(&mut out).unwrap();
        pp.write_end_array(&mut out, 0).unwrap();
        assert_eq!(out, "{ }[ ]");
    }

    #[test]
    fn nested_objects_indent_per_level() {
        let mut pp = DefaultPrettyPrinter::new();
        let mut out = String::new();
        pp.write_start_object(&mut out).unwrap();
        pp.before_object_entries(&mut out).unwrap();
        out.push_str("\"a\"");
        pp.write_object_field_value_separator(&mut out).unwrap();
        pp.write_start_object(&mut out).unwrap();
        pp.before_object_entries(&mut out).unwrap();
        out.push_str("\"b\"");
        pp.write_object_field_value_separator(&mut out).unwrap();
        out.push('1');
        pp.write_end_object(&mut out, 1).unwrap();
        pp.write_end_object(&mut out, 1).unwrap();
        assert_eq!(out, "{\n  \"a\" : {\n    \"b\" : 1\n  }\n}");
    }

    #[test]
    fn minimal_root_separator() {
        let mut pp = MinimalPrettyPrinter::new("\n");
        let mut out = String::new();
        pp.write_root_value_separator(&mut out).unwrap();
        assert_eq!(out, "\n");
    }
}
