//! Streaming writers.
//!
//! [`JsonGenerator`] is the object-safe writer interface, implemented by
//! [`Generator`] over a byte sink ([`Utf8Generator`]) and a character sink
//! ([`WriterGenerator`]). Whitespace and punctuation go through a
//! [`PrettyPrinter`].

mod bytes;
mod chars;
mod core;
mod pretty;

pub use bytes::{ByteSink, Utf8Generator};
pub use chars::{CharSink, WriterGenerator};
pub use pretty::{DefaultPrettyPrinter, Indenter, MinimalPrettyPrinter, Output, PrettyPrinter};
pub use self::core::{Generator, Sink};

use crate::{
    base64::Base64Variant,
    context::ContextStack,
    error::{Error, ParseError, Result, SyntaxError},
    parser::{JsonParser, is_non_numeric},
    symbols::Name,
    token::JsonToken,
};

/// A streaming JSON writer.
///
/// Calls are checked against the current context: a field name is only
/// accepted inside an object where a name is expected, a value only where a
/// value is expected. A rejected call returns a
/// [`GenerationError`](crate::GenerationError) and changes nothing, so the
/// caller may continue with a valid call.
pub trait JsonGenerator {
    /// # Errors
    ///
    /// Misuse, exceeded nesting depth and sink failures.
    fn write_start_object(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_end_object(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Misuse, exceeded nesting depth and sink failures.
    fn write_start_array(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_end_array(&mut self) -> Result<()>;

    /// Writes a field name. The colon is written together with the value.
    ///
    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_field_name(&mut self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_string(&mut self, text: &str) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_number_i64(&mut self, v: i64) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_number_u64(&mut self, v: u64) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_number_f32(&mut self, v: f32) -> Result<()>;

    /// Finite values are written in their shortest round-trip form;
    /// `NaN` and the infinities follow
    /// [`quote_non_numeric_numbers`](crate::GeneratorOptions::quote_non_numeric_numbers).
    ///
    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_number_f64(&mut self, v: f64) -> Result<()>;

    /// Writes already encoded number text, such as an arbitrary precision
    /// decimal. The text is not validated.
    ///
    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_number_text(&mut self, text: &str) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_bool(&mut self, v: bool) -> Result<()>;

    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_null(&mut self) -> Result<()>;

    /// Writes `text` verbatim, bypassing context checks entirely.
    ///
    /// # Errors
    ///
    /// Sink failures, or [`GenerationError::Closed`](crate::GenerationError::Closed).
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// Writes `text` verbatim as one complete value, with the separators a
    /// value would get.
    ///
    /// # Errors
    ///
    /// Misuse and sink failures.
    fn write_raw_value(&mut self, text: &str) -> Result<()>;

    fn context(&self) -> &ContextStack;

    /// # Errors
    ///
    /// Sink failures.
    fn flush(&mut self) -> Result<()>;

    /// Closes open structures when
    /// [`auto_close_content`](crate::GeneratorOptions::auto_close_content)
    /// is set, then flushes. Idempotent.
    ///
    /// # Errors
    ///
    /// Sink failures.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;

    /// # Errors
    ///
    /// As for [`JsonGenerator::write_field_name`].
    fn write_name(&mut self, name: &Name) -> Result<()> {
        self.write_field_name(name.as_str())
    }

    /// # Errors
    ///
    /// As for [`JsonGenerator::write_string`].
    fn write_string_chars(&mut self, chars: &[char]) -> Result<()> {
        let text: String = chars.iter().collect();
        self.write_string(&text)
    }

    /// # Errors
    ///
    /// As for [`JsonGenerator::write_number_i64`].
    fn write_number_i32(&mut self, v: i32) -> Result<()> {
        self.write_number_i64(i64::from(v))
    }

    /// Writes `data` as a base64 string.
    ///
    /// # Errors
    ///
    /// As for [`JsonGenerator::write_string`].
    fn write_binary(&mut self, variant: Base64Variant, data: &[u8]) -> Result<()> {
        self.write_string(&variant.encode(data))
    }

    /// Writes the parser's current token.
    ///
    /// Numbers are copied through their text, so nothing is lost to
    /// conversion.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::NoCurrentToken`] when the parser has no token, errors
    /// reading the token, and the errors of the write itself.
    fn copy_current_event(&mut self, parser: &mut dyn JsonParser) -> Result<()> {
        let Some(token) = parser.current_token() else {
            return Err(Error::Parse(ParseError {
                kind: SyntaxError::NoCurrentToken,
                location: parser.current_location(),
            }));
        };
        match token {
            JsonToken::StartObject => self.write_start_object(),
            JsonToken::EndObject => self.write_end_object(),
            JsonToken::StartArray => self.write_start_array(),
            JsonToken::EndArray => self.write_end_array(),
            JsonToken::FieldName => self.write_field_name(parser.text()?),
            JsonToken::String => self.write_string(parser.text()?),
            JsonToken::Int | JsonToken::Float => {
                if is_non_numeric(parser.text()?) {
                    self.write_number_f64(parser.double_value()?)
                } else {
                    self.write_number_text(parser.text()?)
                }
            }
            JsonToken::True => self.write_bool(true),
            JsonToken::False => self.write_bool(false),
            JsonToken::Null => self.write_null(),
            JsonToken::EmbeddedObject => {
                let variant = Base64Variant::default();
                let data = parser.binary_value(variant)?;
                self.write_binary(variant, &data)
            }
        }
    }

    /// Writes the parser's current token and, when it opens a structure,
    /// everything up to and including the matching close. On a field name,
    /// the name and the value that follows are copied.
    ///
    /// # Errors
    ///
    /// As for [`JsonGenerator::copy_current_event`]; running out of input
    /// inside the structure is [`SyntaxError::UnexpectedEndOfInput`].
    fn copy_current_structure(&mut self, parser: &mut dyn JsonParser) -> Result<()> {
        let mut token = parser.current_token();
        if token == Some(JsonToken::FieldName) {
            self.copy_current_event(parser)?;
            token = parser.next_token()?;
        }
        let Some(token) = token else {
            return Err(Error::Parse(ParseError {
                kind: SyntaxError::UnexpectedEndOfInput,
                location: parser.current_location(),
            }));
        };
        self.copy_current_event(parser)?;
        if !token.is_structure_start() {
            return Ok(());
        }
        let target = parser.depth() - 1;
        loop {
            let Some(next) = parser.next_token()? else {
                return Err(Error::Parse(ParseError {
                    kind: SyntaxError::UnexpectedEndOfInput,
                    location: parser.current_location(),
                }));
            };
            self.copy_current_event(parser)?;
            if next.is_structure_end() && parser.depth() == target {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeneratorOptions, JsonFactory};

    fn written(f: impl FnOnce(&mut dyn JsonGenerator) -> Result<()>) -> String {
        let mut generator = JsonFactory::new().generator_to_string();
        f(&mut generator).unwrap();
        generator.into_inner().unwrap()
    }

    #[test]
    fn empty_object() {
        let out = written(|g| {
            g.write_start_object()?;
            g.write_end_object()
        });
        assert_eq!(out, "{}");
    }

    #[test]
    fn nested_values() {
        let out = written(|g| {
            g.write_start_object()?;
            g.write_field_name("a")?;
            g.write_start_array()?;
            g.write_number_i32(1)?;
            g.write_number_f64(2.5)?;
            g.write_bool(true)?;
            g.write_null()?;
            g.write_end_array()?;
            g.write_field_name("b")?;
            g.write_string("x\"y")?;
            g.write_end_object()
        });
        assert_eq!(out, r#"{"a":[1,2.5,true,null],"b":"x\"y"}"#);
    }

    #[test]
    fn misuse_leaves_generator_usable() {
        let mut g = JsonFactory::new().generator_to_string();
        g.write_start_array().unwrap();
        let err = g.write_end_object().unwrap_err();
        assert!(err.is_misuse(), "{err}");
        let err = g.write_field_name("a").unwrap_err();
        assert!(err.is_misuse(), "{err}");
        g.write_number_i32(1).unwrap();
        g.write_end_array().unwrap();
        assert_eq!(g.into_inner().unwrap(), "[1]");
    }

    #[test]
    fn value_where_name_expected() {
        let mut g = JsonFactory::new().generator_to_string();
        g.write_start_object().unwrap();
        assert!(g.write_string("v").unwrap_err().is_misuse());
        g.write_field_name("k").unwrap();
        assert!(g.write_field_name("k2").unwrap_err().is_misuse());
        g.write_string("v").unwrap();
        g.write_end_object().unwrap();
        assert_eq!(g.into_inner().unwrap(), r#"{"k":"v"}"#);
    }

    #[test]
    fn close_at_root_is_misuse() {
        let mut g = JsonFactory::new().generator_to_string();
        assert!(g.write_end_array().unwrap_err().is_misuse());
    }

    #[test]
    fn writes_after_close_fail() {
        let mut g = JsonFactory::new().generator_to_string();
        g.write_null().unwrap();
        g.close().unwrap();
        g.close().unwrap();
        assert!(g.is_closed());
        assert!(g.write_null().unwrap_err().is_misuse());
    }

    #[test]
    fn auto_close_fills_pending_value() {
        let out = written(|g| {
            g.write_start_array()?;
            g.write_start_object()?;
            g.write_field_name("dangling")
        });
        assert_eq!(out, r#"[{"dangling":null}]"#);
    }

    #[test]
    fn auto_close_disabled() {
        let options = GeneratorOptions {
            auto_close_content: false,
            ..GeneratorOptions::default()
        };
        let mut g = JsonFactory::new()
            .with_generator_options(options)
            .generator_to_string();
        g.write_start_array().unwrap();
        assert_eq!(g.into_inner().unwrap(), "[");
    }

    #[test]
    fn root_values_are_separated() {
        let out = written(|g| {
            g.write_number_i32(1)?;
            g.write_number_i32(2)?;
            g.write_start_array()?;
            g.write_end_array()
        });
        assert_eq!(out, "1 2 []");
    }

    #[test]
    fn non_finite_numbers() {
        let out = written(|g| {
            g.write_start_array()?;
            g.write_number_f64(f64::NAN)?;
            g.write_number_f64(f64::NEG_INFINITY)?;
            g.write_number_f32(f32::INFINITY)?;
            g.write_end_array()
        });
        assert_eq!(out, r#"["NaN","-Infinity","Infinity"]"#);

        let options = GeneratorOptions {
            quote_non_numeric_numbers: false,
            ..GeneratorOptions::default()
        };
        let mut g = JsonFactory::new()
            .with_generator_options(options)
            .generator_to_string();
        g.write_number_f64(f64::NAN).unwrap();
        assert_eq!(g.into_inner().unwrap(), "NaN");
    }

    #[test]
    fn numbers_as_strings() {
        let options = GeneratorOptions {
            write_numbers_as_strings: true,
            ..GeneratorOptions::default()
        };
        let mut g = JsonFactory::new()
            .with_generator_options(options)
            .generator_to_string();
        g.write_start_array().unwrap();
        g.write_number_u64(u64::MAX).unwrap();
        g.write_number_text("1.000000000000000000001").unwrap();
        g.write_end_array().unwrap();
        assert_eq!(
            g.into_inner().unwrap(),
            r#"["18446744073709551615","1.000000000000000000001"]"#
        );
    }

    #[test]
    fn escapes_control_and_non_ascii() {
        let out = written(|g| g.write_string("a\u{1}\n\t\\é😀"));
        assert_eq!(out, "\"a\\u0001\\n\\t\\\\é😀\"");

        let options = GeneratorOptions {
            escape_non_ascii: true,
            ..GeneratorOptions::default()
        };
        let mut g = JsonFactory::new()
            .with_generator_options(options)
            .generator_to_string();
        g.write_string("é😀").unwrap();
        assert_eq!(g.into_inner().unwrap(), r#""\u00E9\uD83D\uDE00""#);
    }

    #[test]
    fn unquoted_field_names() {
        let options = GeneratorOptions {
            quote_field_names: false,
            ..GeneratorOptions::default()
        };
        let mut g = JsonFactory::new()
            .with_generator_options(options)
            .generator_to_string();
        g.write_start_object().unwrap();
        g.write_field_name("a").unwrap();
        g.write_number_i32(1).unwrap();
        g.write_end_object().unwrap();
        assert_eq!(g.into_inner().unwrap(), "{a:1}");
    }

    #[test]
    fn raw_output() {
        let out = written(|g| {
            g.write_start_array()?;
            g.write_raw_value("{\"pre\":true}")?;
            g.write_raw_value("7")?;
            g.write_end_array()?;
            g.write_raw("\n")
        });
        assert_eq!(out, "[{\"pre\":true},7]\n");
    }

    #[test]
    fn binary_is_base64() {
        let out = written(|g| g.write_binary(Base64Variant::MimeNoLinefeeds, b"hello"));
        assert_eq!(out, r#""aGVsbG8=""#);
    }

    #[test]
    fn depth_limit_applies() {
        let limits = crate::StreamLimits {
            max_nesting_depth: 2,
            ..crate::StreamLimits::default()
        };
        let mut g = JsonFactory::new().with_limits(limits).generator_to_string();
        g.write_start_array().unwrap();
        g.write_start_array().unwrap();
        let err = g.write_start_array().unwrap_err();
        assert!(err.is_limit(), "{err}");
        g.write_end_array().unwrap();
        g.write_end_array().unwrap();
        assert_eq!(g.into_inner().unwrap(), "[[]]");
    }

    #[test]
    fn utf8_generator_into_inner() {
        let mut g = JsonFactory::new().generator(Vec::new());
        g.write_start_object().unwrap();
        g.write_field_name("k").unwrap();
        g.write_string_chars(&['v', 'é']).unwrap();
        let bytes = g.into_inner().unwrap();
        assert_eq!(bytes, "{\"k\":\"vé\"}".as_bytes());
    }

    #[test]
    fn large_strings_bypass_the_buffer() {
        let big = "x".repeat(20_000);
        let mut g = JsonFactory::new().generator(Vec::new());
        g.write_string(&big).unwrap();
        let bytes = g.into_inner().unwrap();
        assert_eq!(bytes.len(), big.len() + 2);
    }

    #[test]
    fn copy_structure_preserves_number_text() {
        let factory = JsonFactory::new();
        let input = r#"{"a":[1.50,-0,1e400,123456789012345678901234567890],"b":{"c":"é"}}"#;
        let mut parser = factory.parser_from_str(input);
        parser.next_token().unwrap();
        let mut g = factory.generator_to_string();
        g.copy_current_structure(&mut parser).unwrap();
        assert_eq!(
            g.into_inner().unwrap(),
            r#"{"a":[1.50,-0,1e400,123456789012345678901234567890],"b":{"c":"é"}}"#
        );
    }

    #[test]
    fn copy_field_copies_its_value() {
        let factory = JsonFactory::new();
        let mut parser = factory.parser_from_slice(br#"{"keep":[true,null],"skip":1}"#);
        parser.next_token().unwrap();
        parser.next_token().unwrap();
        let mut g = factory.generator_to_string();
        g.write_start_object().unwrap();
        g.copy_current_structure(&mut parser).unwrap();
        g.write_end_object().unwrap();
        assert_eq!(g.into_inner().unwrap(), r#"{"keep":[true,null]}"#);
        assert_eq!(parser.next_field_name().unwrap().unwrap(), "skip");
    }

    #[test]
    fn copy_without_token_fails() {
        let factory = JsonFactory::new();
        let mut parser = factory.parser_from_str("[]");
        let mut g = factory.generator_to_string();
        let err = g.copy_current_event(&mut parser).unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::NoCurrentToken));
    }
}
