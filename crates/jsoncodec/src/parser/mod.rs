//! Pull tokenizers.
//!
//! [`JsonParser`] is the object-safe tokenizer interface. It is implemented by
//! [`Parser`] for both input flavors: [`ByteParser`] reads UTF-8 from any
//! [`std::io::Read`] and canonicalizes names through quad-keyed symbol tables;
//! [`CharParser`] reads from a [`CharSource`] and uses char-keyed tables.

mod bytes;
mod chars;
mod core;
mod number;
mod source;

pub(crate) use number::is_non_numeric;
pub use bytes::{ByteInput, ByteParser};
pub use chars::{CharInput, CharParser};
pub use self::core::Parser;
pub use source::{CharSource, Input, StrSource, Utf8Reader};

use crate::{
    accumulator::ByteAccumulator,
    base64::Base64Variant,
    context::{ContextStack, PathItem},
    error::{Error, ParseError, Result, SyntaxError},
    location::Location,
    options::ParserOptions,
    symbols::Name,
    token::{JsonToken, Number, NumberType},
};

/// A pull tokenizer: each call to [`next_token`](JsonParser::next_token)
/// advances to the next token, whose payload is then read through the
/// accessors.
///
/// After a syntax, I/O or limit error the tokenizer is closed and
/// `next_token` returns `Ok(None)`.
pub trait JsonParser {
    /// Advances to the next token. `Ok(None)` at the end of input.
    ///
    /// # Errors
    ///
    /// Malformed input, I/O failures of the source and exceeded limits.
    fn next_token(&mut self) -> Result<Option<JsonToken>>;

    fn current_token(&self) -> Option<JsonToken>;

    /// Text of the current token.
    ///
    /// String content is decoded on the first call. Numbers return their
    /// lexeme, field names the name, other tokens their fixed text.
    ///
    /// # Errors
    ///
    /// Malformed string content.
    fn text(&mut self) -> Result<&str>;

    /// The field name of the current token: the name itself for
    /// [`JsonToken::FieldName`], otherwise the name the current value belongs
    /// to.
    fn current_name(&self) -> Option<&Name>;

    /// # Errors
    ///
    /// [`SyntaxError::NotANumber`] on non-numeric tokens.
    fn number_type(&self) -> Result<NumberType>;

    /// # Errors
    ///
    /// [`SyntaxError::NotANumber`] on non-numeric tokens.
    fn number_value(&self) -> Result<Number>;

    /// # Errors
    ///
    /// [`SyntaxError::NotANumber`], or
    /// [`SyntaxError::NumberOutOfRange`] when the value does not fit.
    fn int_value(&self) -> Result<i32>;

    /// # Errors
    ///
    /// As for [`JsonParser::int_value`].
    fn long_value(&self) -> Result<i64>;

    /// Integral decimal text of the current number, any fraction truncated.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::int_value`].
    fn big_integer_text(&self) -> Result<String>;

    /// Exact decimal text of the current number.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::int_value`].
    fn decimal_text(&self) -> Result<String>;

    fn context(&self) -> &ContextStack;

    /// Where the current token starts.
    fn token_location(&self) -> Location;

    /// Where the next unread unit is.
    fn current_location(&self) -> Location;

    fn options(&self) -> &ParserOptions;

    /// Releases the symbol table and the input. Idempotent.
    fn close(&mut self);

    fn is_closed(&self) -> bool;

    /// Advances and returns the name if the next token is a field name.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::next_token`].
    fn next_field_name(&mut self) -> Result<Option<Name>> {
        match self.next_token()? {
            Some(JsonToken::FieldName) => Ok(self.current_name().cloned()),
            _ => Ok(None),
        }
    }

    /// Advances and returns the text if the next token is a string.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::next_token`] and [`JsonParser::text`].
    fn next_text_value(&mut self) -> Result<Option<String>> {
        match self.next_token()? {
            Some(JsonToken::String) => Ok(Some(self.text()?.to_string())),
            _ => Ok(None),
        }
    }

    fn has_token(&self, token: JsonToken) -> bool {
        self.current_token() == Some(token)
    }

    fn is_expected_start_array(&self) -> bool {
        self.has_token(JsonToken::StartArray)
    }

    /// Length in bytes of [`JsonParser::text`].
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::text`].
    fn text_len(&mut self) -> Result<usize> {
        Ok(self.text()?.len())
    }

    /// # Errors
    ///
    /// As for [`JsonParser::number_value`].
    fn double_value(&self) -> Result<f64> {
        Ok(self.number_value()?.as_f64())
    }

    /// The current value as a boolean, `default` when it has no boolean
    /// reading.
    fn value_as_bool(&mut self, default: bool) -> bool {
        match self.current_token() {
            Some(JsonToken::True) => true,
            Some(JsonToken::False | JsonToken::Null) => false,
            Some(JsonToken::Int) => self.long_value().map_or(default, |v| v != 0),
            Some(JsonToken::String) => match self.text().map(str::trim) {
                Ok("true") => true,
                Ok("false") => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// The current value as an `i64`, `default` when it has no integer
    /// reading.
    fn value_as_i64(&mut self, default: i64) -> i64 {
        match self.current_token() {
            Some(JsonToken::Int | JsonToken::Float) => self.long_value().unwrap_or(default),
            Some(JsonToken::True) => 1,
            Some(JsonToken::False | JsonToken::Null) => 0,
            Some(JsonToken::String) => self
                .text()
                .ok()
                .and_then(|text| text.trim().parse().ok())
                .unwrap_or(default),
            _ => default,
        }
    }

    /// The current value as an `f64`, `default` when it has no numeric
    /// reading.
    fn value_as_f64(&mut self, default: f64) -> f64 {
        match self.current_token() {
            Some(JsonToken::Int | JsonToken::Float) => self.double_value().unwrap_or(default),
            Some(JsonToken::True) => 1.0,
            Some(JsonToken::False | JsonToken::Null) => 0.0,
            Some(JsonToken::String) => self
                .text()
                .ok()
                .and_then(|text| text.trim().parse().ok())
                .unwrap_or(default),
            _ => default,
        }
    }

    /// The current scalar as text; `None` for null, structures and no token.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::text`].
    fn value_as_string(&mut self) -> Result<Option<String>> {
        match self.current_token() {
            None | Some(JsonToken::Null) => Ok(None),
            Some(token) if token.is_structure_start() || token.is_structure_end() => Ok(None),
            Some(_) => Ok(Some(self.text()?.to_string())),
        }
    }

    /// Decodes the current string (or embedded object) token as base64.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::NotText`] for other tokens and
    /// [`SyntaxError::InvalidBase64`] for malformed content.
    fn binary_value(&mut self, variant: Base64Variant) -> Result<Vec<u8>> {
        let location = self.token_location();
        match self.current_token() {
            Some(JsonToken::String | JsonToken::EmbeddedObject) => {}
            Some(token) => return Err(parse_error(SyntaxError::NotText(token), location)),
            None => return Err(parse_error(SyntaxError::NoCurrentToken, location)),
        }
        let mut out = ByteAccumulator::new();
        variant
            .decode_into(self.text()?, &mut out)
            .map_err(|msg| parse_error(SyntaxError::InvalidBase64(msg), location))?;
        Ok(out.to_byte_array())
    }

    /// When the current token opens an array or object, advances to the
    /// matching close token without decoding anything in between. Does
    /// nothing for other tokens.
    ///
    /// # Errors
    ///
    /// As for [`JsonParser::next_token`]; running out of input inside the
    /// structure is [`SyntaxError::UnexpectedEndOfInput`].
    fn skip_children(&mut self) -> Result<()> {
        if !self.current_token().is_some_and(JsonToken::is_structure_start) {
            return Ok(());
        }
        let target = self.depth() - 1;
        loop {
            match self.next_token()? {
                Some(token) if token.is_structure_end() && self.depth() == target => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(parse_error(
                        SyntaxError::UnexpectedEndOfInput,
                        self.current_location(),
                    ));
                }
            }
        }
    }

    /// Number of open structures.
    fn depth(&self) -> usize {
        self.context().depth()
    }

    fn path(&self) -> Vec<PathItem> {
        self.context().path()
    }

    /// The current position as an RFC 6901 JSON Pointer.
    fn pointer(&self) -> String {
        self.context().pointer()
    }
}

fn parse_error(kind: SyntaxError, location: Location) -> Error {
    Error::Parse(ParseError { kind, location })
}
