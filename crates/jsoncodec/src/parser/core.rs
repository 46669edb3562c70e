//! The tokenizer state machine shared by byte and character input.
//!
//! Overview
//! - `next_token` skips whitespace (and comments, when enabled), then lets the
//!   current [`ParseState`] decide what the next code unit may start.
//! - Structural characters and literals are ASCII in both input flavors, so
//!   the machine works on `u32` code units: a byte for UTF-8 input, a `char`
//!   for character input. Non-ASCII units only occur inside strings and
//!   unquoted names, where [`Input::finish_char`] completes the character.
//! - String values are lazy. The opening quote makes the token current; the
//!   content is decoded by the first `text()` call or skipped (without
//!   materializing) by the next `next_token`.
//! - Numbers are scanned eagerly into the text buffer and validated; their
//!   values are derived on demand.
//! - Field names are decoded, then canonicalized through the input's symbol
//!   table; the `:` that follows is consumed with the name.

use core::mem;
use std::io;

use tracing::trace;

use super::{JsonParser, number, source::Input};
use crate::{
    context::{ContextKind, ContextStack},
    error::{Error, LimitError, ParseError, Result, SyntaxError},
    location::Location,
    options::{ParserOptions, StreamLimits},
    symbols::Name,
    tables::{INPUT_CODES, hex_value, is_name_byte},
    token::{JsonToken, Number, NumberType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before a root value.
    Start,
    BeforeArrayValue,
    AfterArrayValue,
    BeforePropertyName,
    BeforePropertyValue,
    AfterPropertyValue,
    /// End of input reached; sticky.
    End,
}

const QUOTE: u32 = b'"' as u32;
const APOSTROPHE: u32 = b'\'' as u32;
const BACKSLASH: u32 = b'\\' as u32;

#[inline]
fn is(u: u32, c: u8) -> bool {
    u == u32::from(c)
}

#[inline]
fn ascii(u: u32) -> Option<u8> {
    u8::try_from(u).ok().filter(u8::is_ascii)
}

fn unit_char(u: u32) -> char {
    char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Pull tokenizer over an [`Input`].
///
/// Use the [`ByteParser`](super::ByteParser) and
/// [`CharParser`](super::CharParser) aliases, usually created through a
/// [`JsonFactory`](crate::JsonFactory).
pub struct Parser<I: Input> {
    input: I,
    options: ParserOptions,
    limits: StreamLimits,
    context: ContextStack,
    state: ParseState,
    after_comma: bool,
    token: Option<JsonToken>,
    /// The current string token's content has not been read yet.
    token_incomplete: bool,
    quote: u32,
    /// String content, number lexeme or unrecognized token text.
    text: String,
    name_buf: String,
    pos: u64,
    line: u32,
    line_start: u64,
    token_start: Location,
    closed: bool,
}

impl<I: Input> Parser<I> {
    pub(crate) fn new(input: I, options: ParserOptions, limits: StreamLimits) -> Self {
        Self {
            input,
            options,
            limits,
            context: ContextStack::new(),
            state: ParseState::Start,
            after_comma: false,
            token: None,
            token_incomplete: false,
            quote: QUOTE,
            text: String::new(),
            name_buf: String::new(),
            pos: 0,
            line: 1,
            line_start: 0,
            token_start: I::location(0, 1, 1),
            closed: false,
        }
    }

    #[must_use]
    pub fn limits(&self) -> &StreamLimits {
        &self.limits
    }

    // --------------------------------------------------------------------------------------------
    // Low-level input
    // --------------------------------------------------------------------------------------------

    fn location_here(&self) -> Location {
        let column = u32::try_from(self.pos - self.line_start + 1).unwrap_or(u32::MAX);
        I::location(self.pos, self.line, column)
    }

    #[inline]
    fn peek(&mut self) -> Result<Option<u32>> {
        self.input.peek().map_err(|err| self.source_error(err))
    }

    /// Consumes the peeked unit `u`.
    #[inline]
    fn bump(&mut self, u: u32) {
        self.input.bump();
        self.pos += 1;
        if is(u, b'\n') {
            self.line += 1;
            self.line_start = self.pos;
        }
    }

    fn next_unit(&mut self) -> Result<Option<u32>> {
        let u = self.peek()?;
        if let Some(u) = u {
            self.bump(u);
        }
        Ok(u)
    }

    fn require_unit(&mut self) -> Result<u32> {
        self.next_unit()?
            .ok_or_else(|| self.syntax_error(SyntaxError::UnexpectedEndOfInput))
    }

    /// Decodes the character started by the just-consumed unit `u`.
    fn finish_char(&mut self, u: u32) -> Result<char> {
        if let Some(b) = ascii(u) {
            return Ok(char::from(b));
        }
        let (c, extra) = self
            .input
            .finish_char(u)
            .map_err(|err| self.source_error(err))?;
        self.pos += extra as u64;
        Ok(c)
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    fn syntax_error(&self, kind: SyntaxError) -> Error {
        Error::Parse(ParseError {
            kind,
            location: self.location_here(),
        })
    }

    fn token_error(&self, kind: SyntaxError) -> Error {
        Error::Parse(ParseError {
            kind,
            location: self.token_start,
        })
    }

    fn unexpected(&self, u: u32, context: &'static str) -> Error {
        self.syntax_error(SyntaxError::UnexpectedCharacter {
            found: unit_char(u),
            context,
        })
    }

    fn source_error(&self, err: io::Error) -> Error {
        let kind = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<SyntaxError>())
            .cloned();
        match kind {
            Some(kind) => self.syntax_error(kind),
            None => Error::Io(err),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Whitespace and comments
    // --------------------------------------------------------------------------------------------

    fn skip_whitespace(&mut self) -> Result<Option<u32>> {
        loop {
            let Some(u) = self.peek()? else {
                return Ok(None);
            };
            match ascii(u) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.bump(u),
                Some(b'/') => {
                    if !self.options.allow_comments {
                        return Err(self.unexpected(
                            u,
                            "maybe a comment? (comments are not enabled, see allow_comments)",
                        ));
                    }
                    self.bump(u);
                    self.skip_comment()?;
                }
                Some(b'#') if self.options.allow_yaml_comments => {
                    self.bump(u);
                    self.skip_line()?;
                }
                _ => return Ok(Some(u)),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let u = self.require_unit()?;
        if is(u, b'/') {
            return self.skip_line();
        }
        if !is(u, b'*') {
            return Err(self.unexpected(u, "expected '/' or '*' after '/' to start a comment"));
        }
        let mut star = false;
        loop {
            let u = self.require_unit()?;
            if star && is(u, b'/') {
                return Ok(());
            }
            star = is(u, b'*');
        }
    }

    fn skip_line(&mut self) -> Result<()> {
        while let Some(u) = self.next_unit()? {
            if is(u, b'\n') || is(u, b'\r') {
                break;
            }
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Token dispatch
    // --------------------------------------------------------------------------------------------

    fn advance(&mut self) -> Result<Option<JsonToken>> {
        if mem::take(&mut self.token_incomplete) {
            self.read_string_body(false)?;
        }
        self.text.clear();
        loop {
            let next = self.skip_whitespace()?;
            self.token_start = self.location_here();
            let Some(u) = next else {
                return self.end_of_input();
            };
            match self.state {
                ParseState::Start => {
                    if self.context.current().entry_count() > 0
                        && self.options.require_single_root_value
                    {
                        return Err(self.syntax_error(SyntaxError::TrailingContent));
                    }
                    if matches!(ascii(u), Some(b']' | b'}')) {
                        return Err(self.syntax_error(SyntaxError::UnexpectedClose(unit_char(u))));
                    }
                    return self.start_value(u).map(Some);
                }
                ParseState::BeforeArrayValue => {
                    match ascii(u) {
                        Some(b']') => {
                            if self.after_comma && !self.options.allow_trailing_comma {
                                return Err(self.unexpected(
                                    u,
                                    "expected a value (trailing commas are not enabled, see allow_trailing_comma)",
                                ));
                            }
                            return Ok(Some(self.end_structure(u)));
                        }
                        Some(b'}') => {
                            return Err(self.syntax_error(SyntaxError::MismatchedClose {
                                expected: ']',
                                found: '}',
                            }));
                        }
                        _ => return self.start_value(u).map(Some),
                    }
                }
                ParseState::AfterArrayValue => match ascii(u) {
                    Some(b',') => {
                        self.bump(u);
                        self.after_comma = true;
                        self.state = ParseState::BeforeArrayValue;
                    }
                    Some(b']') => return Ok(Some(self.end_structure(u))),
                    Some(b'}') => {
                        return Err(self.syntax_error(SyntaxError::MismatchedClose {
                            expected: ']',
                            found: '}',
                        }));
                    }
                    _ => return Err(self.unexpected(u, "expected ',' or ']' after an array entry")),
                },
                ParseState::BeforePropertyName => match ascii(u) {
                    Some(b'}') => {
                        if self.after_comma && !self.options.allow_trailing_comma {
                            return Err(self.unexpected(
                                u,
                                "expected a field name (trailing commas are not enabled, see allow_trailing_comma)",
                            ));
                        }
                        return Ok(Some(self.end_structure(u)));
                    }
                    Some(b']') => {
                        return Err(self.syntax_error(SyntaxError::MismatchedClose {
                            expected: '}',
                            found: ']',
                        }));
                    }
                    _ => return self.field_name(u).map(Some),
                },
                ParseState::BeforePropertyValue => return self.start_value(u).map(Some),
                ParseState::AfterPropertyValue => match ascii(u) {
                    Some(b',') => {
                        self.bump(u);
                        self.after_comma = true;
                        self.state = ParseState::BeforePropertyName;
                    }
                    Some(b'}') => return Ok(Some(self.end_structure(u))),
                    Some(b']') => {
                        return Err(self.syntax_error(SyntaxError::MismatchedClose {
                            expected: '}',
                            found: ']',
                        }));
                    }
                    _ => {
                        return Err(self.unexpected(u, "expected ',' or '}' after an object entry"));
                    }
                },
                ParseState::End => return Ok(None),
            }
        }
    }

    fn end_of_input(&mut self) -> Result<Option<JsonToken>> {
        match self.state {
            ParseState::End => Ok(None),
            ParseState::Start => {
                if self.context.current().entry_count() == 0 && !self.options.allow_empty_content {
                    return Err(self.syntax_error(SyntaxError::NoContent));
                }
                self.state = ParseState::End;
                self.token = None;
                self.close();
                Ok(None)
            }
            _ => Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn state_after_value(&self) -> ParseState {
        match self.context.kind() {
            ContextKind::Root => ParseState::Start,
            ContextKind::Array => ParseState::AfterArrayValue,
            ContextKind::Object => ParseState::AfterPropertyValue,
        }
    }

    fn set_token(&mut self, token: JsonToken) -> JsonToken {
        self.token = Some(token);
        token
    }

    fn scalar(&mut self, token: JsonToken) -> JsonToken {
        self.state = self.state_after_value();
        self.after_comma = false;
        self.set_token(token)
    }

    fn end_structure(&mut self, u: u32) -> JsonToken {
        self.bump(u);
        let token = match self.context.pop().map(|frame| frame.kind()) {
            Some(ContextKind::Object) => JsonToken::EndObject,
            _ => JsonToken::EndArray,
        };
        self.scalar(token)
    }

    fn start_value(&mut self, u: u32) -> Result<JsonToken> {
        self.context.start_value();
        let Some(b) = ascii(u) else {
            return self.junk_token(u);
        };
        match b {
            b'{' | b'[' => {
                self.bump(u);
                let (kind, state, token) = if b == b'{' {
                    let state = ParseState::BeforePropertyName;
                    (ContextKind::Object, state, JsonToken::StartObject)
                } else {
                    (ContextKind::Array, ParseState::BeforeArrayValue, JsonToken::StartArray)
                };
                self.context.push(kind, self.limits.max_nesting_depth)?;
                self.state = state;
                self.after_comma = false;
                Ok(self.set_token(token))
            }
            b'"' => Ok(self.start_string(u)),
            b'\'' if self.options.allow_single_quotes => Ok(self.start_string(u)),
            b'-' | b'0'..=b'9' => self.number(u),
            b'+' if self.options.allow_non_numeric_numbers => self.number(u),
            b't' | b'f' | b'n' | b'N' | b'I' => self.literal(),
            _ if b.is_ascii_alphabetic() => self.literal(),
            b'}' | b']' | b',' | b':' | b'\'' | b'#' | b'+' | b'/' => {
                Err(self.unexpected(u, "expected a value"))
            }
            _ => self.junk_token(u),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------------------------------

    fn start_string(&mut self, quote: u32) -> JsonToken {
        self.bump(quote);
        self.quote = quote;
        self.token_incomplete = true;
        self.scalar(JsonToken::String)
    }

    fn finish_string(&mut self) -> Result<()> {
        if mem::take(&mut self.token_incomplete) {
            self.read_string_body(true)?;
        }
        Ok(())
    }

    /// Reads string content up to and including the closing quote, decoding
    /// into the text buffer when `keep` is set.
    fn read_string_body(&mut self, keep: bool) -> Result<()> {
        let mut buf = mem::take(&mut self.text);
        let result = self.decode_quoted(&mut buf, keep, self.limits.max_string_length, false);
        self.text = buf;
        result
    }

    fn decode_quoted(
        &mut self,
        buf: &mut String,
        keep: bool,
        max_len: usize,
        is_name: bool,
    ) -> Result<()> {
        let quote = self.quote;
        loop {
            let Some(u) = self.peek()? else {
                return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput));
            };
            if u == quote {
                self.bump(u);
                return Ok(());
            }
            // Control characters are reported where they are, not after them.
            let code = ascii(u).map_or(0, |b| INPUT_CODES[usize::from(b)]);
            if code < 0 && !self.options.allow_unquoted_control_chars {
                return Err(self.syntax_error(SyntaxError::UnescapedControlCharacter(u)));
            }
            self.bump(u);
            let c = if u == BACKSLASH {
                self.read_escape()?
            } else {
                self.finish_char(u)?
            };
            if keep {
                buf.push(c);
                if buf.len() > max_len {
                    return Err(Error::Limit(if is_name {
                        LimitError::NameLength(max_len)
                    } else {
                        LimitError::StringLength(max_len)
                    }));
                }
            }
        }
    }

    fn read_escape(&mut self) -> Result<char> {
        let u = self.require_unit()?;
        let c = match ascii(u) {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => return self.read_unicode_escape(),
            Some(b'\'') if self.options.allow_single_quotes => '\'',
            _ => {
                let c = self.finish_char(u)?;
                if !self.options.allow_backslash_escaping_any_character {
                    return Err(self.syntax_error(SyntaxError::InvalidEscape(c)));
                }
                c
            }
        };
        Ok(c)
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let mut value = 0;
        for _ in 0..4 {
            let u = self.require_unit()?;
            let Some(digit) = hex_value(u) else {
                return Err(self.syntax_error(SyntaxError::InvalidUnicodeEscape(unit_char(u))));
            };
            value = (value << 4) | digit;
        }
        Ok(value)
    }

    fn read_unicode_escape(&mut self) -> Result<char> {
        let unit = self.read_hex4()?;
        if (0xDC00..0xE000).contains(&unit) {
            return Err(self.syntax_error(SyntaxError::LoneSurrogate(unit)));
        }
        if !(0xD800..0xDC00).contains(&unit) {
            return Ok(unit_char(unit));
        }
        // A high surrogate must be followed by an escaped low surrogate.
        let follows_escape = matches!(self.peek()?, Some(u) if u == BACKSLASH);
        if !follows_escape {
            return Err(self.syntax_error(SyntaxError::LoneSurrogate(unit)));
        }
        self.bump(BACKSLASH);
        let u = self.require_unit()?;
        if !is(u, b'u') {
            return Err(self.syntax_error(SyntaxError::LoneSurrogate(unit)));
        }
        let low = self.read_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.syntax_error(SyntaxError::LoneSurrogate(unit)));
        }
        Ok(unit_char(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)))
    }

    // --------------------------------------------------------------------------------------------
    // Field names
    // --------------------------------------------------------------------------------------------

    fn field_name(&mut self, u: u32) -> Result<JsonToken> {
        let mut buf = mem::take(&mut self.name_buf);
        buf.clear();
        let read = self.read_name_text(u, &mut buf);
        let name = read.and_then(|()| self.input.intern(&buf).map_err(Error::from));
        self.name_buf = buf;
        let name = name?;
        self.context.start_field(name);

        let next = self.skip_whitespace()?;
        match next {
            Some(c) if is(c, b':') => self.bump(c),
            Some(c) => return Err(self.unexpected(c, "expected ':' after a field name")),
            None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
        }
        self.state = ParseState::BeforePropertyValue;
        self.after_comma = false;
        Ok(self.set_token(JsonToken::FieldName))
    }

    fn read_name_text(&mut self, u: u32, buf: &mut String) -> Result<()> {
        let max = self.limits.max_name_length;
        if u == QUOTE || (u == APOSTROPHE && self.options.allow_single_quotes) {
            self.bump(u);
            self.quote = u;
            return self.decode_quoted(buf, true, max, true);
        }
        let starts_name = ascii(u).is_none_or(|b| is_name_byte(b) && !b.is_ascii_digit());
        if !self.options.allow_unquoted_field_names || !starts_name {
            return Err(self.unexpected(u, "expected a double-quoted field name"));
        }
        while let Some(u) = self.peek()? {
            if ascii(u).is_some_and(|b| !is_name_byte(b)) {
                break;
            }
            self.bump(u);
            buf.push(self.finish_char(u)?);
            if buf.len() > max {
                return Err(Error::Limit(LimitError::NameLength(max)));
            }
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Numbers and literals
    // --------------------------------------------------------------------------------------------

    fn push_number_char(&mut self, b: u8) -> Result<()> {
        if self.text.len() >= self.limits.max_number_length {
            return Err(Error::Limit(LimitError::NumberLength(self.limits.max_number_length)));
        }
        self.text.push(char::from(b));
        Ok(())
    }

    fn peek_ascii(&mut self) -> Result<Option<u8>> {
        Ok(self.peek()?.and_then(ascii))
    }

    /// Consumes digits, returning how many.
    fn digits(&mut self) -> Result<usize> {
        let mut n = 0;
        while let Some(b) = self.peek_ascii()?.filter(u8::is_ascii_digit) {
            self.bump(u32::from(b));
            self.push_number_char(b)?;
            n += 1;
        }
        Ok(n)
    }

    fn number(&mut self, first: u32) -> Result<JsonToken> {
        let mut b = ascii(first).unwrap_or(b'-');
        if b == b'-' || b == b'+' {
            self.bump(first);
            let sign = b;
            match self.peek_ascii()? {
                Some(b'I') if self.options.allow_non_numeric_numbers => {
                    self.text.push(char::from(sign));
                    return self.literal();
                }
                Some(d) if d.is_ascii_digit() && sign == b'-' => {
                    self.push_number_char(sign)?;
                    b = d;
                }
                _ => {
                    return Err(self.syntax_error(SyntaxError::InvalidNumber(
                        "expected digit after the sign",
                    )));
                }
            }
        }

        if b == b'0' {
            self.bump(u32::from(b));
            if self.peek_ascii()?.is_some_and(|d| d.is_ascii_digit()) {
                if !self.options.allow_leading_zeros {
                    return Err(self.syntax_error(SyntaxError::LeadingZeros));
                }
                while self.peek_ascii()? == Some(b'0') {
                    self.bump(u32::from(b'0'));
                }
            }
            if self.digits()? == 0 {
                self.push_number_char(b'0')?;
            }
        } else {
            self.digits()?;
        }

        let mut float = false;
        if self.peek_ascii()? == Some(b'.') {
            float = true;
            self.bump(u32::from(b'.'));
            self.push_number_char(b'.')?;
            if self.digits()? == 0 {
                return Err(self.syntax_error(SyntaxError::InvalidNumber(
                    "expected digit after the decimal point",
                )));
            }
        }
        if let Some(e @ (b'e' | b'E')) = self.peek_ascii()? {
            float = true;
            self.bump(u32::from(e));
            self.push_number_char(e)?;
            if let Some(sign @ (b'+' | b'-')) = self.peek_ascii()? {
                self.bump(u32::from(sign));
                self.push_number_char(sign)?;
            }
            if self.digits()? == 0 {
                return Err(self.syntax_error(SyntaxError::InvalidNumber(
                    "expected digit in the exponent",
                )));
            }
        }
        if let Some(b) = self
            .peek_ascii()?
            .filter(|b| b.is_ascii_alphanumeric() || *b == b'.' || *b == b'_')
        {
            return Err(self.unexpected(u32::from(b), "expected a digit or the end of the number"));
        }
        Ok(self.scalar(if float { JsonToken::Float } else { JsonToken::Int }))
    }

    /// Reads an identifier-like token and matches it against the literals.
    /// A sign already pushed to the text buffer is kept.
    fn literal(&mut self) -> Result<JsonToken> {
        while let Some(b) = self.peek_ascii()?.filter(|b| b.is_ascii_alphanumeric() || *b == b'_') {
            self.bump(u32::from(b));
            if self.text.len() >= self.limits.max_number_length {
                break;
            }
            self.text.push(char::from(b));
        }
        let non_numeric = self.options.allow_non_numeric_numbers;
        let token = match self.text.as_str() {
            "true" => JsonToken::True,
            "false" => JsonToken::False,
            "null" => JsonToken::Null,
            "NaN" | "Infinity" if non_numeric => JsonToken::Float,
            "-Infinity" | "+Infinity" if non_numeric => JsonToken::Float,
            _ => {
                let text = mem::take(&mut self.text);
                return Err(self.token_error(SyntaxError::UnrecognizedToken(text)));
            }
        };
        if !token.is_numeric() {
            self.text.clear();
        }
        Ok(self.scalar(token))
    }

    /// Reports a run of characters that cannot start any value, up to the
    /// next separator, as one unrecognized token.
    fn junk_token(&mut self, u: u32) -> Result<JsonToken> {
        self.bump(u);
        let mut text = String::from(self.finish_char(u)?);
        while let Some(next) = self.peek()? {
            let separator = ascii(next)
                .is_some_and(|b| b.is_ascii_whitespace() || b"[]{}:,\"'/#".contains(&b));
            if separator || text.len() >= self.limits.max_number_length {
                break;
            }
            self.bump(next);
            text.push(self.finish_char(next)?);
        }
        Err(self.token_error(SyntaxError::UnrecognizedToken(text)))
    }

    fn current_number(&self) -> Result<Number> {
        match self.token {
            Some(token @ (JsonToken::Int | JsonToken::Float)) => Ok(number::number_value(
                &self.text,
                token,
                self.options.use_big_decimal_for_floats,
            )),
            Some(token) => Err(self.token_error(SyntaxError::NotANumber(token))),
            None => Err(self.token_error(SyntaxError::NoCurrentToken)),
        }
    }
}

impl<I: Input> JsonParser for Parser<I> {
    fn next_token(&mut self) -> Result<Option<JsonToken>> {
        if self.closed {
            return Ok(None);
        }
        match self.advance() {
            Ok(token) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    self.context.depth() <= self.limits.max_nesting_depth,
                    "Internal error: nesting depth {} above the limit",
                    self.context.depth()
                );
                Ok(token)
            }
            Err(err) => {
                self.token = None;
                self.close();
                Err(err)
            }
        }
    }

    fn current_token(&self) -> Option<JsonToken> {
        self.token
    }

    fn text(&mut self) -> Result<&str> {
        match self.token {
            Some(JsonToken::String) => {
                if let Err(err) = self.finish_string() {
                    self.close();
                    return Err(err);
                }
                Ok(&self.text)
            }
            Some(JsonToken::Int | JsonToken::Float) => Ok(&self.text),
            Some(JsonToken::FieldName) => Ok(self
                .context
                .current()
                .current_name()
                .map_or("", Name::as_str)),
            Some(token) => Ok(token.as_str().unwrap_or("")),
            None => Ok(""),
        }
    }

    fn current_name(&self) -> Option<&Name> {
        match self.token {
            Some(JsonToken::StartObject | JsonToken::StartArray) => self
                .context
                .frames()
                .rev()
                .nth(1)
                .and_then(|frame| frame.current_name()),
            _ => self.context.current().current_name(),
        }
    }

    fn number_type(&self) -> Result<NumberType> {
        Ok(self.current_number()?.number_type())
    }

    fn number_value(&self) -> Result<Number> {
        self.current_number()
    }

    fn int_value(&self) -> Result<i32> {
        number::to_i32(&self.current_number()?).map_err(|kind| self.token_error(kind))
    }

    fn long_value(&self) -> Result<i64> {
        number::to_i64(&self.current_number()?).map_err(|kind| self.token_error(kind))
    }

    fn big_integer_text(&self) -> Result<String> {
        number::to_big_integer_text(&self.current_number()?, &self.text)
            .map_err(|kind| self.token_error(kind))
    }

    fn decimal_text(&self) -> Result<String> {
        self.current_number()?;
        if number::is_non_numeric(&self.text) {
            return Err(self.token_error(SyntaxError::NumberOutOfRange("BigDecimal")));
        }
        Ok(self.text.clone())
    }

    fn context(&self) -> &ContextStack {
        &self.context
    }

    fn token_location(&self) -> Location {
        self.token_start
    }

    fn current_location(&self) -> Location {
        self.location_here()
    }

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if mem::take(&mut self.token_incomplete) {
            self.text.clear();
        }
        trace!(
            depth = self.context.depth(),
            offset = self.pos,
            "closing tokenizer"
        );
        self.input.release();
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<I: Input> Drop for Parser<I> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<I: Input> core::fmt::Debug for Parser<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Parser")
            .field("state", &self.state)
            .field("token", &self.token)
            .field("depth", &self.context.depth())
            .field("location", &self.location_here())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
