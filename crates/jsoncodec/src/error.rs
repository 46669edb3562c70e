use std::io;

use thiserror::Error;

use crate::{context::ContextKind, location::Location, token::JsonToken};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure surfaced by tokenizers, generators and symbol tables.
///
/// The four variants are deliberately disjoint so that callers can tell
/// malformed input (`Parse`) from programming errors (`Generation`), failures
/// of the underlying source or sink (`Io`) and configured resource bounds
/// (`Limit`).
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Limit(#[from] LimitError),
}

impl Error {
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    #[must_use]
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::Limit(_))
    }

    /// Input location of a parse error.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Parse(err) => Some(err.location),
            _ => None,
        }
    }

    /// The syntax error kind, if this is a parse error.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Parse(err) => Some(&err.kind),
            _ => None,
        }
    }
}

/// Malformed input, with the location where it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {location}")]
pub struct ParseError {
    pub kind: SyntaxError,
    pub location: Location,
}

/// What was wrong with the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected character {found:?}: {context}")]
    UnexpectedCharacter { found: char, context: &'static str },
    #[error("illegal unquoted control character ({0:#04x}) in string: must be escaped")]
    UnescapedControlCharacter(u32),
    #[error("unrecognized character escape {0:?}")]
    InvalidEscape(char),
    #[error("invalid character {0:?} in \\u escape, expected a hex digit")]
    InvalidUnicodeEscape(char),
    #[error("unpaired surrogate \\u{0:04X} in string")]
    LoneSurrogate(u32),
    #[error("invalid number: {0}")]
    InvalidNumber(&'static str),
    #[error("invalid number: leading zeroes not allowed")]
    LeadingZeros,
    #[error("unexpected close marker {found:?}: expected {expected:?}")]
    MismatchedClose { expected: char, found: char },
    #[error("unexpected close marker {0:?}: no open structure")]
    UnexpectedClose(char),
    #[error("unrecognized token '{0}': expected a JSON value")]
    UnrecognizedToken(String),
    #[error("invalid UTF-8 start byte {0:#04x}")]
    InvalidUtf8Start(u8),
    #[error("invalid UTF-8 continuation byte {0:#04x}")]
    InvalidUtf8Middle(u8),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("no content: input ended before any token")]
    NoContent,
    #[error("trailing content after the root value")]
    TrailingContent,
    #[error("numeric value out of range of {0}")]
    NumberOutOfRange(&'static str),
    #[error("no current token")]
    NoCurrentToken,
    #[error("current token ({0}) is not numeric")]
    NotANumber(JsonToken),
    #[error("current token ({0}) has no text that can be decoded")]
    NotText(JsonToken),
    #[error("invalid base64 content: {0}")]
    InvalidBase64(String),
}

/// Caller misuse of a generator. These indicate a bug in the calling code,
/// never malformed data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot write a field name outside an object (current context: {0})")]
    NameOutsideObject(ContextKind),
    #[error("cannot write a field name: expecting a value")]
    ExpectedValue,
    #[error("cannot write a value: expecting a field name")]
    ExpectedName,
    #[error("cannot close {found}: current context is {expected}")]
    MismatchedEnd {
        expected: ContextKind,
        found: ContextKind,
    },
    #[error("cannot close {0}: no open structure")]
    EndAtRoot(ContextKind),
    #[error("cannot close object: field name written without a value")]
    EndAfterName,
    #[error("generator is closed")]
    Closed,
}

/// A configured bound was exceeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("nesting depth exceeds the maximum allowed ({0})")]
    NestingDepth(usize),
    #[error("number length exceeds the maximum allowed ({0})")]
    NumberLength(usize),
    #[error("string length exceeds the maximum allowed ({0})")]
    StringLength(usize),
    #[error("field name length exceeds the maximum allowed ({0})")]
    NameLength(usize),
    #[error("number of distinct field names exceeds the maximum allowed ({0})")]
    SymbolCount(usize),
    #[error("symbol table bucket chain too long ({0}): possible hash flooding")]
    SymbolCollisions(usize),
}
