//! A streaming JSON codec: pull tokenizers over UTF-8 bytes or characters,
//! streaming generators with pluggable pretty printing, and shared
//! field-name symbol tables.
//!
//! Everything starts from a [`JsonFactory`], which holds the configuration
//! and the root symbol tables shared by the tokenizers it creates.
//!
//! ```rust
//! use jsoncodec::{JsonFactory, JsonParser, JsonToken};
//!
//! let factory = JsonFactory::new();
//! let mut parser = factory.parser_from_slice(br#"{"a": [1, 2.5, "x"]}"#);
//! let mut tokens = Vec::new();
//! while let Some(token) = parser.next_token().unwrap() {
//!     tokens.push(token);
//! }
//! assert_eq!(
//!     tokens,
//!     [
//!         JsonToken::StartObject,
//!         JsonToken::FieldName,
//!         JsonToken::StartArray,
//!         JsonToken::Int,
//!         JsonToken::Float,
//!         JsonToken::String,
//!         JsonToken::EndArray,
//!         JsonToken::EndObject,
//!     ]
//! );
//! ```

#![allow(missing_docs)]

mod accumulator;
mod base64;
mod context;
mod error;
mod factory;
mod generator;
mod location;
mod options;
mod parser;
mod symbols;
mod tables;
mod token;

#[cfg(test)]
mod tests;

pub use accumulator::{ByteAccumulator, INITIAL_BLOCK_SIZE, MAX_BLOCK_SIZE};
pub use self::base64::Base64Variant;
pub use context::{ContextKind, ContextStack, Frame, PathItem, WriteStatus};
pub use error::{Error, GenerationError, LimitError, ParseError, Result, SyntaxError};
pub use factory::JsonFactory;
pub use generator::{
    ByteSink, CharSink, DefaultPrettyPrinter, Generator, Indenter, JsonGenerator,
    MinimalPrettyPrinter, Output, PrettyPrinter, Sink, Utf8Generator, WriterGenerator,
};
pub use location::Location;
pub use options::{GeneratorOptions, ParserOptions, StreamLimits};
pub use parser::{
    ByteInput, ByteParser, CharInput, CharParser, CharSource, Input, JsonParser, Parser, StrSource,
    Utf8Reader,
};
pub use symbols::{
    ByteNameTable, ByteSymbolTable, CharNameTable, CharSymbolTable, MAX_COLLISION_CHAIN, Name,
    PROMOTION_THRESHOLD, pack_quads, pack_quads_into,
};
pub use tables::{
    Escape, HEX_CHARS, HEX_VALUES, INPUT_CODES, INPUT_CODES_UTF8, NAME_CODES, OUTPUT_ESCAPES,
    escape_for, hex_value, is_name_byte, needs_escape, utf8_sequence_len,
};
pub use token::{JsonToken, Number, NumberType};
