use std::io::Read;

use crate::{
    accumulator::ByteAccumulator,
    generator::{ByteSink, CharSink, Generator, Utf8Generator, WriterGenerator},
    options::{GeneratorOptions, ParserOptions, StreamLimits},
    parser::{ByteInput, ByteParser, CharInput, CharParser, CharSource, Parser, StrSource},
    symbols::{ByteSymbolTable, CharSymbolTable},
};

/// Creates tokenizers and generators that share configuration and root
/// symbol tables.
///
/// Cloning is cheap and the clones share the symbol tables, so field names
/// learned by a tokenizer from one clone are found by tokenizers created
/// later from any of them.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{JsonFactory, JsonGenerator, JsonParser, JsonToken};
///
/// let factory = JsonFactory::new();
/// let mut parser = factory.parser_from_slice(br#"{"id": 7}"#);
/// let mut generator = factory.generator_to_string();
/// while parser.next_token().unwrap().is_some() {
///     generator.copy_current_event(&mut parser).unwrap();
/// }
/// assert_eq!(generator.into_inner().unwrap(), r#"{"id":7}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFactory {
    parser_options: ParserOptions,
    generator_options: GeneratorOptions,
    limits: StreamLimits,
    byte_symbols: ByteSymbolTable,
    char_symbols: CharSymbolTable,
}

impl JsonFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = options;
        self
    }

    #[must_use]
    pub fn with_generator_options(mut self, options: GeneratorOptions) -> Self {
        self.generator_options = options;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: StreamLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_options
    }

    #[must_use]
    pub fn generator_options(&self) -> &GeneratorOptions {
        &self.generator_options
    }

    #[must_use]
    pub fn limits(&self) -> &StreamLimits {
        &self.limits
    }

    /// Tokenizer reading UTF-8 from `reader`.
    pub fn parser_from_reader<R: Read>(&self, reader: R) -> ByteParser<R> {
        let names = self
            .byte_symbols
            .child(self.parser_options.canonicalize_field_names, self.limits);
        Parser::new(ByteInput::new(reader, names), self.parser_options, self.limits)
    }

    /// Tokenizer over UTF-8 bytes in memory.
    pub fn parser_from_slice<'a>(&self, bytes: &'a [u8]) -> ByteParser<&'a [u8]> {
        self.parser_from_reader(bytes)
    }

    /// Tokenizer over a string, using the character path.
    pub fn parser_from_str<'a>(&self, text: &'a str) -> CharParser<StrSource<'a>> {
        self.parser_from_chars(StrSource::new(text))
    }

    /// Tokenizer over any [`CharSource`].
    pub fn parser_from_chars<S: CharSource>(&self, source: S) -> CharParser<S> {
        let names = self
            .char_symbols
            .child(self.parser_options.canonicalize_field_names, self.limits);
        Parser::new(CharInput::new(source, names), self.parser_options, self.limits)
    }

    /// Generator writing UTF-8 to `writer`.
    pub fn generator<W: std::io::Write>(&self, writer: W) -> Utf8Generator<W> {
        Generator::new(
            ByteSink::new(writer),
            self.generator_options.clone(),
            self.limits,
        )
    }

    /// Generator collecting UTF-8 in a [`ByteAccumulator`].
    pub fn generator_to_bytes(&self) -> Utf8Generator<ByteAccumulator> {
        self.generator(ByteAccumulator::new())
    }

    /// Generator collecting text in a `String`.
    pub fn generator_to_string(&self) -> WriterGenerator<String> {
        self.generator_to_writer(String::new())
    }

    /// Generator writing characters to `writer`.
    pub fn generator_to_writer<W: core::fmt::Write>(&self, writer: W) -> WriterGenerator<W> {
        Generator::new(
            CharSink::new(writer),
            self.generator_options.clone(),
            self.limits,
        )
    }

    /// Root table shared by the byte tokenizers.
    #[must_use]
    pub fn byte_symbols(&self) -> &ByteSymbolTable {
        &self.byte_symbols
    }

    /// Root table shared by the character tokenizers.
    #[must_use]
    pub fn char_symbols(&self) -> &CharSymbolTable {
        &self.char_symbols
    }
}
