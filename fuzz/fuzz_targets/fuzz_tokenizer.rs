#![no_main]

use std::io::Read;

use arbitrary::Arbitrary;
use jsoncodec::{
    JsonFactory, JsonGenerator, JsonParser, JsonToken, ParserOptions, StreamLimits, Utf8Reader,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Case {
    /// One bit per lenient feature.
    flags: u16,
    /// Upper bound on the bytes handed out by each read.
    chunk: u8,
    data: Vec<u8>,
}

/// Reader that splits its input into reads of at most `chunk` bytes.
struct Chunked<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.data.len().min(buf.len()).min(self.chunk);
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn options(flags: u16) -> ParserOptions {
    let bit = |n: u16| flags & (1 << n) != 0;
    ParserOptions {
        allow_comments: bit(0),
        allow_yaml_comments: bit(1),
        allow_unquoted_field_names: bit(2),
        allow_single_quotes: bit(3),
        allow_unquoted_control_chars: bit(4),
        allow_backslash_escaping_any_character: bit(5),
        allow_leading_zeros: bit(6),
        allow_non_numeric_numbers: bit(7),
        allow_trailing_comma: bit(8),
        allow_empty_content: bit(9),
        require_single_root_value: bit(10),
        use_big_decimal_for_floats: bit(11),
        canonicalize_field_names: !bit(12),
    }
}

/// Every token with its decoded text, then the error message if any.
fn drain(parser: &mut dyn JsonParser) -> (Vec<(JsonToken, String)>, Option<String>) {
    let mut tokens = Vec::new();
    loop {
        match parser.next_token() {
            Ok(Some(token)) => match parser.text() {
                Ok(text) => tokens.push((token, text.to_string())),
                Err(err) => return (tokens, Some(err.to_string())),
            },
            Ok(None) => return (tokens, None),
            Err(err) => return (tokens, Some(err.to_string())),
        }
    }
}

fn tokenizer(case: &Case) {
    let factory = JsonFactory::new()
        .with_parser_options(options(case.flags))
        .with_limits(StreamLimits {
            max_nesting_depth: 64,
            ..StreamLimits::default()
        });
    let chunk = usize::from(case.chunk.max(1));

    let (whole, whole_err) = drain(&mut factory.parser_from_slice(&case.data));
    let (pieces, pieces_err) = drain(&mut factory.parser_from_reader(Chunked {
        data: &case.data,
        chunk,
    }));
    assert_eq!(whole, pieces, "read size changed the token stream");
    assert_eq!(whole_err.is_some(), pieces_err.is_some());

    // Byte and char tokenizers agree on well-formed UTF-8.
    if let Ok(text) = std::str::from_utf8(&case.data) {
        let (chars, chars_err) = drain(&mut factory.parser_from_str(text));
        assert_eq!(whole, chars, "tokenizer flavors disagree");
        assert_eq!(whole_err.is_some(), chars_err.is_some());

        let (decoded, _) = drain(&mut factory.parser_from_chars(Utf8Reader::new(Chunked {
            data: &case.data,
            chunk,
        })));
        assert_eq!(whole, decoded);
    }

    if whole_err.is_some() {
        return;
    }

    // Accepted input copies into strict JSON with the same number of tokens.
    let mut parser = factory.parser_from_slice(&case.data);
    let mut generator = JsonFactory::new().generator_to_string();
    while parser.next_token().unwrap().is_some() {
        generator.copy_current_event(&mut parser).unwrap();
    }
    let copied = generator.into_inner().unwrap();
    let strict = JsonFactory::new();
    let (reparsed, err) = drain(&mut strict.parser_from_str(&copied));
    assert!(err.is_none() || whole.is_empty(), "{err:?} in {copied:?}");
    assert_eq!(reparsed.len(), whole.len());
}

fuzz_target!(|case: Case| tokenizer(&case));
