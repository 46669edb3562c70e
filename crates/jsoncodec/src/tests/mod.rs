mod property_roundtrip;

use crate::{JsonFactory, JsonParser, JsonToken, ParserOptions, Result};

/// Which tokenizer a test runs against.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Flavor {
    Bytes,
    Chars,
}

/// Every token with its text, strings decoded.
pub(crate) fn drain(parser: &mut dyn JsonParser) -> Result<Vec<(JsonToken, String)>> {
    let mut out = Vec::new();
    while let Some(token) = parser.next_token()? {
        out.push((token, parser.text()?.to_string()));
    }
    Ok(out)
}

pub(crate) fn tokens_with(
    flavor: Flavor,
    input: &str,
    options: ParserOptions,
) -> Result<Vec<(JsonToken, String)>> {
    let factory = JsonFactory::new().with_parser_options(options);
    match flavor {
        Flavor::Bytes => drain(&mut factory.parser_from_slice(input.as_bytes())),
        Flavor::Chars => drain(&mut factory.parser_from_str(input)),
    }
}

pub(crate) fn tokens(flavor: Flavor, input: &str) -> Result<Vec<(JsonToken, String)>> {
    tokens_with(flavor, input, ParserOptions::default())
}

/// Number of quickcheck cases: more on CI, a handful under miri.
pub(crate) fn quickcheck_tests() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
