#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use jsoncodec::{JsonGenerator, JsonParser, JsonToken};

/// One line per token: kind, text and the location where it starts.
pub fn render_tokens(parser: &mut dyn JsonParser) -> String {
    let mut out = String::new();
    loop {
        match parser.next_token() {
            Ok(Some(token)) => {
                let at = parser.token_location();
                let text = parser.text().map(str::to_string).unwrap_or_else(|e| e.to_string());
                writeln!(out, "{token} {text:?} @{}:{}", at.line, at.column).unwrap();
            }
            Ok(None) => break,
            Err(err) => {
                writeln!(out, "error: {err}").unwrap();
                break;
            }
        }
    }
    out
}

/// Copies every event from `parser` to `generator`.
pub fn copy_all(parser: &mut dyn JsonParser, generator: &mut dyn JsonGenerator) {
    while parser.next_token().unwrap().is_some() {
        generator.copy_current_event(parser).unwrap();
    }
}

/// Token kinds only.
pub fn token_kinds(parser: &mut dyn JsonParser) -> Vec<JsonToken> {
    let mut out = Vec::new();
    while let Some(token) = parser.next_token().unwrap() {
        out.push(token);
    }
    out
}
