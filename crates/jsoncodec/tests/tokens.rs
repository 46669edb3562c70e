#![expect(missing_docs)]

mod common;

use jsoncodec::{JsonFactory, JsonParser, JsonToken, ParserOptions, Utf8Reader};

const DOCUMENT: &str = r#"{"id": 7, "tags": ["a", "bé"], "ok": true, "n": null, "x": -1.5e2}"#;

const MULTILINE: &str = "[\n  {\"é\": 1},\n  {\"é\": 2.50}\n]";

#[test]
fn byte_tokens() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_slice(DOCUMENT.as_bytes());
    insta::assert_snapshot!(common::render_tokens(&mut parser), @r#"
    START_OBJECT "{" @1:1
    FIELD_NAME "id" @1:2
    VALUE_NUMBER_INT "7" @1:8
    FIELD_NAME "tags" @1:11
    START_ARRAY "[" @1:19
    VALUE_STRING "a" @1:20
    VALUE_STRING "bé" @1:25
    END_ARRAY "]" @1:30
    FIELD_NAME "ok" @1:33
    VALUE_TRUE "true" @1:39
    FIELD_NAME "n" @1:45
    VALUE_NULL "null" @1:50
    FIELD_NAME "x" @1:56
    VALUE_NUMBER_FLOAT "-1.5e2" @1:61
    END_OBJECT "}" @1:67
    "#);
}

#[test]
fn char_tokens() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_str(DOCUMENT);
    insta::assert_snapshot!(common::render_tokens(&mut parser), @r#"
    START_OBJECT "{" @1:1
    FIELD_NAME "id" @1:2
    VALUE_NUMBER_INT "7" @1:8
    FIELD_NAME "tags" @1:11
    START_ARRAY "[" @1:19
    VALUE_STRING "a" @1:20
    VALUE_STRING "bé" @1:25
    END_ARRAY "]" @1:29
    FIELD_NAME "ok" @1:32
    VALUE_TRUE "true" @1:38
    FIELD_NAME "n" @1:44
    VALUE_NULL "null" @1:49
    FIELD_NAME "x" @1:55
    VALUE_NUMBER_FLOAT "-1.5e2" @1:60
    END_OBJECT "}" @1:66
    "#);
}

#[test]
fn char_tokens_match_byte_tokens_on_ascii() {
    let ascii = DOCUMENT.replace('é', "e");
    let factory = JsonFactory::new();
    let from_bytes = common::render_tokens(&mut factory.parser_from_slice(ascii.as_bytes()));
    let from_chars = common::render_tokens(&mut factory.parser_from_str(&ascii));
    assert_eq!(from_bytes, from_chars);
    assert!(from_bytes.contains("END_ARRAY \"]\" @1:29"), "{from_bytes}");
}

#[test]
fn byte_columns_count_bytes() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_slice(MULTILINE.as_bytes());
    insta::assert_snapshot!(common::render_tokens(&mut parser), @r#"
    START_ARRAY "[" @1:1
    START_OBJECT "{" @2:3
    FIELD_NAME "é" @2:4
    VALUE_NUMBER_INT "1" @2:10
    END_OBJECT "}" @2:11
    START_OBJECT "{" @3:3
    FIELD_NAME "é" @3:4
    VALUE_NUMBER_FLOAT "2.50" @3:10
    END_OBJECT "}" @3:14
    END_ARRAY "]" @4:1
    "#);
}

#[test]
fn char_columns_count_chars() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_str(MULTILINE);
    insta::assert_snapshot!(common::render_tokens(&mut parser), @r#"
    START_ARRAY "[" @1:1
    START_OBJECT "{" @2:3
    FIELD_NAME "é" @2:4
    VALUE_NUMBER_INT "1" @2:9
    END_OBJECT "}" @2:10
    START_OBJECT "{" @3:3
    FIELD_NAME "é" @3:4
    VALUE_NUMBER_FLOAT "2.50" @3:9
    END_OBJECT "}" @3:13
    END_ARRAY "]" @4:1
    "#);
}

#[test]
fn reader_input_in_small_pieces() {
    /// Hands out at most three bytes per read.
    struct Trickle<'a>(&'a [u8]);

    impl std::io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.0.len().min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    let factory = JsonFactory::new();
    let whole = common::render_tokens(&mut factory.parser_from_slice(MULTILINE.as_bytes()));
    let pieces =
        common::render_tokens(&mut factory.parser_from_reader(Trickle(MULTILINE.as_bytes())));
    assert_eq!(whole, pieces);

    let decoded = common::render_tokens(&mut factory.parser_from_chars(Utf8Reader::new(Trickle(
        MULTILINE.as_bytes(),
    ))));
    let from_str = common::render_tokens(&mut factory.parser_from_str(MULTILINE));
    assert_eq!(decoded, from_str);
}

#[test]
fn lenient_document() {
    let factory = JsonFactory::new().with_parser_options(ParserOptions {
        allow_comments: true,
        allow_yaml_comments: true,
        allow_unquoted_field_names: true,
        allow_single_quotes: true,
        allow_trailing_comma: true,
        allow_non_numeric_numbers: true,
        allow_leading_zeros: true,
        ..ParserOptions::default()
    });
    let text = "# settings\n{ name: 'x', // inline\n  /* n */ n: [NaN, 007,], }";
    let mut parser = factory.parser_from_str(text);
    assert_eq!(
        common::token_kinds(&mut parser),
        [
            JsonToken::StartObject,
            JsonToken::FieldName,
            JsonToken::String,
            JsonToken::FieldName,
            JsonToken::StartArray,
            JsonToken::Float,
            JsonToken::Int,
            JsonToken::EndArray,
            JsonToken::EndObject,
        ]
    );

    let mut parser = factory.parser_from_slice(text.as_bytes());
    let rendered = common::render_tokens(&mut parser);
    assert!(rendered.contains("FIELD_NAME \"name\" @2:3"), "{rendered}");
    assert!(rendered.contains("VALUE_STRING \"x\""), "{rendered}");
    assert!(rendered.contains("VALUE_NUMBER_FLOAT \"NaN\""), "{rendered}");
    assert!(rendered.contains("VALUE_NUMBER_INT \"7\""), "{rendered}");
}

#[test]
fn error_ends_the_listing() {
    let factory = JsonFactory::new();
    let rendered = common::render_tokens(&mut factory.parser_from_slice(b"{\"a\": [1, 2}"));
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 6, "{rendered}");
    assert_eq!(lines[4], "VALUE_NUMBER_INT \"2\" @1:11");
    assert!(
        lines[5].starts_with("error: unexpected close marker '}': expected ']' at line 1, column 12"),
        "{rendered}"
    );
}

#[test]
fn multiple_root_values() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_str("1 \"two\"\n[3]\n{}");
    insta::assert_snapshot!(common::render_tokens(&mut parser), @r#"
    VALUE_NUMBER_INT "1" @1:1
    VALUE_STRING "two" @1:3
    START_ARRAY "[" @2:1
    VALUE_NUMBER_INT "3" @2:2
    END_ARRAY "]" @2:3
    START_OBJECT "{" @3:1
    END_OBJECT "}" @3:2
    "#);
}

#[test]
fn parsers_are_object_safe() {
    let factory = JsonFactory::new();
    let mut parsers: Vec<Box<dyn JsonParser + '_>> = vec![
        Box::new(factory.parser_from_slice(b"[true]")),
        Box::new(factory.parser_from_str("[true]")),
    ];
    for parser in &mut parsers {
        assert_eq!(
            common::token_kinds(parser.as_mut()),
            [JsonToken::StartArray, JsonToken::True, JsonToken::EndArray]
        );
        assert!(parser.is_closed());
    }
}
