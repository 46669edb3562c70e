use quickcheck::{Arbitrary, Gen, QuickCheck};

use super::quickcheck_tests;
use crate::{
    DefaultPrettyPrinter, GeneratorOptions, JsonFactory, JsonGenerator, JsonParser, JsonToken,
    Result,
};

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 5 {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => Value::Int(i64::arbitrary(g)),
                3 => {
                    let mut value = f64::arbitrary(g);
                    while !value.is_finite() {
                        value = f64::arbitrary(g);
                    }
                    Value::Float(value)
                }
                _ => Value::String(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Object(
                        (0..len)
                            .map(|_| (String::arbitrary(g), gen_val(g, depth - 1)))
                            .collect(),
                    )
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }
}

fn write_value(g: &mut dyn JsonGenerator, value: &Value) -> Result<()> {
    match value {
        Value::Null => g.write_null(),
        Value::Bool(v) => g.write_bool(*v),
        Value::Int(v) => g.write_number_i64(*v),
        Value::Float(v) => g.write_number_f64(*v),
        Value::String(s) => g.write_string(s),
        Value::Array(items) => {
            g.write_start_array()?;
            for item in items {
                write_value(g, item)?;
            }
            g.write_end_array()
        }
        Value::Object(entries) => {
            g.write_start_object()?;
            for (name, item) in entries {
                g.write_field_name(name)?;
                write_value(g, item)?;
            }
            g.write_end_object()
        }
    }
}

/// Reads the value starting at the current token.
fn read_value(p: &mut dyn JsonParser) -> Result<Value> {
    let token = p.current_token().expect("a current token");
    Ok(match token {
        JsonToken::Null => Value::Null,
        JsonToken::True => Value::Bool(true),
        JsonToken::False => Value::Bool(false),
        JsonToken::Int => Value::Int(p.long_value()?),
        JsonToken::Float => Value::Float(p.double_value()?),
        JsonToken::String => Value::String(p.text()?.to_string()),
        JsonToken::StartArray => {
            let mut items = Vec::new();
            while p.next_token()? != Some(JsonToken::EndArray) {
                items.push(read_value(p)?);
            }
            Value::Array(items)
        }
        JsonToken::StartObject => {
            let mut entries = Vec::new();
            while let Some(name) = p.next_field_name()? {
                p.next_token()?;
                entries.push((name.to_string(), read_value(p)?));
            }
            assert_eq!(p.current_token(), Some(JsonToken::EndObject));
            Value::Object(entries)
        }
        other => panic!("unexpected token {other}"),
    })
}

fn read_document(p: &mut dyn JsonParser) -> Result<Value> {
    p.next_token()?;
    let value = read_value(p)?;
    assert_eq!(p.next_token()?, None);
    Ok(value)
}

/// Property: writing a value and reading it back, through either tokenizer
/// and with any output options, gives the same value, and the text is JSON
/// that `serde_json` accepts.
#[test]
fn generator_parser_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, pretty: bool, escape_non_ascii: bool) -> bool {
        let factory = JsonFactory::new().with_generator_options(GeneratorOptions {
            escape_non_ascii,
            ..GeneratorOptions::default()
        });
        let mut generator = factory.generator_to_string();
        if pretty {
            generator = generator.with_pretty_printer(Box::new(DefaultPrettyPrinter::new()));
        }
        write_value(&mut generator, &value).unwrap();
        let text = generator.into_inner().unwrap();

        if serde_json::from_str::<serde_json::Value>(&text).is_err() {
            return false;
        }
        if escape_non_ascii && !text.is_ascii() {
            return false;
        }
        let from_bytes = read_document(&mut factory.parser_from_slice(text.as_bytes())).unwrap();
        let from_chars = read_document(&mut factory.parser_from_str(&text)).unwrap();
        from_bytes == value && from_chars == value
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value, bool, bool) -> bool);
}

/// Property: copying a token stream event by event reproduces the minimal
/// form of the input exactly.
#[test]
fn copy_events_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let factory = JsonFactory::new();
        let mut generator = factory.generator_to_string();
        write_value(&mut generator, &value).unwrap();
        let original = generator.into_inner().unwrap();

        let mut parser = factory.parser_from_slice(original.as_bytes());
        let mut copy = factory.generator_to_string();
        while parser.next_token().unwrap().is_some() {
            copy.copy_current_event(&mut parser).unwrap();
        }
        copy.into_inner().unwrap() == original
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Value) -> bool);
}
