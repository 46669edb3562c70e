#![expect(missing_docs)]

mod common;

use jsoncodec::{
    Base64Variant, DefaultPrettyPrinter, GeneratorOptions, Indenter, JsonFactory, JsonGenerator,
    JsonParser, Result,
};

fn sample(g: &mut dyn JsonGenerator) -> Result<()> {
    g.write_start_object()?;
    g.write_field_name("name")?;
    g.write_string("x")?;
    g.write_field_name("list")?;
    g.write_start_array()?;
    g.write_number_i32(1)?;
    g.write_number_f64(2.5)?;
    g.write_bool(true)?;
    g.write_end_array()?;
    g.write_field_name("empty")?;
    g.write_start_object()?;
    g.write_end_object()?;
    g.write_field_name("none")?;
    g.write_start_array()?;
    g.write_end_array()?;
    g.write_field_name("nested")?;
    g.write_start_object()?;
    g.write_field_name("k")?;
    g.write_null()?;
    g.write_end_object()?;
    g.write_end_object()
}

#[test]
fn minimal_output() {
    let mut generator = JsonFactory::new().generator_to_string();
    sample(&mut generator).unwrap();
    insta::assert_snapshot!(
        generator.into_inner().unwrap(),
        @r#"{"name":"x","list":[1,2.5,true],"empty":{},"none":[],"nested":{"k":null}}"#
    );
}

#[test]
fn default_pretty_output() {
    let mut generator = JsonFactory::new()
        .generator_to_string()
        .with_pretty_printer(Box::new(DefaultPrettyPrinter::new()));
    sample(&mut generator).unwrap();
    insta::assert_snapshot!(generator.into_inner().unwrap(), @r#"
    {
      "name" : "x",
      "list" : [ 1, 2.5, true ],
      "empty" : { },
      "none" : [ ],
      "nested" : {
        "k" : null
      }
    }
    "#);
}

#[test]
fn arrays_on_their_own_lines() {
    let printer = DefaultPrettyPrinter::new().with_array_indenter(Indenter::two_spaces());
    let mut generator = JsonFactory::new()
        .generator_to_string()
        .with_pretty_printer(Box::new(printer));
    generator.write_start_array().unwrap();
    generator.write_number_i32(1).unwrap();
    generator.write_start_array().unwrap();
    generator.write_number_i32(2).unwrap();
    generator.write_end_array().unwrap();
    generator.write_end_array().unwrap();
    assert_eq!(generator.into_inner().unwrap(), "[\n  1,\n  [\n    2\n  ]\n]");
}

#[test]
fn inline_objects() {
    let printer = DefaultPrettyPrinter::new().with_object_indenter(Indenter::FixedSpace);
    let mut generator = JsonFactory::new()
        .generator_to_string()
        .with_pretty_printer(Box::new(printer));
    generator.write_start_object().unwrap();
    generator.write_field_name("a").unwrap();
    generator.write_number_i32(1).unwrap();
    generator.write_field_name("b").unwrap();
    generator.write_number_i32(2).unwrap();
    generator.write_end_object().unwrap();
    assert_eq!(generator.into_inner().unwrap(), r#"{ "a" : 1, "b" : 2 }"#);
}

#[test]
fn byte_and_char_generators_agree() {
    let factory = JsonFactory::new().with_generator_options(GeneratorOptions {
        escape_non_ascii: true,
        ..GeneratorOptions::default()
    });

    let mut to_vec = factory.generator(Vec::new());
    sample(&mut to_vec).unwrap();
    to_vec.write_string("é\u{1F600}\t").unwrap();
    let bytes = to_vec.into_inner().unwrap();

    let mut to_string = factory.generator_to_string();
    sample(&mut to_string).unwrap();
    to_string.write_string("é\u{1F600}\t").unwrap();
    let text = to_string.into_inner().unwrap();

    assert_eq!(bytes, text.as_bytes());
    assert!(text.ends_with(r#"} "\u00E9\uD83D\uDE00\t""#), "{text}");
}

#[test]
fn root_value_separator_option() {
    let factory = JsonFactory::new().with_generator_options(GeneratorOptions {
        root_value_separator: "\n".to_string(),
        ..GeneratorOptions::default()
    });
    let mut generator = factory.generator_to_string();
    generator.write_number_i32(1).unwrap();
    generator.write_start_array().unwrap();
    generator.write_end_array().unwrap();
    generator.write_string("s").unwrap();
    assert_eq!(generator.into_inner().unwrap(), "1\n[]\n\"s\"");
}

#[test]
fn misuse_is_reported_and_recoverable() {
    let mut generator = JsonFactory::new().generator_to_string();
    generator.write_start_object().unwrap();

    let err = generator.write_string("value without a name").unwrap_err();
    assert!(err.is_misuse(), "{err}");
    let err = generator.write_end_array().unwrap_err();
    assert!(err.is_misuse(), "{err}");

    generator.write_field_name("a").unwrap();
    let err = generator.write_field_name("b").unwrap_err();
    assert!(err.is_misuse(), "{err}");
    let err = generator.write_end_object().unwrap_err();
    assert!(err.is_misuse(), "{err}");

    generator.write_number_u64(u64::MAX).unwrap();
    generator.write_end_object().unwrap();
    assert_eq!(generator.into_inner().unwrap(), r#"{"a":18446744073709551615}"#);
}

#[test]
fn close_finishes_open_structures() {
    let mut generator = JsonFactory::new().generator_to_string();
    generator.write_start_array().unwrap();
    generator.write_start_object().unwrap();
    generator.write_field_name("pending").unwrap();
    generator.close().unwrap();
    assert!(generator.is_closed());
    assert!(generator.write_null().is_err());
    assert_eq!(generator.into_inner().unwrap(), r#"[{"pending":null}]"#);
}

#[test]
fn binary_and_raw_values() {
    let mut generator = JsonFactory::new().generator_to_string();
    generator.write_start_array().unwrap();
    generator.write_binary(Base64Variant::Mime, b"hello").unwrap();
    generator.write_raw_value("{\"pre\":1}").unwrap();
    generator.write_number_text("1.000").unwrap();
    generator.write_end_array().unwrap();
    assert_eq!(
        generator.into_inner().unwrap(),
        r#"["aGVsbG8=",{"pre":1},1.000]"#
    );
}

#[test]
fn binary_survives_a_round_trip() {
    let factory = JsonFactory::new();
    let data: Vec<u8> = (0..=255).collect();
    let mut generator = factory.generator_to_bytes();
    generator.write_binary(Base64Variant::Mime, &data).unwrap();
    let encoded = generator.into_inner().unwrap().to_byte_array();

    let mut parser = factory.parser_from_slice(&encoded);
    parser.next_token().unwrap();
    assert_eq!(parser.binary_value(Base64Variant::Mime).unwrap(), data);
}

#[test]
fn copying_reformats() {
    let factory = JsonFactory::new();
    let mut parser = factory.parser_from_str(" { \"a\" : [ 1 , 2.50 ] , \"b\" : \"\\u0041\" } ");
    let mut generator = factory
        .generator_to_string()
        .with_pretty_printer(Box::new(DefaultPrettyPrinter::new()));
    common::copy_all(&mut parser, &mut generator);
    insta::assert_snapshot!(generator.into_inner().unwrap(), @r#"
    {
      "a" : [ 1, 2.50 ],
      "b" : "A"
    }
    "#);
}
