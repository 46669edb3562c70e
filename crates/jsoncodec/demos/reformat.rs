//! Reformats a JSON document (or a stream of root values) read from a file
//! or from standard input.
//!
//! Every token is copied straight from the tokenizer into a generator, so
//! documents of any size are reformatted in constant memory and numbers keep
//! their exact text.
//!
//! Run with
//!
//! ```bash
//! echo '{"a":[1,2],"b":{"c":null}}' | cargo run -p jsoncodec --example reformat
//! cargo run -p jsoncodec --example reformat -- --compact --lenient input.json
//! ```
//!
//! Flags:
//!
//! * `--compact` writes minimal output instead of the indented default.
//! * `--lenient` accepts comments, unquoted and single-quoted names, trailing
//!   commas and `NaN`/`Infinity`.
//! * `--ascii` escapes everything outside ASCII.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    process::ExitCode,
};

use jsoncodec::{
    DefaultPrettyPrinter, GeneratorOptions, JsonFactory, JsonGenerator, JsonParser, ParserOptions,
};

struct Args {
    compact: bool,
    lenient: bool,
    ascii: bool,
    path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        compact: false,
        lenient: false,
        ascii: false,
        path: None,
    };
    for arg in std::env::args().skip(1) {
        if let Some(flag) = arg.strip_prefix("--") {
            match flag {
                "compact" => args.compact = true,
                "lenient" => args.lenient = true,
                "ascii" => args.ascii = true,
                _ => return Err(format!("unknown flag {arg}")),
            }
        } else if args.path.is_some() {
            return Err("only one input file is supported".to_string());
        } else {
            args.path = Some(arg);
        }
    }
    Ok(args)
}

fn reformat(args: &Args, input: impl Read, output: impl Write) -> jsoncodec::Result<()> {
    let parser_options = if args.lenient {
        ParserOptions {
            allow_comments: true,
            allow_yaml_comments: true,
            allow_unquoted_field_names: true,
            allow_single_quotes: true,
            allow_trailing_comma: true,
            allow_non_numeric_numbers: true,
            ..ParserOptions::default()
        }
    } else {
        ParserOptions::default()
    };
    let factory = JsonFactory::new()
        .with_parser_options(parser_options)
        .with_generator_options(GeneratorOptions {
            escape_non_ascii: args.ascii,
            root_value_separator: "\n".to_string(),
            ..GeneratorOptions::default()
        });

    let mut parser = factory.parser_from_reader(input);
    let mut generator = factory.generator(output);
    if !args.compact {
        generator = generator.with_pretty_printer(Box::new(
            DefaultPrettyPrinter::new().with_root_value_separator("\n"),
        ));
    }

    while parser.next_token()?.is_some() {
        generator.copy_current_event(&mut parser)?;
    }
    generator.write_raw("\n")?;
    generator.into_inner()?.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("reformat: {message}");
            eprintln!("usage: reformat [--compact] [--lenient] [--ascii] [FILE]");
            return ExitCode::from(2);
        }
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let result = match &args.path {
        Some(path) => match File::open(path) {
            Ok(file) => reformat(&args, file, stdout),
            Err(err) => {
                eprintln!("reformat: {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => reformat(&args, io::stdin().lock(), stdout),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("reformat: {err}");
            ExitCode::FAILURE
        }
    }
}
