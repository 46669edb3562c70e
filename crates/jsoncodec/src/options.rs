#![allow(clippy::struct_excessive_bools)]

/// Configuration options for the tokenizers.
///
/// Every `allow_*` flag enables one deviation from strict RFC 8259 JSON.
///
/// # Examples
///
/// ```rust
/// use jsoncodec::{JsonFactory, JsonParser, JsonToken, ParserOptions};
///
/// let factory = JsonFactory::new().with_parser_options(ParserOptions {
///     allow_comments: true,
///     allow_trailing_comma: true,
///     ..Default::default()
/// });
/// let mut parser = factory.parser_from_str("[1, /* two */ 2,]");
/// assert_eq!(parser.next_token().unwrap(), Some(JsonToken::StartArray));
/// ```
///
/// # Default
///
/// All options default to `false`, except `canonicalize_field_names` which
/// defaults to `true`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to skip C-style (`/* ... */`) and C++-style (`// ...`)
    /// comments wherever whitespace is allowed.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether to skip YAML-style comments (`# ...` to end of line).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_yaml_comments: bool,

    /// Whether object field names may be written without quotes.
    ///
    /// Unquoted names consist of ASCII letters, digits, `_`, `$` and any
    /// non-ASCII character, and may not start with a digit.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unquoted_field_names: bool,

    /// Whether strings and field names may be enclosed in `'` instead of `"`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_single_quotes: bool,

    /// Whether control characters (U+0000 to U+001F) may appear unescaped
    /// inside strings.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unquoted_control_chars: bool,

    /// Whether a backslash may escape any character, which then stands for
    /// itself (`"\q"` is `"q"`).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_backslash_escaping_any_character: bool,

    /// Whether integers may carry leading zeros (`007`). The zeros are
    /// dropped from the number's text.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_zeros: bool,

    /// Whether `NaN`, `Infinity`, `+Infinity` and `-Infinity` are accepted
    /// as floating point numbers.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_non_numeric_numbers: bool,

    /// Whether a single trailing comma may precede `]` or `}`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_comma: bool,

    /// Whether input containing nothing but whitespace (or comments) is
    /// accepted as an empty token stream instead of an error.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_empty_content: bool,

    /// Whether anything after the first root value, other than whitespace,
    /// is an error.
    ///
    /// When `false`, several whitespace-separated root values may follow each
    /// other, as in JSON Lines.
    ///
    /// # Default
    ///
    /// `false`
    pub require_single_root_value: bool,

    /// Whether floating point numbers are reported as
    /// [`NumberType::BigDecimal`](crate::NumberType::BigDecimal) rather than
    /// `Double`.
    ///
    /// # Default
    ///
    /// `false`
    pub use_big_decimal_for_floats: bool,

    /// Whether field names are interned through the factory's symbol tables
    /// so that repeated names share one allocation.
    ///
    /// # Default
    ///
    /// `true`
    pub canonicalize_field_names: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_comments: false,
            allow_yaml_comments: false,
            allow_unquoted_field_names: false,
            allow_single_quotes: false,
            allow_unquoted_control_chars: false,
            allow_backslash_escaping_any_character: false,
            allow_leading_zeros: false,
            allow_non_numeric_numbers: false,
            allow_trailing_comma: false,
            allow_empty_content: false,
            require_single_root_value: false,
            use_big_decimal_for_floats: false,
            canonicalize_field_names: true,
        }
    }
}

/// Configuration options for the generators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Whether field names are enclosed in quotes.
    ///
    /// # Default
    ///
    /// `true`
    pub quote_field_names: bool,

    /// Whether `NaN` and the infinities are written as quoted strings.
    /// Unquoted they are not valid JSON.
    ///
    /// # Default
    ///
    /// `true`
    pub quote_non_numeric_numbers: bool,

    /// Whether every number is written as a quoted string.
    ///
    /// # Default
    ///
    /// `false`
    pub write_numbers_as_strings: bool,

    /// Whether characters outside ASCII are written as `\uXXXX` escapes
    /// (surrogate pairs above U+FFFF).
    ///
    /// # Default
    ///
    /// `false`
    pub escape_non_ascii: bool,

    /// Whether `close` writes the end markers of structures that are still
    /// open.
    ///
    /// # Default
    ///
    /// `true`
    pub auto_close_content: bool,

    /// Separator written between consecutive root values by the minimal
    /// pretty printer.
    ///
    /// # Default
    ///
    /// `" "`
    pub root_value_separator: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            quote_field_names: true,
            quote_non_numeric_numbers: true,
            write_numbers_as_strings: false,
            escape_non_ascii: false,
            auto_close_content: true,
            root_value_separator: " ".to_string(),
        }
    }
}

/// Resource bounds applied to every tokenizer and generator.
///
/// Exceeding a bound yields [`LimitError`](crate::LimitError).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamLimits {
    /// Maximum number of open arrays and objects.
    ///
    /// # Default
    ///
    /// `1000`
    pub max_nesting_depth: usize,

    /// Maximum length of a number's text, in bytes.
    ///
    /// # Default
    ///
    /// `1000`
    pub max_number_length: usize,

    /// Maximum length of a decoded string value, in bytes.
    ///
    /// # Default
    ///
    /// `20_000_000`
    pub max_string_length: usize,

    /// Maximum length of a decoded field name, in bytes.
    ///
    /// # Default
    ///
    /// `50_000`
    pub max_name_length: usize,

    /// Maximum number of distinct field names one tokenizer may intern.
    ///
    /// # Default
    ///
    /// `1_000_000`
    pub max_symbol_count: usize,

    /// Largest symbol table that is still merged back into the shared root
    /// table when a tokenizer closes. Larger tables are discarded.
    ///
    /// # Default
    ///
    /// `12_000`
    pub max_entries_for_reuse: usize,
}

impl Default for StreamLimits {
    fn default() -> Self {
        Self {
            max_nesting_depth: 1000,
            max_number_length: 1000,
            max_string_length: 20_000_000,
            max_name_length: 50_000,
            max_symbol_count: 1_000_000,
            max_entries_for_reuse: 12_000,
        }
    }
}
