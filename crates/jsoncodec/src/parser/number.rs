//! Classification and coercion of scanned number lexemes.
//!
//! The tokenizer stores every number as its validated text. Values are
//! derived here on demand, so a number that is only copied never gets parsed.

use crate::{
    error::SyntaxError,
    token::{JsonToken, Number},
};

/// Whether the lexeme is `NaN` or a signed or unsigned `Infinity`.
pub(crate) fn is_non_numeric(text: &str) -> bool {
    matches!(text, "NaN" | "Infinity" | "+Infinity" | "-Infinity")
}

/// Builds the value of a validated number lexeme.
pub(crate) fn number_value(text: &str, token: JsonToken, big_decimal: bool) -> Number {
    if token == JsonToken::Int {
        return match text.parse::<i64>() {
            Ok(v) => match i32::try_from(v) {
                Ok(v) => Number::Int(v),
                Err(_) => Number::Long(v),
            },
            Err(_) => Number::BigInteger(text.to_string()),
        };
    }
    if big_decimal && !is_non_numeric(text) {
        return Number::BigDecimal(text.to_string());
    }
    Number::Double(parse_f64(text))
}

fn parse_f64(text: &str) -> f64 {
    // Rust accepts `NaN`, `Infinity` and an optional leading `+`, and
    // saturates out-of-range exponents to infinity or zero.
    text.parse().unwrap_or(f64::NAN)
}

fn out_of_range(target: &'static str) -> SyntaxError {
    SyntaxError::NumberOutOfRange(target)
}

fn integral_f64(v: f64, min: f64, max: f64, target: &'static str) -> Result<f64, SyntaxError> {
    if v.is_finite() && v >= min && v <= max {
        Ok(v.trunc())
    } else {
        Err(out_of_range(target))
    }
}

#[expect(clippy::cast_possible_truncation)]
pub(crate) fn to_i32(value: &Number) -> Result<i32, SyntaxError> {
    match value {
        Number::Int(v) => Ok(*v),
        Number::Long(v) => i32::try_from(*v).map_err(|_| out_of_range("i32")),
        Number::BigInteger(_) => Err(out_of_range("i32")),
        Number::Double(v) => {
            integral_f64(*v, f64::from(i32::MIN), f64::from(i32::MAX), "i32").map(|v| v as i32)
        }
        Number::BigDecimal(s) => to_i32(&Number::Double(parse_f64(s))),
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn to_i64(value: &Number) -> Result<i64, SyntaxError> {
    match value {
        Number::Int(v) => Ok(i64::from(*v)),
        Number::Long(v) => Ok(*v),
        Number::BigInteger(_) => Err(out_of_range("i64")),
        // `i64::MAX as f64` rounds up to 2^63, which is excluded.
        Number::Double(v) if *v >= i64::MAX as f64 => Err(out_of_range("i64")),
        Number::Double(v) => {
            integral_f64(*v, i64::MIN as f64, i64::MAX as f64, "i64").map(|v| v as i64)
        }
        Number::BigDecimal(s) => to_i64(&Number::Double(parse_f64(s))),
    }
}

/// Integral decimal text of a number, truncating any fraction.
pub(crate) fn to_big_integer_text(value: &Number, text: &str) -> Result<String, SyntaxError> {
    match value {
        Number::Int(_) | Number::Long(_) | Number::BigInteger(_) => Ok(text.to_string()),
        Number::Double(v) if v.is_finite() => Ok(format!("{:.0}", v.trunc())),
        Number::Double(_) => Err(out_of_range("BigInteger")),
        Number::BigDecimal(s) => Ok(truncate_decimal_text(s)),
    }
}

/// Truncates plain decimal text (`-12.75` to `-12`). Exponent forms go
/// through `f64`.
fn truncate_decimal_text(s: &str) -> String {
    if s.contains(['e', 'E']) {
        return format!("{:.0}", parse_f64(s).trunc());
    }
    let int_part = s.split('.').next().unwrap_or(s);
    match int_part {
        "-0" | "" | "-" => "0".to_string(),
        _ => int_part.to_string(),
    }
}
