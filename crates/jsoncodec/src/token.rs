//! Token and number classification shared by tokenizers and generators.

use core::fmt;

/// One lexical unit of JSON as produced by a tokenizer.
///
/// Tokens are plain markers; their payload (text, numeric value, field name)
/// is read through the tokenizer's accessors while the token is current.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonToken {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    String,
    /// An integral number: no fraction and no exponent.
    Int,
    /// A number with a fraction or an exponent, or a non-numeric number
    /// (`NaN`, `Infinity`) when those are enabled.
    Float,
    True,
    False,
    Null,
    /// Opaque binary payload. Never produced by the JSON tokenizers in this
    /// crate, but part of the token model so that other encodings can use it.
    EmbeddedObject,
}

impl JsonToken {
    /// Returns `true` for [`StartObject`] and [`StartArray`].
    ///
    /// [`StartObject`]: JsonToken::StartObject
    /// [`StartArray`]: JsonToken::StartArray
    #[must_use]
    pub fn is_structure_start(self) -> bool {
        matches!(self, Self::StartObject | Self::StartArray)
    }

    /// Returns `true` for [`EndObject`] and [`EndArray`].
    ///
    /// [`EndObject`]: JsonToken::EndObject
    /// [`EndArray`]: JsonToken::EndArray
    #[must_use]
    pub fn is_structure_end(self) -> bool {
        matches!(self, Self::EndObject | Self::EndArray)
    }

    #[must_use]
    pub fn is_scalar_value(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Int
                | Self::Float
                | Self::True
                | Self::False
                | Self::Null
                | Self::EmbeddedObject
        )
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    #[must_use]
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::True | Self::False)
    }

    /// Fixed textual form for tokens that have one.
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::StartObject => Some("{"),
            Self::EndObject => Some("}"),
            Self::StartArray => Some("["),
            Self::EndArray => Some("]"),
            Self::True => Some("true"),
            Self::False => Some("false"),
            Self::Null => Some("null"),
            _ => None,
        }
    }
}

impl fmt::Display for JsonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartObject => "START_OBJECT",
            Self::EndObject => "END_OBJECT",
            Self::StartArray => "START_ARRAY",
            Self::EndArray => "END_ARRAY",
            Self::FieldName => "FIELD_NAME",
            Self::String => "VALUE_STRING",
            Self::Int => "VALUE_NUMBER_INT",
            Self::Float => "VALUE_NUMBER_FLOAT",
            Self::True => "VALUE_TRUE",
            Self::False => "VALUE_FALSE",
            Self::Null => "VALUE_NULL",
            Self::EmbeddedObject => "VALUE_EMBEDDED_OBJECT",
        };
        f.write_str(name)
    }
}

/// The narrowest representation that holds the current numeric token.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    Int,
    Long,
    /// An integer outside the `i64` range, kept as its decimal text.
    BigInteger,
    Double,
    /// A floating point number kept as its decimal text
    /// (`use_big_decimal_for_floats`).
    BigDecimal,
}

/// A numeric value decoded from a number token.
///
/// Arbitrary-precision values are carried as their validated decimal text so
/// that no precision is lost and no big-number library is required.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    BigInteger(String),
    Double(f64),
    BigDecimal(String),
}

impl Number {
    #[must_use]
    pub fn number_type(&self) -> NumberType {
        match self {
            Self::Int(_) => NumberType::Int,
            Self::Long(_) => NumberType::Long,
            Self::BigInteger(_) => NumberType::BigInteger,
            Self::Double(_) => NumberType::Double,
            Self::BigDecimal(_) => NumberType::BigDecimal,
        }
    }

    /// Lossy conversion to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => f64::from(*v),
            #[expect(clippy::cast_precision_loss)]
            Self::Long(v) => *v as f64,
            Self::Double(v) => *v,
            Self::BigInteger(s) | Self::BigDecimal(s) => s.parse().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::BigInteger(s) | Self::BigDecimal(s) => f.write_str(s),
        }
    }
}
