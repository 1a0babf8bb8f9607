//! Numeric fields that may arrive as JSON numbers or numeric strings
//!
//! ripgrep builds differ in how they encode counters and offsets, so every
//! numeric field is read through these helpers with
//! `#[serde(deserialize_with = "...")]`. `42` and `"42"` decode to the same value.

use super::DecodeError;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parse an unsigned integer from its textual encoding
///
/// # Errors
///
/// Returns `DecodeError::InvalidNumber` if the text is not a non-negative integer.
pub fn parse_u64(text: &str) -> Result<u64, DecodeError> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| DecodeError::InvalidNumber(text.to_string()))
}

struct U64Visitor;

impl Visitor<'_> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or a string containing one")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
        // Only whole values survive the trip without loss
        if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
            Ok(v as u64)
        } else {
            Err(E::custom(format!("{v} is not a whole number")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_u64(v).map_err(E::custom)
    }
}

/// Deserialize a `u64` from a number or a numeric string
///
/// # Errors
///
/// Fails when the value is neither a non-negative integer nor a string holding one.
pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(U64Visitor)
}

/// Deserialize an optional `u64`, mapping `null` to `None`
///
/// # Errors
///
/// Fails when a present value is not a valid number.
pub fn option_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("null, an integer or a numeric string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            u64(d).map(Some)
        }
    }

    deserializer.deserialize_option(OptionVisitor)
}
