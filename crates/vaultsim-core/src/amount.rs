//! Serde adapter for on-chain amounts
//!
//! Amounts are 256-bit-or-wider integers, which JSON numbers cannot carry, so they are
//! written as base-10 strings. Reading accepts base-10 strings, `0x`-prefixed hex
//! strings and plain JSON integers.

use std::fmt;

use num_bigint::BigUint;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&value.to_str_radix(10))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
  deserializer.deserialize_any(AmountVisitor)
}

/// Parse an amount from its textual form
pub fn parse(text: &str) -> Option<BigUint> {
  let text = text.trim();
  match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
    Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
    None => BigUint::parse_bytes(text.replace('_', "").as_bytes(), 10),
  }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
  type Value = BigUint;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a non-negative integer or an integer string")
  }

  fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigUint, E> {
    Ok(BigUint::from(value))
  }

  fn visit_u128<E: de::Error>(self, value: u128) -> Result<BigUint, E> {
    Ok(BigUint::from(value))
  }

  fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigUint, E> {
    u64::try_from(value)
      .map(BigUint::from)
      .map_err(|_| E::custom(format!("amount cannot be negative: {value}")))
  }

  fn visit_str<E: de::Error>(self, value: &str) -> Result<BigUint, E> {
    parse(value).ok_or_else(|| E::custom(format!("invalid amount `{value}`")))
  }
}
