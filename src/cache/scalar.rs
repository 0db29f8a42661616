//! Scalar Value Module
//!
//! The value types the entry store accepts: text, binary, integer and
//! floating-point. Byte encoding mirrors how a string-typed KV store holds
//! them (numbers as decimal text), so a value written as an integer reads
//! back through the integer decoder unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Scalar ==
/// A storable scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
}

impl Scalar {
    /// Encodes the value into the byte form written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Scalar::Text(s) => s.as_bytes().to_vec(),
            Scalar::Binary(b) => b.clone(),
            Scalar::Int(n) => n.to_string().into_bytes(),
            Scalar::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(b: Vec<u8>) -> Self {
        Scalar::Binary(b)
    }
}

impl From<&[u8]> for Scalar {
    fn from(b: &[u8]) -> Self {
        Scalar::Binary(b.to_vec())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

// == Typed Decoders ==
/// Decodes stored bytes as UTF-8 text.
pub fn decode_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| CacheError::Decode(format!("invalid utf-8: {e}")))
}

/// Decodes stored bytes as a decimal integer.
pub fn decode_int(bytes: Vec<u8>) -> Result<i64> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|_| CacheError::Decode(format!("not an integer: '{text}'")))
}

/// Decodes stored bytes as a decimal floating-point number.
pub fn decode_float(bytes: Vec<u8>) -> Result<f64> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|_| CacheError::Decode(format!("not a float: '{text}'")))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text_bytes() {
        assert_eq!(Scalar::from("hello").to_bytes(), b"hello");
    }

    #[test]
    fn test_scalar_int_bytes_decimal() {
        assert_eq!(Scalar::Int(-42).to_bytes(), b"-42");
    }

    #[test]
    fn test_scalar_binary_bytes_raw() {
        let payload = vec![0u8, 159, 146, 150];
        assert_eq!(Scalar::Binary(payload.clone()).to_bytes(), payload);
    }

    #[test]
    fn test_decode_text_round_trip() {
        let bytes = Scalar::from("héllo").to_bytes();
        assert_eq!(decode_text(bytes).unwrap(), "héllo");
    }

    #[test]
    fn test_decode_text_invalid_utf8() {
        let result = decode_text(vec![0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_int_round_trip() {
        let bytes = Scalar::Int(1234).to_bytes();
        assert_eq!(decode_int(bytes).unwrap(), 1234);
    }

    #[test]
    fn test_decode_int_rejects_text() {
        let result = decode_int(b"forty-two".to_vec());
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_float_round_trip() {
        let bytes = Scalar::Float(2.5).to_bytes();
        assert_eq!(decode_float(bytes).unwrap(), 2.5);
    }

    #[test]
    fn test_scalar_canonical_json_is_tagged() {
        let json = serde_json::to_string(&Scalar::from("foo")).unwrap();
        assert_eq!(json, r#"{"text":"foo"}"#);

        let json = serde_json::to_string(&Scalar::Int(7)).unwrap();
        assert_eq!(json, r#"{"int":7}"#);
    }
}
