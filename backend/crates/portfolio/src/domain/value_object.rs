//! Value Objects

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalStringError {
    #[error("Amount is required")]
    Empty,
    #[error("Amount must be a positive decimal number")]
    NotADecimal,
    #[error("Amount is too long")]
    TooLong,
}

/// A non-negative decimal carried as its exact string representation.
///
/// Quantities and prices are never parsed into floats; the string the
/// client sent is what gets stored and echoed back, so no precision is
/// lost on assets with many decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecimalString(String);

impl DecimalString {
    const MAX_LEN: usize = 40;

    pub fn new(input: &str) -> Result<Self, DecimalStringError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(DecimalStringError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DecimalStringError::TooLong);
        }

        let mut dots = 0;
        let mut digits = 0;
        for c in trimmed.chars() {
            match c {
                '0'..='9' => digits += 1,
                '.' => dots += 1,
                _ => return Err(DecimalStringError::NotADecimal),
            }
        }
        if digits == 0 || dots > 1 {
            return Err(DecimalStringError::NotADecimal);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Rebuild from a trusted stored value
    pub fn restore(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Buy,
    Sell,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transaction type must be buy, sell or transfer")]
pub struct TxTypeError;

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Buy => "buy",
            TxType::Sell => "sell",
            TxType::Transfer => "transfer",
        }
    }

    pub fn parse(s: &str) -> Result<Self, TxTypeError> {
        match s {
            "buy" => Ok(TxType::Buy),
            "sell" => Ok(TxType::Sell),
            "transfer" => Ok(TxType::Transfer),
            _ => Err(TxTypeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_decimal_strings() {
        for s in ["0", "1", "0.5", "42.123456789", ".5", "5.", "00012"] {
            assert!(DecimalString::new(s).is_ok(), "{s} should be accepted");
        }
    }

    #[test]
    fn test_invalid_decimal_strings() {
        assert_eq!(DecimalString::new("").unwrap_err(), DecimalStringError::Empty);
        assert_eq!(
            DecimalString::new("  ").unwrap_err(),
            DecimalStringError::Empty
        );
        for s in ["-1", "1e5", "1.2.3", "abc", ".", "1,5"] {
            assert_eq!(
                DecimalString::new(s).unwrap_err(),
                DecimalStringError::NotADecimal,
                "{s} should be rejected"
            );
        }
        let long = "1".repeat(41);
        assert_eq!(
            DecimalString::new(&long).unwrap_err(),
            DecimalStringError::TooLong
        );
    }

    #[test]
    fn test_decimal_string_preserved_exactly() {
        let d = DecimalString::new("0.000000001").unwrap();
        assert_eq!(d.as_str(), "0.000000001");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"0.000000001\"");
    }

    #[test]
    fn test_tx_type_parse() {
        assert_eq!(TxType::parse("buy").unwrap(), TxType::Buy);
        assert_eq!(TxType::parse("sell").unwrap(), TxType::Sell);
        assert_eq!(TxType::parse("transfer").unwrap(), TxType::Transfer);
        assert!(TxType::parse("BUY").is_err());
        assert!(TxType::parse("stake").is_err());
    }

    #[test]
    fn test_tx_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TxType::Buy).unwrap(), "\"buy\"");
        let t: TxType = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(t, TxType::Transfer);
    }
}
