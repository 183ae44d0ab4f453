//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Database keys are BIGSERIAL, so the wrapper carries an `i64`. The
//! marker parameter prevents mixing a portfolio id into a user lookup
//! at compile time.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::from_i64(42);
/// assert_eq!(id.value(), 42);
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: i64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap an existing database key.
    pub fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key.
    pub fn value(&self) -> i64 {
        self.value
    }
}

// Manual impls: derived Clone/Copy/etc. would require T to implement
// them, but T is only a marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> std::str::FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_i64(s.parse()?))
    }
}

/// Marker types for entity IDs.
pub mod markers {
    /// User account
    pub struct User;
    /// Portfolio owned by a user
    pub struct Portfolio;
    /// Crypto asset catalog entry
    pub struct Asset;
    /// Holding row linking a portfolio to an asset
    pub struct PortfolioAsset;
    /// Buy/sell/transfer record
    pub struct Transaction;
    /// Append-only audit record
    pub struct ActivityLog;
}

/// User account ID
pub type UserId = Id<markers::User>;
/// Portfolio ID
pub type PortfolioId = Id<markers::Portfolio>;
/// Crypto asset ID
pub type AssetId = Id<markers::Asset>;
/// Portfolio holding ID
pub type PortfolioAssetId = Id<markers::PortfolioAsset>;
/// Transaction ID
pub type TransactionId = Id<markers::Transaction>;
/// Activity log entry ID
pub type ActivityLogId = Id<markers::ActivityLog>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = UserId::from_i64(7);
        assert_eq!(id.value(), 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!("7".parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn test_equality_per_marker() {
        let a = PortfolioId::from_i64(1);
        let b = PortfolioId::from_i64(1);
        let c = PortfolioId::from_i64(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<AssetId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = TransactionId::from_i64(99);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "99");
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
