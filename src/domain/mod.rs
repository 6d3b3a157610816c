//! Domain primitives for the flavor catalogue.
//!
//! Identifiers are wrapped in newtypes so a raw path segment can never reach
//! the storage layer without being parsed first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a Flavor row.
///
/// # Examples
///
/// ```rust
/// use flavor_api::domain::FlavorId;
///
/// let id: FlavorId = "42".parse().unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert!("abc".parse::<FlavorId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlavorId(i32);

/// Reasons a raw identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFlavorId {
    #[error("Invalid flavor ID '{0}': expected a positive integer")]
    NotANumber(String),

    #[error("Invalid flavor ID {0}: ID must be a positive integer")]
    NotPositive(i64),
}

impl FlavorId {
    /// Creates a `FlavorId`, rejecting zero and negative values.
    pub const fn new(id: i32) -> Result<Self, InvalidFlavorId> {
        if id <= 0 {
            return Err(InvalidFlavorId::NotPositive(id as i64));
        }
        Ok(Self(id))
    }

    /// Wraps an id that came back from storage.
    #[must_use]
    pub(crate) const fn from_storage(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl FromStr for FlavorId {
    type Err = InvalidFlavorId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidFlavorId::NotANumber(s.to_string()))?;

        if raw <= 0 {
            return Err(InvalidFlavorId::NotPositive(raw));
        }

        i32::try_from(raw)
            .map(Self)
            .map_err(|_| InvalidFlavorId::NotANumber(s.to_string()))
    }
}

impl fmt::Display for FlavorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FlavorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for FlavorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Self::new(id).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert_eq!("1".parse::<FlavorId>().unwrap().value(), 1);
        assert_eq!(" 17 ".parse::<FlavorId>().unwrap().value(), 17);
        assert_eq!(
            i32::MAX.to_string().parse::<FlavorId>().unwrap().value(),
            i32::MAX
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            "abc".parse::<FlavorId>(),
            Err(InvalidFlavorId::NotANumber("abc".to_string()))
        );
        assert!("1.5".parse::<FlavorId>().is_err());
        assert!("".parse::<FlavorId>().is_err());
        assert!("99999999999".parse::<FlavorId>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!("0".parse::<FlavorId>(), Err(InvalidFlavorId::NotPositive(0)));
        assert_eq!(
            "-3".parse::<FlavorId>(),
            Err(InvalidFlavorId::NotPositive(-3))
        );
        assert!(FlavorId::new(0).is_err());
    }

    #[test]
    fn test_serde_roundtrip_as_plain_integer() {
        let id = FlavorId::new(5).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
        assert!(serde_json::from_str::<FlavorId>("-1").is_err());
    }
}
