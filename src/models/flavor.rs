use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::FlavorId;

/// Maximum length of a flavor name, matching the column width.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flavor {
    pub id: FlavorId,

    pub name: String,

    pub is_favorite: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when inserting a flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlavor {
    pub name: String,
    pub is_favorite: bool,
}

/// Full replacement of the mutable fields. There is no partial merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorChanges {
    pub name: String,
    pub is_favorite: bool,
}

impl NewFlavor {
    #[must_use]
    pub fn new(name: impl Into<String>, is_favorite: bool) -> Self {
        Self {
            name: name.into(),
            is_favorite,
        }
    }
}

impl FlavorChanges {
    #[must_use]
    pub fn new(name: impl Into<String>, is_favorite: bool) -> Self {
        Self {
            name: name.into(),
            is_favorite,
        }
    }
}

/// Rows inserted into an empty table at startup.
pub const SEED_FLAVORS: [(&str, bool); 3] = [
    ("Vanilla", true),
    ("Chocolate", false),
    ("Strawberry", true),
];

/// Timestamp for an update: strictly after the previous `updated_at`.
///
/// SQLite stores microseconds, so the bump is one microsecond.
#[must_use]
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + chrono::Duration::microseconds(1);
    truncate_to_micros(now.max(floor))
}

/// Drops sub-microsecond precision so values survive a storage round-trip unchanged.
#[must_use]
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let micros = ts.timestamp_micros();
    DateTime::from_timestamp_micros(micros).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_updated_at_moves_forward() {
        let created = Utc::now();
        let later = created + chrono::Duration::seconds(2);
        assert_eq!(next_updated_at(created, later), truncate_to_micros(later));
    }

    #[test]
    fn test_next_updated_at_never_equal_or_behind() {
        let created = truncate_to_micros(Utc::now());
        assert!(next_updated_at(created, created) > created);

        let skewed = created - chrono::Duration::seconds(5);
        assert!(next_updated_at(created, skewed) > created);
    }

    #[test]
    fn test_serialized_shape() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let flavor = Flavor {
            id: FlavorId::new(3).unwrap(),
            name: "Pistachio".to_string(),
            is_favorite: true,
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(&flavor).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Pistachio");
        assert_eq!(json["is_favorite"], true);
        assert_eq!(json["created_at"], "2023-11-14T22:13:20Z");
    }
}
