use super::ApiError;
use crate::domain::FlavorId;

/// Parses a path segment into a [`FlavorId`] before anything touches storage.
pub fn parse_flavor_id(raw: &str) -> Result<FlavorId, ApiError> {
    Ok(raw.parse::<FlavorId>()?)
}

pub fn require_name(name: Option<String>) -> Result<String, ApiError> {
    name.ok_or_else(|| ApiError::validation("Flavor name is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flavor_id() {
        assert_eq!(parse_flavor_id("1").unwrap().value(), 1);
        assert_eq!(parse_flavor_id("12345").unwrap().value(), 12345);
        assert!(parse_flavor_id("0").is_err());
        assert!(parse_flavor_id("-1").is_err());
        assert!(parse_flavor_id("vanilla").is_err());
        assert!(parse_flavor_id("1; DROP TABLE flavors").is_err());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name(Some("Mango".into())).unwrap(), "Mango");
        assert!(require_name(None).is_err());
    }
}
