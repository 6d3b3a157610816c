//! Domain service for the flavor catalogue.
//!
//! Handlers talk to [`FlavorService`] only, so the router can run against the
//! `SeaORM` store in production and against [`MemoryFlavorService`] in tests.
//!
//! [`MemoryFlavorService`]: crate::services::MemoryFlavorService

use crate::domain::FlavorId;
use crate::models::flavor::{Flavor, FlavorChanges, MAX_NAME_LEN, NewFlavor};
use thiserror::Error;

/// Errors surfaced by flavor operations.
#[derive(Debug, Error)]
pub enum FlavorError {
    #[error("Flavor not found: {0}")]
    NotFound(FlavorId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FlavorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FlavorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for flavors.
#[async_trait::async_trait]
pub trait FlavorService: Send + Sync {
    /// Lists every flavor, newest first.
    async fn list(&self) -> Result<Vec<Flavor>, FlavorError>;

    /// Fetches a single flavor.
    async fn get(&self, id: FlavorId) -> Result<Flavor, FlavorError>;

    async fn create(&self, flavor: NewFlavor) -> Result<Flavor, FlavorError>;

    /// Overwrites name and favorite flag and refreshes `updated_at`.
    async fn update(&self, id: FlavorId, changes: FlavorChanges) -> Result<Flavor, FlavorError>;

    /// Removes a flavor. Returns `false` if nothing matched; that is not an error.
    async fn delete(&self, id: FlavorId) -> Result<bool, FlavorError>;

    async fn count(&self) -> Result<u64, FlavorError>;

    /// Reports whether the backing store is reachable.
    async fn ping(&self) -> Result<(), FlavorError>;
}

/// Trims the name and checks it fits the column.
pub fn normalize_name(name: &str) -> Result<String, FlavorError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(FlavorError::Validation(
            "Flavor name cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(FlavorError::Validation(format!(
            "Flavor name must be {MAX_NAME_LEN} characters or less"
        )));
    }

    Ok(trimmed.to_string())
}
