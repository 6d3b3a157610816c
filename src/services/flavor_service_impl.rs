//! `SeaORM` implementation of the `FlavorService` trait.

use crate::db::Store;
use crate::domain::FlavorId;
use crate::models::flavor::{Flavor, FlavorChanges, NewFlavor};
use crate::services::flavor_service::{FlavorError, FlavorService, normalize_name};
use async_trait::async_trait;

pub struct SeaOrmFlavorService {
    store: Store,
}

impl SeaOrmFlavorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FlavorService for SeaOrmFlavorService {
    async fn list(&self) -> Result<Vec<Flavor>, FlavorError> {
        Ok(self.store.list_flavors().await?)
    }

    async fn get(&self, id: FlavorId) -> Result<Flavor, FlavorError> {
        self.store
            .get_flavor(id)
            .await?
            .ok_or(FlavorError::NotFound(id))
    }

    async fn create(&self, flavor: NewFlavor) -> Result<Flavor, FlavorError> {
        let flavor = NewFlavor {
            name: normalize_name(&flavor.name)?,
            ..flavor
        };

        Ok(self.store.create_flavor(&flavor).await?)
    }

    async fn update(&self, id: FlavorId, changes: FlavorChanges) -> Result<Flavor, FlavorError> {
        let changes = FlavorChanges {
            name: normalize_name(&changes.name)?,
            ..changes
        };

        self.store
            .update_flavor(id, &changes)
            .await?
            .ok_or(FlavorError::NotFound(id))
    }

    async fn delete(&self, id: FlavorId) -> Result<bool, FlavorError> {
        Ok(self.store.delete_flavor(id).await?)
    }

    async fn count(&self) -> Result<u64, FlavorError> {
        Ok(self.store.count_flavors().await?)
    }

    async fn ping(&self) -> Result<(), FlavorError> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmFlavorService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmFlavorService::new(store)
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service().await;
        let id = FlavorId::new(42).unwrap();
        assert!(matches!(
            service.get(id).await,
            Err(FlavorError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = service().await;
        let result = service.create(NewFlavor::new("   ", true)).await;
        assert!(matches!(result, Err(FlavorError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_pistachio() {
        let service = service().await;
        let created = service
            .create(NewFlavor::new("Pistachio", true))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Pistachio");
        assert!(fetched.is_favorite);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service().await;
        let id = FlavorId::new(7).unwrap();
        let result = service.update(id, FlavorChanges::new("Rum", false)).await;
        assert!(matches!(result, Err(FlavorError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let service = service().await;
        service.create(NewFlavor::new("Peach", false)).await.unwrap();

        let removed = service.delete(FlavorId::new(1000).unwrap()).await.unwrap();
        assert!(!removed);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
