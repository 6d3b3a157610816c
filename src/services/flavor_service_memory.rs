//! In-memory `FlavorService` used to exercise the HTTP layer without a database.

use crate::domain::FlavorId;
use crate::models::flavor::{
    Flavor, FlavorChanges, NewFlavor, SEED_FLAVORS, next_updated_at, truncate_to_micros,
};
use crate::services::flavor_service::{FlavorError, FlavorService, normalize_name};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<FlavorId, Flavor>,
}

impl Table {
    fn insert(&mut self, name: String, is_favorite: bool) -> Result<Flavor, FlavorError> {
        self.next_id += 1;
        let id =
            FlavorId::new(self.next_id).map_err(|e| FlavorError::Database(e.to_string()))?;

        // Keep creation times strictly increasing so ordering is deterministic.
        let now = truncate_to_micros(Utc::now());
        let created_at = self
            .rows
            .values()
            .map(|f| f.created_at)
            .max()
            .map_or(now, |latest| next_updated_at(latest, now));

        let row = Flavor {
            id,
            name,
            is_favorite,
            created_at,
            updated_at: created_at,
        };
        self.rows.insert(id, row.clone());
        Ok(row)
    }
}

#[derive(Default)]
pub struct MemoryFlavorService {
    table: RwLock<Table>,
    offline: AtomicBool,
}

impl MemoryFlavorService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the same sample rows the database gets on first boot.
    pub fn seeded() -> Result<Self, FlavorError> {
        let mut table = Table::default();
        for (name, is_favorite) in SEED_FLAVORS {
            table.insert(normalize_name(name)?, is_favorite)?;
        }

        Ok(Self {
            table: RwLock::new(table),
            ..Self::default()
        })
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), FlavorError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(FlavorError::Database("store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FlavorService for MemoryFlavorService {
    async fn list(&self) -> Result<Vec<Flavor>, FlavorError> {
        self.check_online()?;
        let table = self.table.read().await;

        let mut rows: Vec<Flavor> = table.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn get(&self, id: FlavorId) -> Result<Flavor, FlavorError> {
        self.check_online()?;
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(FlavorError::NotFound(id))
    }

    async fn create(&self, flavor: NewFlavor) -> Result<Flavor, FlavorError> {
        self.check_online()?;
        let name = normalize_name(&flavor.name)?;

        self.table.write().await.insert(name, flavor.is_favorite)
    }

    async fn update(&self, id: FlavorId, changes: FlavorChanges) -> Result<Flavor, FlavorError> {
        self.check_online()?;
        let name = normalize_name(&changes.name)?;

        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(FlavorError::NotFound(id))?;
        row.name = name;
        row.is_favorite = changes.is_favorite;
        row.updated_at = next_updated_at(row.updated_at, Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: FlavorId) -> Result<bool, FlavorError> {
        self.check_online()?;
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, FlavorError> {
        self.check_online()?;
        Ok(self.table.read().await.rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), FlavorError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_contents() {
        let service = MemoryFlavorService::seeded().unwrap();
        let rows = service.list().await.unwrap();
        let names: Vec<_> = rows.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Strawberry", "Chocolate", "Vanilla"]);

        // Seed rows share the id sequence with later inserts.
        let next = service
            .create(NewFlavor::new("Rocky Road", false))
            .await
            .unwrap();
        assert_eq!(next.id.value(), 4);
        assert_eq!(service.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_list_after_inserts_and_deletes() {
        let service = MemoryFlavorService::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let f = service
                .create(NewFlavor::new(format!("Flavor {i}"), i % 2 == 0))
                .await
                .unwrap();
            ids.push(f.id);
        }
        service.delete(ids[1]).await.unwrap();
        service.delete(ids[3]).await.unwrap();

        let rows = service.list().await.unwrap();
        assert_eq!(rows.len(), 3);
        for pair in rows.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_offline_fails_everything() {
        let service = MemoryFlavorService::seeded().unwrap();
        service.set_offline(true);
        assert!(matches!(service.list().await, Err(FlavorError::Database(_))));
        assert!(service.ping().await.is_err());

        service.set_offline(false);
        assert!(service.ping().await.is_ok());
    }
}
