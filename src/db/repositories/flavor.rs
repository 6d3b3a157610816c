use crate::domain::FlavorId;
use crate::entities::{flavors, prelude::*};
use crate::models::flavor::{
    Flavor, FlavorChanges, NewFlavor, SEED_FLAVORS, next_updated_at, truncate_to_micros,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, Unchanged,
};
use tracing::{debug, info};

const MAX_UPDATE_ATTEMPTS: usize = 32;

/// Repository for flavor rows
pub struct FlavorRepository {
    conn: DatabaseConnection,
}

impl FlavorRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: flavors::Model) -> Flavor {
        Flavor {
            id: FlavorId::from_storage(m.id),
            name: m.name,
            is_favorite: m.is_favorite,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    /// Newest first; rows sharing a timestamp fall back to the higher id.
    pub async fn list(&self) -> Result<Vec<Flavor>> {
        let rows = Flavors::find()
            .order_by_desc(flavors::Column::CreatedAt)
            .order_by_desc(flavors::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: FlavorId) -> Result<Option<Flavor>> {
        let row = Flavors::find_by_id(id.value()).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn create(&self, flavor: &NewFlavor) -> Result<Flavor> {
        let now = truncate_to_micros(Utc::now());
        let model = Self::insert_at(&self.conn, flavor, now).await?;
        debug!("Inserted flavor {} ({})", model.id, model.name);
        Ok(model)
    }

    async fn insert_at<C: ConnectionTrait>(
        conn: &C,
        flavor: &NewFlavor,
        at: DateTime<Utc>,
    ) -> Result<Flavor> {
        let active_model = flavors::ActiveModel {
            name: Set(flavor.name.clone()),
            is_favorite: Set(flavor.is_favorite),
            created_at: Set(at),
            updated_at: Set(at),
            ..Default::default()
        };

        let model = active_model.insert(conn).await?;
        Ok(Self::map_model(model))
    }

    /// Replaces name and favorite flag, returning `None` when the row does not exist.
    ///
    /// The write is a single `UPDATE .. RETURNING` guarded on the `updated_at`
    /// that was read, so concurrent writers never hold a lock across statements.
    /// Losing the guard means another write landed first; re-read and go again.
    pub async fn update(&self, id: FlavorId, changes: &FlavorChanges) -> Result<Option<Flavor>> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let Some(existing) = Flavors::find_by_id(id.value()).one(&self.conn).await? else {
                return Ok(None);
            };
            let previous = existing.updated_at;

            let active_model = flavors::ActiveModel {
                id: Unchanged(existing.id),
                name: Set(changes.name.clone()),
                is_favorite: Set(changes.is_favorite),
                updated_at: Set(next_updated_at(previous, Utc::now())),
                ..Default::default()
            };

            match Flavors::update(active_model)
                .filter(flavors::Column::UpdatedAt.eq(previous))
                .exec(&self.conn)
                .await
            {
                Ok(model) => return Ok(Some(Self::map_model(model))),
                Err(DbErr::RecordNotUpdated) => {
                    debug!("Flavor {} changed underneath update (attempt {})", id, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }

        anyhow::bail!("Flavor {id} kept changing, gave up after {MAX_UPDATE_ATTEMPTS} attempts")
    }

    pub async fn delete(&self, id: FlavorId) -> Result<bool> {
        let result = Flavors::delete_by_id(id.value()).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Flavors::find().count(&self.conn).await?;
        Ok(count)
    }

    /// Inserts the sample flavors when the table is empty. Returns the number of rows added.
    ///
    /// The emptiness check and the inserts share one transaction, so a failed
    /// seed leaves the table empty and the next start tries again.
    ///
    /// Each row gets its own timestamp one microsecond after the previous one,
    /// so the last sample is listed first.
    pub async fn seed_if_empty(&self) -> Result<usize> {
        let txn = self.conn.begin().await?;

        if Flavors::find().count(&txn).await? > 0 {
            txn.rollback().await?;
            return Ok(0);
        }

        let base = truncate_to_micros(Utc::now());
        for (offset, (name, is_favorite)) in (0_i64..).zip(SEED_FLAVORS) {
            let at = base + chrono::Duration::microseconds(offset);
            Self::insert_at(&txn, &NewFlavor::new(name, is_favorite), at).await?;
        }

        txn.commit().await?;

        info!("Seeded {} sample flavors", SEED_FLAVORS.len());
        Ok(SEED_FLAVORS.len())
    }
}
