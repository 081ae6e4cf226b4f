use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::PoolError;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared::ValidatedDrink;
use thiserror::Error;
use tracing::debug;

use crate::models::*;
use crate::schema::*;

pub type DbPool = Pool<AsyncPgConnection>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] bb8::RunError<PoolError>),
}

/// Access to the `inventory` table. Every mutating call is atomic: either the
/// whole row change lands or nothing does.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All rows ordered by ascending id.
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<InventoryItem>, StoreError>;

    /// Inserts a new row; the store assigns its id.
    async fn insert(&self, drink: &ValidatedDrink) -> Result<InventoryItem, StoreError>;

    /// Overwrites every column but `id`. `Ok(None)` when no row has that id.
    async fn update(&self, id: i32, drink: &ValidatedDrink)
        -> Result<Option<InventoryItem>, StoreError>;

    /// Returns the number of removed rows (0 or 1).
    async fn delete(&self, id: i32) -> Result<usize, StoreError>;
}

pub struct PgInventoryStore {
    pool: DbPool,
}

impl PgInventoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let mut conn = self.pool.get().await?;

        let items = inventory::table
            .order(inventory::id.asc())
            .select(InventoryItem::as_select())
            .load(&mut conn)
            .await?;
        Ok(items)
    }

    async fn find(&self, id: i32) -> Result<Option<InventoryItem>, StoreError> {
        let mut conn = self.pool.get().await?;

        let item = inventory::table
            .find(id)
            .select(InventoryItem::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(item)
    }

    async fn insert(&self, drink: &ValidatedDrink) -> Result<InventoryItem, StoreError> {
        let mut conn = self.pool.get().await?;
        let row = DrinkRow::from(drink);

        let item = conn
            .transaction::<_, StoreError, _>(|conn| {
                Box::pin(async move {
                    let item = diesel::insert_into(inventory::table)
                        .values(&row)
                        .returning(InventoryItem::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(item)
                })
            })
            .await?;

        debug!("Inserted inventory row {}", item.id);
        Ok(item)
    }

    async fn update(
        &self,
        id: i32,
        drink: &ValidatedDrink,
    ) -> Result<Option<InventoryItem>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row = DrinkRow::from(drink);

        let item = conn
            .transaction::<_, StoreError, _>(|conn| {
                Box::pin(async move {
                    let item = diesel::update(inventory::table.find(id))
                        .set(&row)
                        .returning(InventoryItem::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    Ok(item)
                })
            })
            .await?;

        Ok(item)
    }

    async fn delete(&self, id: i32) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await?;

        let removed = diesel::delete(inventory::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(removed)
    }
}
