//! `PostgreSQL` implementation of the `BasketRepository` trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::debug;

use storefront_basket::domain::basket::{Basket, BasketItem};
use storefront_basket::error::DomainError;
use storefront_basket::repository::BasketRepository;

/// PostgreSQL-backed basket repository.
///
/// A basket spans two tables: the `baskets` row owns its `basket_items`
/// rows. Writes rewrite the item rows wholesale, so the stored state always
/// matches the aggregate that was handed in without per-item change
/// tracking.
#[derive(Debug, Clone)]
pub struct PgBasketRepository {
    pool: PgPool,
}

impl PgBasketRepository {
    /// Creates a new `PgBasketRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, basket_id: i64) -> Result<Vec<BasketItem>, DomainError> {
        let rows = sqlx::query(
            "SELECT catalog_item_id, unit_price, quantity FROM basket_items \
             WHERE basket_id = $1 ORDER BY id",
        )
        .bind(basket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to load basket items: {e}")))?;

        rows.iter().map(row_to_item).collect()
    }

    async fn load_basket(&self, row: &PgRow) -> Result<Basket, DomainError> {
        let basket_id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::Storage(format!("failed to read basket id: {e}")))?;
        let buyer_id: String = row
            .try_get("buyer_id")
            .map_err(|e| DomainError::Storage(format!("failed to read buyer id: {e}")))?;
        let items = self.load_items(basket_id).await?;
        Ok(Basket::rehydrate(basket_id, buyer_id, items))
    }
}

fn row_to_item(row: &PgRow) -> Result<BasketItem, DomainError> {
    let catalog_item_id: i64 = row
        .try_get("catalog_item_id")
        .map_err(|e| DomainError::Storage(format!("failed to read catalog item id: {e}")))?;
    let unit_price: Decimal = row
        .try_get("unit_price")
        .map_err(|e| DomainError::Storage(format!("failed to read unit price: {e}")))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| DomainError::Storage(format!("failed to read quantity: {e}")))?;
    let quantity = u32::try_from(quantity)
        .map_err(|_| DomainError::Storage(format!("stored quantity out of range: {quantity}")))?;
    Ok(BasketItem::new(catalog_item_id, unit_price, quantity))
}

async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    basket_id: i64,
    items: &[BasketItem],
) -> Result<(), DomainError> {
    for item in items {
        sqlx::query(
            "INSERT INTO basket_items (basket_id, catalog_item_id, unit_price, quantity) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(basket_id)
        .bind(item.catalog_item_id())
        .bind(item.unit_price())
        .bind(i64::from(item.quantity()))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to insert basket item: {e}")))?;
    }
    Ok(())
}

#[async_trait]
impl BasketRepository for PgBasketRepository {
    async fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Basket>, DomainError> {
        let row =
            sqlx::query("SELECT id, buyer_id FROM baskets WHERE buyer_id = $1 ORDER BY id LIMIT 1")
                .bind(buyer_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::Storage(format!("failed to query basket by buyer: {e}"))
                })?;

        match row {
            Some(row) => Ok(Some(self.load_basket(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, basket_id: i64) -> Result<Option<Basket>, DomainError> {
        let row = sqlx::query("SELECT id, buyer_id FROM baskets WHERE id = $1")
            .bind(basket_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to query basket by id: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.load_basket(&row).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, basket: Basket) -> Result<Basket, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to begin transaction: {e}")))?;

        // The database assigns the identity; any identity on the incoming
        // basket is ignored.
        let basket_id: i64 =
            sqlx::query_scalar("INSERT INTO baskets (buyer_id) VALUES ($1) RETURNING id")
                .bind(basket.buyer_id())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DomainError::Storage(format!("failed to insert basket: {e}")))?;

        insert_items(&mut tx, basket_id, basket.items()).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to commit transaction: {e}")))?;

        Ok(Basket::rehydrate(
            basket_id,
            basket.buyer_id(),
            basket.items().to_vec(),
        ))
    }

    async fn update(&self, basket: &Basket) -> Result<u64, DomainError> {
        let Some(basket_id) = basket.id() else {
            return Ok(0);
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to begin transaction: {e}")))?;

        let updated = sqlx::query("UPDATE baskets SET buyer_id = $1 WHERE id = $2")
            .bind(basket.buyer_id())
            .bind(basket_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to update basket: {e}")))?;

        if updated.rows_affected() == 0 {
            debug!(basket_id, "basket missing during update");
            return Ok(0);
        }

        sqlx::query("DELETE FROM basket_items WHERE basket_id = $1")
            .bind(basket_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to clear basket items: {e}")))?;

        insert_items(&mut tx, basket_id, basket.items()).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to commit transaction: {e}")))?;

        Ok(updated.rows_affected())
    }

    async fn delete(&self, basket: &Basket) -> Result<u64, DomainError> {
        let Some(basket_id) = basket.id() else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM baskets WHERE id = $1")
            .bind(basket_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to delete basket: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM baskets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to count baskets: {e}")))?;

        u64::try_from(count)
            .map_err(|_| DomainError::Storage(format!("invalid basket count: {count}")))
    }
}
