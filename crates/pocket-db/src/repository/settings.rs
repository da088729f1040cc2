//! # Settings Repository
//!
//! A small text key/value table. Holds the profitability screen's two text
//! fields and the order id counter.
//!
//! ## Keys
//! ```text
//! profit.purchase_price   raw text of the purchase price field
//! profit.sale_price       raw text of the sale price field
//! orders.next_id          next order id (decimal u64)
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use pocket_core::PriceInputs;

pub const PURCHASE_PRICE_KEY: &str = "profit.purchase_price";
pub const SALE_PRICE_KEY: &str = "profit.sale_price";
pub const NEXT_ORDER_ID_KEY: &str = "orders.next_id";

/// Repository for the `settings` table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads a value. Missing keys are `None`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let mut conn = self.pool.acquire().await?;
        fetch_value(&mut conn, key).await
    }

    /// Inserts or replaces a value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        upsert_value(&mut conn, key, value).await
    }

    /// Deletes a value. Returns whether the key existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads the profitability fields. Missing keys read as empty text.
    pub async fn price_inputs(&self) -> DbResult<PriceInputs> {
        let mut conn = self.pool.acquire().await?;
        fetch_price_inputs(&mut conn).await
    }

    /// Saves whichever profitability fields are given, exactly as typed, and
    /// returns both fields as stored.
    ///
    /// A `None` field is neither read from memory nor written, so a value
    /// saved by another `pocket` process survives.
    pub async fn update_price_inputs(
        &self,
        purchase_price: Option<&str>,
        sale_price: Option<&str>,
    ) -> DbResult<PriceInputs> {
        let mut tx = self.pool.begin().await?;

        if let Some(text) = purchase_price {
            upsert_value(&mut tx, PURCHASE_PRICE_KEY, text).await?;
        }
        if let Some(text) = sale_price {
            upsert_value(&mut tx, SALE_PRICE_KEY, text).await?;
        }
        let inputs = fetch_price_inputs(&mut tx).await?;

        tx.commit().await?;
        Ok(inputs)
    }
}

async fn fetch_value(conn: &mut SqliteConnection, key: &str) -> DbResult<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(value)
}

async fn upsert_value(conn: &mut SqliteConnection, key: &str, value: &str) -> DbResult<()> {
    debug!(key = %key, "Saving setting");

    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn fetch_price_inputs(conn: &mut SqliteConnection) -> DbResult<PriceInputs> {
    let mut inputs = PriceInputs::new();
    if let Some(purchase) = fetch_value(conn, PURCHASE_PRICE_KEY).await? {
        inputs.set_purchase_price(purchase);
    }
    if let Some(sale) = fetch_value(conn, SALE_PRICE_KEY).await? {
        inputs.set_sale_price(sale);
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> SettingsRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().settings()
    }

    #[tokio::test]
    async fn test_get_set_delete() {
        let settings = repo().await;

        assert_eq!(settings.get("missing").await.unwrap(), None);

        settings.set("k", "one").await.unwrap();
        settings.set("k", "two").await.unwrap();
        assert_eq!(settings.get("k").await.unwrap().as_deref(), Some("two"));

        assert!(settings.delete("k").await.unwrap());
        assert!(!settings.delete("k").await.unwrap());
        assert_eq!(settings.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_price_inputs_are_kept_verbatim() {
        let settings = repo().await;
        assert_eq!(settings.price_inputs().await.unwrap(), PriceInputs::new());

        let saved = settings
            .update_price_inputs(Some("100"), Some("abc"))
            .await
            .unwrap();
        assert_eq!(saved.purchase_price, "100");
        assert_eq!(saved.sale_price, "abc");

        let loaded = settings.price_inputs().await.unwrap();
        assert_eq!(loaded, saved);
        // An unreadable sale counts as 0, so the whole cost is lost
        assert_eq!(loaded.compute_profit(), -1000.0);
    }

    #[tokio::test]
    async fn test_update_leaves_the_other_field_alone() {
        let settings = repo().await;
        settings.update_price_inputs(Some("100"), None).await.unwrap();

        let inputs = settings.update_price_inputs(None, Some("150")).await.unwrap();
        assert_eq!(inputs.purchase_price, "100");
        assert_eq!(inputs.compute_profit(), 500.0);
    }
}
