//! # Order Repository
//!
//! Persists the orders screen: the list itself plus the id counter.
//!
//! ## Keeping the Counter in Step
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append(apartment, description)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    SELECT orders + settings['orders.next_id']   (book as stored now)    │
//! │    book.add_order(...)                          (blank → Rejected)      │
//! │    INSERT INTO orders ...                       (the new row)           │
//! │    UPSERT settings['orders.next_id']            (counter after it)      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The book is always read inside the write transaction, so two `pocket` │
//! │  processes sharing a data dir never hand out the same id.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::settings::NEXT_ORDER_ID_KEY;
use pocket_core::{Order, OrderBook};

/// Row shape of the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    apartment: String,
    description: String,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| DbError::corrupt("orders.id", row.id))?;
        Ok(Order::new(row.apartment, row.description, id))
    }
}

fn to_sql_id(id: u64) -> DbResult<i64> {
    i64::try_from(id).map_err(|_| DbError::Internal(format!("order id {id} out of range")))
}

/// Repository for the `orders` table.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists stored orders in insertion (id) order.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let mut conn = self.pool.acquire().await?;
        fetch_orders(&mut conn).await
    }

    /// Adds an order to the stored book.
    ///
    /// Returns the new order and the book after it. A blank field is
    /// `DbError::Rejected` and nothing is written.
    pub async fn append(&self, apartment: &str, description: &str) -> DbResult<(Order, OrderBook)> {
        let mut tx = self.pool.begin().await?;

        let mut book = fetch_book(&mut tx).await?;
        let order = book.add_order(apartment, description)?;
        debug!(id = order.id, apartment = %order.apartment, "Inserting order");

        insert_row(&mut tx, &order).await?;
        upsert_next_id(&mut tx, book.next_id()).await?;

        tx.commit().await?;
        Ok((order, book))
    }

    /// Removes an order by id. Returns the removed order and the book
    /// after it.
    pub async fn remove(&self, id: u64) -> DbResult<(Order, OrderBook)> {
        let mut tx = self.pool.begin().await?;

        let mut book = fetch_book(&mut tx).await?;
        let removed = book
            .remove_by_id(id)
            .map_err(|_| DbError::not_found("Order", id))?;

        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(to_sql_id(id)?)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id, "Deleted order");
        Ok((removed, book))
    }

    /// Deletes every order. The counter is left alone.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM orders").execute(&self.pool).await?;
        info!(removed = result.rows_affected(), "Cleared orders");
        Ok(result.rows_affected())
    }

    /// Reads the stored id counter (0 when never saved).
    pub async fn next_id(&self) -> DbResult<u64> {
        let mut conn = self.pool.acquire().await?;
        fetch_next_id(&mut conn).await
    }

    /// Loads the whole orders screen as an [`OrderBook`].
    pub async fn load_book(&self) -> DbResult<OrderBook> {
        let mut conn = self.pool.acquire().await?;
        let book = fetch_book(&mut conn).await?;

        debug!(count = book.len(), next_id = book.next_id(), "Loaded order book");
        Ok(book)
    }
}

// =============================================================================
// Statements
// =============================================================================

async fn fetch_orders(conn: &mut SqliteConnection) -> DbResult<Vec<Order>> {
    let rows: Vec<OrderRow> =
        sqlx::query_as("SELECT id, apartment, description, created_at FROM orders ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

    rows.into_iter().map(Order::try_from).collect()
}

async fn fetch_next_id(conn: &mut SqliteConnection) -> DbResult<u64> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
        .bind(NEXT_ORDER_ID_KEY)
        .fetch_optional(&mut *conn)
        .await?;

    match value {
        None => Ok(0),
        Some(text) => text
            .parse()
            .map_err(|_| DbError::corrupt(NEXT_ORDER_ID_KEY, text)),
    }
}

async fn fetch_book(conn: &mut SqliteConnection) -> DbResult<OrderBook> {
    let orders = fetch_orders(conn).await?;
    let next_id = fetch_next_id(conn).await?;
    Ok(OrderBook::restore(orders, next_id))
}

async fn insert_row(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, apartment, description, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(to_sql_id(order.id)?)
    .bind(&order.apartment)
    .bind(&order.description)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await
    .map_err(|e| match DbError::from(e) {
        DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
            field,
            value: order.id.to_string(),
        },
        other => other,
    })?;

    Ok(())
}

async fn upsert_next_id(conn: &mut SqliteConnection, next_id: u64) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(NEXT_ORDER_ID_KEY)
    .bind(next_id.to_string())
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pocket_core::ValidationError;

    async fn repo() -> OrderRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().orders()
    }

    #[tokio::test]
    async fn test_append_list_and_counter() {
        let orders = repo().await;

        let (first, _) = orders.append("A1", "leak").await.unwrap();
        let (second, book) = orders.append("B2", " paint ").await.unwrap();
        assert_eq!((first.id, second.id), (0, 1));
        assert_eq!(book.next_id(), 2);

        let listed = orders.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(listed[1].description, " paint ");
        assert_eq!(orders.next_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected_without_writing() {
        let orders = repo().await;

        let err = orders.append("A1", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Rejected(ValidationError::Required { ref field }) if field == "description"
        ));
        assert!(orders.list().await.unwrap().is_empty());
        assert_eq!(orders.next_id().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_keeps_counter_and_ids_are_not_reused() {
        let orders = repo().await;
        orders.append("A1", "x").await.unwrap();
        orders.append("A2", "y").await.unwrap();

        let (removed, book) = orders.remove(1).await.unwrap();
        assert_eq!(removed.apartment, "A2");
        assert_eq!(book.len(), 1);
        assert!(matches!(orders.remove(1).await, Err(DbError::NotFound { .. })));

        let restored = orders.load_book().await.unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.next_id(), 2);

        let (third, _) = orders.append("A3", "z").await.unwrap();
        assert_eq!(third.id, 2);
    }

    #[tokio::test]
    async fn test_append_sees_orders_added_through_another_handle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let shell = db.orders();
        let one_shot = db.orders();

        let stale = shell.load_book().await.unwrap();
        one_shot.append("A1", "leak").await.unwrap();

        let (order, book) = shell.append("A2", "noise").await.unwrap();
        assert_eq!(stale.next_id(), 0);
        assert_eq!(order.id, 1);
        assert_eq!(book.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let order = Order::new("A1", "x", 0);
        insert_row(&mut conn, &order).await.unwrap();

        let err = insert_row(&mut conn, &order).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "0"));
    }

    #[tokio::test]
    async fn test_clear_and_corrupt_counter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orders = db.orders();

        orders.append("A1", "x").await.unwrap();
        assert_eq!(orders.clear().await.unwrap(), 1);
        assert!(orders.list().await.unwrap().is_empty());
        assert_eq!(orders.next_id().await.unwrap(), 1);

        db.settings().set(NEXT_ORDER_ID_KEY, "oops").await.unwrap();
        assert!(matches!(
            orders.next_id().await,
            Err(DbError::CorruptValue { .. })
        ));
        assert!(orders.append("A2", "y").await.is_err());
    }
}
