//! # Order Commands
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_order("A1", "leak")  ──► repo.append ──► orders row + counter      │
//! │        │                                                                │
//! │        │ blank field?  ──► logged at debug, nothing stored, Ok(None)    │
//! │        ▼                                                                │
//! │  list_orders()            ──► [#0 A1 leak]                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  remove_order(0)          ──► repo.remove ──► DELETE row                │
//! │                                                                         │
//! │  clear_orders()           ──► every row gone, counter kept              │
//! │                                                                         │
//! │  After each write the screen holds the book as stored, including       │
//! │  orders added by another `pocket` process.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use pocket_db::DbError;
use crate::state::{DbState, OrderState};
use pocket_core::{Order, OrderBook};

/// The orders screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub count: usize,
    pub next_id: u64,
}

impl OrderListResponse {
    pub fn from_book(book: &OrderBook) -> Self {
        OrderListResponse {
            orders: book.list().to_vec(),
            count: book.len(),
            next_id: book.next_id(),
        }
    }
}

/// Lists orders in the order they were added.
pub async fn list_orders(orders: &OrderState) -> OrderListResponse {
    debug!("list_orders command");
    orders.with_book(OrderListResponse::from_book).await
}

/// Adds an order.
///
/// ## Behavior
/// - Either field blank after trimming: nothing happens, returns `Ok(None)`
/// - Otherwise the order is saved as typed and returned
pub async fn add_order(
    db: &DbState,
    orders: &OrderState,
    apartment: &str,
    description: &str,
) -> AppResult<Option<Order>> {
    debug!(apartment = %apartment, "add_order command");

    let mut guard = orders.lock().await;

    let (order, book) = match db.inner().orders().append(apartment, description).await {
        Ok(added) => added,
        Err(DbError::Rejected(e)) => {
            debug!(reason = %e, "Order ignored");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    *guard = book;

    debug!(id = order.id, "Order added");
    Ok(Some(order))
}

/// Removes an order by id.
pub async fn remove_order(db: &DbState, orders: &OrderState, id: u64) -> AppResult<Order> {
    debug!(id, "remove_order command");

    let mut guard = orders.lock().await;
    let (removed, book) = db.inner().orders().remove(id).await?;
    *guard = book;

    Ok(removed)
}

/// Removes every order. Returns how many were removed.
pub async fn clear_orders(db: &DbState, orders: &OrderState) -> AppResult<u64> {
    debug!("clear_orders command");

    let mut guard = orders.lock().await;
    let repo = db.inner().orders();
    let removed = repo.clear().await?;
    *guard = repo.load_book().await?;

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{AppConfig, AppState};

    async fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(AppConfig::default(), dir.path())
            .await
            .unwrap();
        (state, dir)
    }

    #[tokio::test]
    async fn test_add_then_remove_first() {
        let (s, _dir) = state().await;

        let a1 = add_order(&s.db, &s.orders, "A1", "leak").await.unwrap().unwrap();
        let a2 = add_order(&s.db, &s.orders, "A2", "noise").await.unwrap().unwrap();
        assert_eq!((a1.id, a2.id), (0, 1));

        remove_order(&s.db, &s.orders, a1.id).await.unwrap();

        let listed = list_orders(&s.orders).await;
        assert_eq!(listed.orders, vec![Order::new("A2", "noise", 1)]);
        assert_eq!(s.db.inner().orders().list().await.unwrap(), listed.orders);
    }

    #[tokio::test]
    async fn test_blank_fields_are_silently_ignored() {
        let (s, _dir) = state().await;

        assert_eq!(add_order(&s.db, &s.orders, "  ", "leak").await.unwrap(), None);
        assert_eq!(add_order(&s.db, &s.orders, "A1", "").await.unwrap(), None);

        let listed = list_orders(&s.orders).await;
        assert_eq!(listed.count, 0);
        assert_eq!(listed.next_id, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_id() {
        let (s, _dir) = state().await;
        let err = remove_order(&s.db, &s.orders, 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_clear_keeps_counter() {
        let (s, _dir) = state().await;
        add_order(&s.db, &s.orders, "A1", "x").await.unwrap();
        add_order(&s.db, &s.orders, "A2", "y").await.unwrap();

        assert_eq!(clear_orders(&s.db, &s.orders).await.unwrap(), 2);

        let next = add_order(&s.db, &s.orders, "A3", "z").await.unwrap().unwrap();
        assert_eq!(next.id, 2);
    }
}
