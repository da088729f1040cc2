//! # Order State
//!
//! The order book shown on the orders screen.
//!
//! Commands write through the repository and then swap in the book it
//! returns. A failed save leaves the screen exactly as it was.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use pocket_core::OrderBook;

/// Shared handle to the order book.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    book: Arc<Mutex<OrderBook>>,
}

impl OrderState {
    pub fn new(book: OrderBook) -> Self {
        OrderState {
            book: Arc::new(Mutex::new(book)),
        }
    }

    /// Runs `f` with read access to the book.
    pub async fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let book = self.book.lock().await;
        f(&book)
    }

    /// Exclusive access, held across the save.
    pub async fn lock(&self) -> MutexGuard<'_, OrderBook> {
        self.book.lock().await
    }
}
