//! # Bill Counter State
//!
//! The counts shown on the bill counter screen.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell line            Command               State change               │
//! │  ──────────            ───────               ────────────               │
//! │  "100 3"  ───────────► set_bill_count() ───► counts[100] = 3            │
//! │  "100"    ───────────► set_bill_count() ───► counts[100] = 0            │
//! │  "reset"  ───────────► reset_bills() ──────► counts.clear()             │
//! │  (screen entry) ─────► get_bills() ────────► (read only)                │
//! │                                                                         │
//! │  Every write is saved to `bill_counts` before the lock is released.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use pocket_core::BillCount;

/// Shared handle to the current bill counts.
#[derive(Debug, Clone, Default)]
pub struct BillState {
    bills: Arc<Mutex<BillCount>>,
}

impl BillState {
    pub fn new(bills: BillCount) -> Self {
        BillState {
            bills: Arc::new(Mutex::new(bills)),
        }
    }

    /// Runs `f` with read access to the counts.
    pub async fn with_bills<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BillCount) -> R,
    {
        let bills = self.bills.lock().await;
        f(&bills)
    }

    /// Exclusive access, held across the save.
    pub async fn lock(&self) -> MutexGuard<'_, BillCount> {
        self.bills.lock().await
    }
}
