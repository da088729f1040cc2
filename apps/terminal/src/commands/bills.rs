//! # Bill Counter Commands
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bill counter                                                           │
//! │                                                                         │
//! │  Total: 110 pesos                                                       │
//! │                                                                         │
//! │    5 ×    2                                                             │
//! │   10 ×                                                                  │
//! │   ...                                                                   │
//! │  100 ×    1                                                             │
//! │                                                                         │
//! │  "100 1"  → set_bill_count(Denomination 100, "1")                       │
//! │  "reset"  → reset_bills()                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Count text never fails: blank, negative or garbage text stores 0. Only an
//! unknown denomination is an error.

use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::state::{AppConfig, BillState, DbState};
use pocket_core::{BillCount, BillLine, Denomination, Money};

/// One row of the counter, in ascending denomination order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRow {
    pub denomination: u32,
    pub count: u32,
    /// What the input field shows ("" for 0)
    pub display: String,
}

/// Everything the bill counter screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub rows: Vec<BillRow>,
    /// Non-zero lines with subtotals
    pub lines: Vec<BillLine>,
    pub total: Money,
    pub total_notes: u64,
    pub total_display: String,
}

impl BillSummary {
    pub fn build(bills: &BillCount, config: &AppConfig) -> Self {
        let total = bills.total();
        BillSummary {
            rows: Denomination::ALL
                .iter()
                .map(|&d| BillRow {
                    denomination: d.value(),
                    count: bills.count(d),
                    display: bills.display_count(d),
                })
                .collect(),
            lines: bills
                .lines()
                .into_iter()
                .filter(|line| line.count > 0)
                .collect(),
            total,
            total_notes: bills.total_notes(),
            total_display: config.format_currency(total),
        }
    }
}

/// Current counts and total.
pub async fn get_bills(bills: &BillState, config: &AppConfig) -> BillSummary {
    debug!("get_bills command");
    bills.with_bills(|b| BillSummary::build(b, config)).await
}

/// Sets one count from raw text and saves it.
///
/// The screen is refreshed from what is stored, so counts saved by another
/// `pocket` process show up too.
///
/// ## Arguments
/// * `denomination` - "5", "10", ... "1000"
/// * `raw_count` - text as typed; invalid text stores 0
pub async fn set_bill_count(
    db: &DbState,
    bills: &BillState,
    config: &AppConfig,
    denomination: &str,
    raw_count: &str,
) -> AppResult<BillSummary> {
    let denomination: Denomination = denomination.parse()?;
    debug!(%denomination, raw = %raw_count, "set_bill_count command");

    let mut guard = bills.lock().await;
    let (stored_counts, stored) = db
        .inner()
        .bill_counts()
        .set_count(denomination, raw_count)
        .await?;
    *guard = stored_counts;

    debug!(%denomination, stored, "Bill count updated");
    Ok(BillSummary::build(&guard, config))
}

/// Clears every count.
pub async fn reset_bills(
    db: &DbState,
    bills: &BillState,
    config: &AppConfig,
) -> AppResult<BillSummary> {
    debug!("reset_bills command");

    let mut guard = bills.lock().await;
    db.inner().bill_counts().clear().await?;
    guard.reset();

    Ok(BillSummary::build(&guard, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::AppState;
    use std::path::PathBuf;

    async fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: PathBuf::from(dir.path()),
            ..AppConfig::default()
        };
        let state = AppState::in_memory(config, dir.path()).await.unwrap();
        (state, dir)
    }

    #[tokio::test]
    async fn test_set_counts_and_total() {
        let (s, _dir) = state().await;

        set_bill_count(&s.db, &s.bills, &s.config, "5", "2").await.unwrap();
        let summary = set_bill_count(&s.db, &s.bills, &s.config, "100", "1")
            .await
            .unwrap();

        assert_eq!(summary.total, Money::from_major(110));
        assert_eq!(summary.total_display, "110 pesos");
        assert_eq!(summary.total_notes, 3);
        assert_eq!(summary.rows.len(), 8);
        assert_eq!(summary.rows[0].display, "2");
        assert_eq!(summary.rows[1].display, "");
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[1].subtotal, Money::from_major(100));

        let saved = s.db.inner().bill_counts().load().await.unwrap();
        assert_eq!(saved.total(), Money::from_major(110));
    }

    #[tokio::test]
    async fn test_garbage_count_stores_zero() {
        let (s, _dir) = state().await;
        set_bill_count(&s.db, &s.bills, &s.config, "20", "7").await.unwrap();

        for raw in ["abc", "", "-4", "99999999999"] {
            let summary = set_bill_count(&s.db, &s.bills, &s.config, "20", raw)
                .await
                .unwrap();
            assert_eq!(summary.total, Money::zero(), "raw {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_denomination_is_rejected() {
        let (s, _dir) = state().await;
        let err = set_bill_count(&s.db, &s.bills, &s.config, "30", "1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_bills(&s.bills, &s.config).await.lines.is_empty());
    }

    #[tokio::test]
    async fn test_reset() {
        let (s, _dir) = state().await;
        set_bill_count(&s.db, &s.bills, &s.config, "1000", "3").await.unwrap();

        let summary = reset_bills(&s.db, &s.bills, &s.config).await.unwrap();
        assert_eq!(summary.total, Money::zero());
        assert!(s.db.inner().bill_counts().load().await.unwrap().is_empty());
    }
}
