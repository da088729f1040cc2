//! # Bill Count Repository
//!
//! Persists the bill counter screen. One row per denomination with a
//! non-zero count; a missing row reads as 0.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::error::DbResult;
use pocket_core::{BillCount, Denomination};

/// Repository for the `bill_counts` table.
#[derive(Debug, Clone)]
pub struct BillCountRepository {
    pool: SqlitePool,
}

impl BillCountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BillCountRepository { pool }
    }

    /// Loads the saved counts.
    ///
    /// Rows with a denomination outside the allowed set are skipped with a
    /// warning rather than failing the whole screen.
    pub async fn load(&self) -> DbResult<BillCount> {
        let mut conn = self.pool.acquire().await?;
        let bills = fetch_counts(&mut conn).await?;

        debug!(total = %bills.total(), "Loaded bill counts");
        Ok(bills)
    }

    /// Sets one count from raw text and returns the stored counts with the
    /// value that was kept.
    ///
    /// The counts are read and the one row written in a single transaction,
    /// so counts saved by another `pocket` process are never overwritten.
    pub async fn set_count(
        &self,
        denomination: Denomination,
        raw: &str,
    ) -> DbResult<(BillCount, u32)> {
        let mut tx = self.pool.begin().await?;

        let mut bills = fetch_counts(&mut tx).await?;
        let stored = bills.set_count(denomination, raw);
        let value = i64::from(denomination.value());

        if stored == 0 {
            sqlx::query("DELETE FROM bill_counts WHERE denomination = ?1")
                .bind(value)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO bill_counts (denomination, count, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(denomination) DO UPDATE SET
                    count = excluded.count,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(value)
            .bind(i64::from(stored))
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(%denomination, stored, total = %bills.total(), "Saved bill count");
        Ok((bills, stored))
    }

    /// Removes every stored count.
    pub async fn clear(&self) -> DbResult<()> {
        sqlx::query("DELETE FROM bill_counts")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

async fn fetch_counts(conn: &mut SqliteConnection) -> DbResult<BillCount> {
    let rows: Vec<(i64, i64)> =
        sqlx::query_as("SELECT denomination, count FROM bill_counts ORDER BY denomination")
            .fetch_all(&mut *conn)
            .await?;

    let bills = rows
        .into_iter()
        .filter_map(|(value, count)| {
            let denomination = u32::try_from(value).ok().and_then(Denomination::from_value);
            match (denomination, u32::try_from(count)) {
                (Some(denomination), Ok(count)) => Some((denomination, count)),
                _ => {
                    warn!(denomination = value, count, "Skipping unreadable bill count row");
                    None
                }
            }
        })
        .collect();

    Ok(bills)
}
