//! # State Module
//!
//! Application state for the `pocket` shell.
//!
//! One focused state type per screen, bundled in [`AppState`] only so the
//! shell can carry them around. Commands take just the pieces they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                         AppState::load(config)                          │
//! │                                  │                                      │
//! │     ┌──────────────┬─────────────┼──────────────┬──────────────┐        │
//! │     ▼              ▼             ▼              ▼              ▼        │
//! │  ┌────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐  │
//! │  │DbState │  │ BillState │  │OrderState │  │PriceState │  │AppConfig│  │
//! │  │pool +  │  │Arc<Mutex< │  │Arc<Mutex< │  │Arc<Mutex< │  │read-only│  │
//! │  │qr image│  │ BillCount>│  │ OrderBook>│  │PriceInputs│  │         │  │
//! │  └────────┘  └───────────┘  └───────────┘  └───────────┘  └─────────┘  │
//! │                                                                         │
//! │  The three screen states are restored from SQLite at startup.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bills;
mod config;
mod db;
mod orders;
mod prices;

use std::path::Path;

use tracing::info;

pub use bills::BillState;
pub use config::{default_config_path, AppConfig, ConfigError, ConfigFile, CONFIG_FILE_NAME};
pub use db::DbState;
pub use orders::OrderState;
pub use prices::PriceState;

use crate::error::AppResult;

/// Everything the shell needs, restored from disk.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbState,
    pub bills: BillState,
    pub orders: OrderState,
    pub prices: PriceState,
}

impl AppState {
    /// Opens the data directory and restores every screen.
    pub async fn load(config: AppConfig) -> AppResult<Self> {
        let db = DbState::open(&config.data_dir, &config.database_path()).await?;
        Self::restore(config, db).await
    }

    /// Same as [`AppState::load`] over an in-memory database (for tests).
    pub async fn in_memory(config: AppConfig, image_dir: &Path) -> AppResult<Self> {
        let db = DbState::in_memory(image_dir).await?;
        Self::restore(config, db).await
    }

    async fn restore(config: AppConfig, db: DbState) -> AppResult<Self> {
        let database = db.inner();
        let bills = database.bill_counts().load().await?;
        let book = database.orders().load_book().await?;
        let prices = database.settings().price_inputs().await?;

        info!(
            orders = book.len(),
            bill_total = %bills.total(),
            "Screen state restored"
        );

        Ok(AppState {
            config,
            db,
            bills: BillState::new(bills),
            orders: OrderState::new(book),
            prices: PriceState::new(prices),
        })
    }
}
