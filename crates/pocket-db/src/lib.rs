//! # pocket-db: Persistence Layer for Pocket Business
//!
//! Stores screen state between runs and owns the cached QR image.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pocket Business Data Flow                           │
//! │                                                                         │
//! │  Shell command (e.g. `orders add A1 leak`)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pocket-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │  Repositories    │   │ QrImageStore│  │   │
//! │  │   │   (pool.rs)   │◄───│  BillCountRepo   │   │ qr_image.png│  │   │
//! │  │   │  SqlitePool   │    │  OrderRepo       │   │ (plain file)│  │   │
//! │  │   │               │    │  SettingsRepo    │   │             │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/pocket.db   and   <data dir>/qr_image.png                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pocket_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pocket.db")).await?;
//! let bills = db.bill_counts().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod image_store;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use image_store::QrImageStore;
pub use pool::{Database, DbConfig};

pub use repository::bills::BillCountRepository;
pub use repository::orders::OrderRepository;
pub use repository::settings::SettingsRepository;
