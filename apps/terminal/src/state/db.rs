//! # Database State
//!
//! Wraps the `Database` handle and the QR image store for use in commands.
//!
//! ## Thread Safety
//! `Database` holds a `SqlitePool`, which is already shareable, and the image
//! store is just a directory path. No locking is needed here.

use std::path::Path;

use pocket_db::{Database, DbConfig, DbResult, QrImageStore};

/// Persistence handles shared by every command.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
    images: QrImageStore,
}

impl DbState {
    pub fn new(db: Database, images: QrImageStore) -> Self {
        DbState { db, images }
    }

    /// Opens `<data_dir>/pocket.db` (running migrations) and the image store
    /// in the same directory.
    pub async fn open(data_dir: &Path, database_path: &Path) -> DbResult<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db = Database::new(DbConfig::new(database_path)).await?;
        Ok(DbState::new(db, QrImageStore::new(data_dir)))
    }

    /// In-memory database with images under `image_dir` (for tests).
    pub async fn in_memory(image_dir: &Path) -> DbResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(DbState::new(db, QrImageStore::new(image_dir)))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    pub fn images(&self) -> &QrImageStore {
        &self.images
    }
}
