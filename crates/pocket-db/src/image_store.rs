//! # QR Image Store
//!
//! Keeps the one user-chosen QR image as `qr_image.png` in the data
//! directory.
//!
//! ## Write Path
//! ```text
//! save(bytes)
//!   │
//!   ├── bytes start with the PNG signature?  no ──► DbError::InvalidImage
//!   │
//!   ▼
//! qr_image.png.tmp  ──rename──►  qr_image.png   (replaces any previous image)
//! ```
//!
//! Reading never fails on a missing file: there is simply no image yet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Fixed file name of the cached image.
pub const FILE_NAME: &str = "qr_image.png";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// File-backed store for the cached QR image.
#[derive(Debug, Clone)]
pub struct QrImageStore {
    dir: PathBuf,
}

impl QrImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        QrImageStore { dir: dir.into() }
    }

    /// Full path of the cached image, whether or not it exists.
    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// Replaces the cached image with `bytes`.
    pub async fn save(&self, bytes: &[u8]) -> DbResult<PathBuf> {
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(DbError::InvalidImage("missing PNG signature".to_string()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.path();
        let tmp = self.dir.join(format!("{FILE_NAME}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        info!(path = %target.display(), size = bytes.len(), "Saved QR image");
        Ok(target)
    }

    /// Copies an image file from disk into the store.
    pub async fn import(&self, source: &Path) -> DbResult<PathBuf> {
        let bytes = tokio::fs::read(source).await?;
        self.save(&bytes).await
    }

    /// Reads the cached image, `None` if nothing was saved yet.
    pub async fn load(&self) -> DbResult<Option<Vec<u8>>> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cached QR image");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the cached image. Returns whether one existed.
    pub async fn clear(&self) -> DbResult<bool> {
        match tokio::fs::remove_file(self.path()).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
