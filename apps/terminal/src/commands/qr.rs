//! # QR Image Commands
//!
//! The main menu shows whether a QR image is loaded. Choosing a new one
//! copies the file into the data directory as `qr_image.png`.
//!
//! A cached image that can't be read is not an error for the menu: the
//! failure is logged and the menu says no image is loaded.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::state::DbState;

/// What the main menu shows about the QR image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrStatus {
    pub loaded: bool,
    pub path: Option<PathBuf>,
    pub size_bytes: Option<usize>,
}

impl QrStatus {
    fn empty() -> Self {
        QrStatus {
            loaded: false,
            path: None,
            size_bytes: None,
        }
    }
}

/// Reports the cached image. Never fails.
pub async fn qr_status(db: &DbState) -> QrStatus {
    debug!("qr_status command");
    let images = db.images();

    match images.load().await {
        Ok(Some(bytes)) => QrStatus {
            loaded: true,
            path: Some(images.path()),
            size_bytes: Some(bytes.len()),
        },
        Ok(None) => QrStatus::empty(),
        Err(e) => {
            warn!(error = %e, path = %images.path().display(), "Could not restore QR image");
            QrStatus::empty()
        }
    }
}

/// Replaces the cached image with the PNG at `source`.
pub async fn set_qr(db: &DbState, source: &Path) -> AppResult<QrStatus> {
    debug!(source = %source.display(), "set_qr command");
    db.images().import(source).await?;
    Ok(qr_status(db).await)
}

/// Forgets the cached image. Returns whether one existed.
pub async fn clear_qr(db: &DbState) -> AppResult<bool> {
    debug!("clear_qr command");
    Ok(db.images().clear().await?)
}
