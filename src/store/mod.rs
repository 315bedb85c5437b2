//! Flat-file JSON persistence
//!
//! Two documents under the configured data directory, created with defaults
//! on first access. Files are replaced whole on every mutation; the replace
//! goes through a temp file and a rename so readers never observe a partial
//! write.

use std::path::Path;
use thiserror::Error;
use tokio::fs;

pub mod users;
pub mod ventures;

pub use users::{UserRecord, UserStore};
pub use ventures::VentureStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `bytes` to `path` atomically: write a sibling temp file, then rename
/// it over the destination.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// Create the parent directory and seed `path` with `default_bytes` when the
/// file does not exist yet.
async fn ensure_file(path: &Path, default_bytes: &[u8]) -> Result<(), StoreError> {
    if fs::try_exists(path).await? {
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }
    write_atomic(path, default_bytes).await
}
