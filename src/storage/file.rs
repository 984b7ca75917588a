//! JSON file-backed store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{PermissionStore, StoreSnapshot};
use crate::utils::error::Result;

/// Store persisting the snapshot as pretty-printed JSON at a fixed path.
///
/// A missing file loads as an empty snapshot so first startup needs no
/// provisioning step.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to the given path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PermissionStore for JsonFileStore {
    async fn load(&self) -> Result<StoreSnapshot> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet; starting empty");
                return Ok(StoreSnapshot::default());
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(
            path = %self.path.display(),
            ranks = snapshot.ranks.len(),
            players = snapshot.players.len(),
            "snapshot saved"
        );
        Ok(())
    }
}
