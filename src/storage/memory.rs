//! In-memory store for tests and embedded use

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{PermissionStore, StoreSnapshot};
use crate::utils::error::Result;

/// Store keeping its snapshot in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a snapshot
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn load(&self) -> Result<StoreSnapshot> {
        Ok(self.snapshot.read().clone())
    }

    async fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        *self.snapshot.write() = snapshot.clone();
        Ok(())
    }
}
