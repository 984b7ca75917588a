//! # rank-engine
//!
//! A role-based authorization engine for multi-tenant runtimes with many
//! concurrently-connected players. Ranks form a multi-parent inheritance
//! graph guarded against cycles; players hold timed role grants plus
//! allow/deny overrides; connected players get a live permission cache that
//! is recomputed on every relevant mutation.
//!
//! ## Features
//!
//! - **Rank inheritance**: multi-parent rank graph with transitive
//!   permission closure and creation-time cycle rejection
//! - **Wildcard permissions**: `a.b.*` prefixes and the global `*`, with
//!   denials resolved first
//! - **Timed role grants**: per-grant expiry filtered at query time, with
//!   an explicit sweep for stale entries
//! - **Live attachments**: per-player permission sinks kept consistent via
//!   atomic replace, never incremental diffs
//! - **Pluggable storage**: async load/save boundary the resolution path
//!   never waits on
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rank_engine::storage::MemoryStore;
//! use rank_engine::{EngineConfig, InMemorySink, PlayerId, RankEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = RankEngine::new(EngineConfig::default());
//!     let store = MemoryStore::new();
//!     engine.initialize(&store).await?;
//!
//!     engine.create_rank("vip", "[VIP] ", "", 10);
//!     engine.add_rank_permission("vip", "chat.color");
//!
//!     let player = PlayerId::new_v4();
//!     engine.attach(player, Arc::new(InMemorySink::new()));
//!     engine.add_role(player, "vip", None);
//!     assert!(engine.has_permission(player, "chat.color"));
//!
//!     engine.shutdown(&store).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{EngineConfig, StorageConfig};
pub use core::attachment::{InMemorySink, PermissionManager, PermissionSink};
pub use core::player::{PlayerData, PlayerId, PlayerManager, RoleGrant};
pub use core::rank::Rank;
pub use core::ranks::RankManager;
pub use utils::error::{EngineError, Result};

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use storage::{PermissionStore, PlayerRecord, RankRecord, StoreSnapshot};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The engine facade: rank table, player table, and live attachments wired
/// together behind the full query/mutation surface.
///
/// Rank-graph mutations refresh every attached player, since a graph change
/// can silently affect many of them; player mutations refresh only that
/// player. All stores are constructed here and dependency-injected, so
/// tests can run isolated engines side by side.
pub struct RankEngine {
    config: EngineConfig,
    ranks: Arc<RankManager>,
    players: Arc<PlayerManager>,
    permissions: PermissionManager,
}

impl RankEngine {
    /// Create an engine with empty tables
    pub fn new(config: EngineConfig) -> Self {
        let ranks = Arc::new(RankManager::new(&config));
        let players = Arc::new(PlayerManager::new(Arc::clone(&ranks)));
        let permissions = PermissionManager::new(Arc::clone(&ranks), Arc::clone(&players));

        Self {
            config,
            ranks,
            players,
            permissions,
        }
    }

    /// Validate configuration, load the stored snapshot, and seed the
    /// default rank if the store did not contain it
    pub async fn initialize(&self, store: &dyn PermissionStore) -> Result<()> {
        self.config.validate().map_err(EngineError::config)?;

        let snapshot = store.load().await?;
        self.ranks
            .restore(snapshot.ranks.into_iter().map(Rank::from).collect());
        self.players
            .restore(snapshot.players.into_iter().map(PlayerData::from).collect());

        if !self.ranks.contains(&self.config.default_rank) {
            self.ranks.create(&self.config.default_rank, "", "", 0);
            info!(rank = %self.config.default_rank, "seeded missing default rank");
        }

        info!(
            ranks = self.ranks.len(),
            players = self.players.len(),
            "engine initialized"
        );
        Ok(())
    }

    /// Persist the current state and log the shutdown
    pub async fn shutdown(&self, store: &dyn PermissionStore) -> Result<()> {
        store.save(&self.snapshot()).await?;
        info!("engine shut down");
        Ok(())
    }

    /// Snapshot of the full engine state for persistence
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            ranks: self
                .ranks
                .all_ranks()
                .iter()
                .map(RankRecord::from)
                .collect(),
            players: self
                .players
                .snapshot()
                .iter()
                .map(PlayerRecord::from)
                .collect(),
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The rank table and inheritance graph
    pub fn ranks(&self) -> &RankManager {
        &self.ranks
    }

    /// The player table
    pub fn players(&self) -> &PlayerManager {
        &self.players
    }

    /// The attachment manager
    pub fn permissions(&self) -> &PermissionManager {
        &self.permissions
    }

    // Queries

    /// Resolve a permission check for a player
    pub fn has_permission(&self, id: PlayerId, permission: &str) -> bool {
        self.players.has_permission(id, permission)
    }

    /// Flattened permission set for a player
    pub fn all_permissions(&self, id: PlayerId) -> HashSet<String> {
        self.players.all_permissions(id)
    }

    /// Display rank for a player
    pub fn primary_rank(&self, id: PlayerId) -> String {
        self.players.primary_rank(id)
    }

    /// Get a rank by name
    pub fn rank(&self, name: &str) -> Option<Rank> {
        self.ranks.get(name)
    }

    /// List ranks, optionally sorted by weight descending (ties by name)
    pub fn list_ranks(&self, sorted_by_weight: bool) -> Vec<Rank> {
        if sorted_by_weight {
            self.ranks.sorted_ranks()
        } else {
            self.ranks.all_ranks()
        }
    }

    // Rank mutations; each successful one refreshes all attached players

    /// Create a rank
    pub fn create_rank(&self, name: &str, prefix: &str, suffix: &str, weight: i32) -> bool {
        let created = self.ranks.create(name, prefix, suffix, weight);
        if created {
            self.permissions.refresh_all();
        }
        created
    }

    /// Delete a rank, reassigning players whose display rank pointed at it
    pub fn delete_rank(&self, name: &str) -> bool {
        if !self.ranks.delete(name) {
            return false;
        }
        self.players.reassign_primary_from(name);
        self.permissions.refresh_all();
        true
    }

    /// Add a permission to a rank
    pub fn add_rank_permission(&self, name: &str, permission: &str) -> bool {
        let added = self.ranks.add_permission(name, permission);
        if added {
            self.permissions.refresh_all();
        }
        added
    }

    /// Remove a permission from a rank
    pub fn remove_rank_permission(&self, name: &str, permission: &str) -> bool {
        let removed = self.ranks.remove_permission(name, permission);
        if removed {
            self.permissions.refresh_all();
        }
        removed
    }

    /// Add a parent edge to the rank graph
    pub fn add_parent(&self, child: &str, parent: &str) -> bool {
        let added = self.ranks.add_parent(child, parent);
        if added {
            self.permissions.refresh_all();
        }
        added
    }

    /// Remove a parent edge from the rank graph
    pub fn remove_parent(&self, child: &str, parent: &str) -> bool {
        let removed = self.ranks.remove_parent(child, parent);
        if removed {
            self.permissions.refresh_all();
        }
        removed
    }

    // Player mutations; each refreshes that player's attachment

    /// Grant a permission directly to a player
    pub fn grant(&self, id: PlayerId, permission: &str) {
        self.players.grant(id, permission);
        self.permissions.refresh(id);
    }

    /// Remove a direct grant from a player
    pub fn revoke(&self, id: PlayerId, permission: &str) {
        self.players.revoke(id, permission);
        self.permissions.refresh(id);
    }

    /// Deny a permission for a player
    pub fn deny(&self, id: PlayerId, permission: &str) {
        self.players.deny(id, permission);
        self.permissions.refresh(id);
    }

    /// Remove a denial from a player
    pub fn undeny(&self, id: PlayerId, permission: &str) {
        self.players.undeny(id, permission);
        self.permissions.refresh(id);
    }

    /// Add a role grant, optionally expiring
    pub fn add_role(&self, id: PlayerId, rank: &str, expires_at: Option<DateTime<Utc>>) {
        self.players.add_role(id, rank, expires_at);
        self.permissions.refresh(id);
    }

    /// Remove a role grant
    pub fn remove_role(&self, id: PlayerId, rank: &str) -> bool {
        let removed = self.players.remove_role(id, rank);
        if removed {
            self.permissions.refresh(id);
        }
        removed
    }

    // Connection lifecycle

    /// Attach a live permission sink for a connecting player
    pub fn attach(&self, id: PlayerId, sink: Arc<dyn PermissionSink>) {
        self.permissions.attach(id, sink);
    }

    /// Detach a disconnecting player's sink
    pub fn detach(&self, id: PlayerId) -> bool {
        self.permissions.detach(id)
    }

    /// Recompute one attached player's live cache
    pub fn refresh(&self, id: PlayerId) -> bool {
        self.permissions.refresh(id)
    }

    /// Recompute every attached player's live cache
    pub fn refresh_all(&self) {
        self.permissions.refresh_all();
    }

    /// Sweep expired role grants for attached players
    pub fn sweep(&self) -> usize {
        self.permissions.sweep_attached()
    }
}
