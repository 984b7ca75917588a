//! Storage boundary for the rank engine
//!
//! Durability is delegated to an external collaborator behind the
//! [`PermissionStore`] trait. The engine only exchanges snapshots at load
//! and save time; the resolution path never awaits storage. The records
//! here define the only structural contract: ranks keyed by
//! case-insensitive name, players by a stable id, role grants carrying an
//! optional expiry instant.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::player::{PlayerData, PlayerId, RoleGrant};
use crate::core::rank::{Rank, rank_key};
use crate::utils::error::Result;

/// Persisted shape of a rank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRecord {
    pub name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub weight: i32,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Persisted shape of a role grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrantRecord {
    pub rank: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Persisted shape of a player record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub primary_rank: String,
    #[serde(default)]
    pub roles: Vec<RoleGrantRecord>,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
    pub last_active: DateTime<Utc>,
}

/// Everything a store loads and saves in one piece
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub ranks: Vec<RankRecord>,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

/// Durable storage collaborator
///
/// Implementations own serialization shape and medium. Callers dispatch
/// `save` asynchronously after in-memory mutations succeed; nothing on the
/// resolution path waits for it.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Load the full snapshot; an empty backing medium yields an empty
    /// snapshot, not an error
    async fn load(&self) -> Result<StoreSnapshot>;

    /// Persist the full snapshot
    async fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;
}

impl From<&Rank> for RankRecord {
    fn from(rank: &Rank) -> Self {
        Self {
            name: rank.name.clone(),
            prefix: rank.prefix.clone(),
            suffix: rank.suffix.clone(),
            weight: rank.weight,
            default: rank.is_default,
            permissions: rank.permissions.iter().cloned().collect(),
            parents: rank.parents.iter().cloned().collect(),
        }
    }
}

impl From<RankRecord> for Rank {
    fn from(record: RankRecord) -> Self {
        Self {
            name: record.name,
            prefix: record.prefix,
            suffix: record.suffix,
            weight: record.weight,
            is_default: record.default,
            permissions: record.permissions.into_iter().collect(),
            parents: record.parents.into_iter().collect(),
        }
    }
}

impl From<&PlayerData> for PlayerRecord {
    fn from(player: &PlayerData) -> Self {
        Self {
            id: player.id,
            primary_rank: player.primary_rank.clone(),
            roles: player
                .roles
                .values()
                .map(|grant| RoleGrantRecord {
                    rank: grant.rank.clone(),
                    expires_at: grant.expires_at,
                })
                .collect(),
            allow: player.allow.iter().cloned().collect(),
            deny: player.deny.iter().cloned().collect(),
            last_active: player.last_active,
        }
    }
}

impl From<PlayerRecord> for PlayerData {
    fn from(record: PlayerRecord) -> Self {
        Self {
            id: record.id,
            primary_rank: record.primary_rank,
            roles: record
                .roles
                .into_iter()
                .map(|grant| {
                    (
                        rank_key(&grant.rank),
                        RoleGrant::new(&grant.rank, grant.expires_at),
                    )
                })
                .collect(),
            allow: record.allow.into_iter().collect(),
            deny: record.deny.into_iter().collect(),
            last_active: record.last_active,
        }
    }
}
