//! Rank table management

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::rank::{Rank, rank_key};

/// Manager for the rank table and inheritance graph
///
/// All mutations report expected rejections as `false` rather than errors;
/// an admin mistyping a rank name is a normal event, not a fault. The table
/// is safe for concurrent reads and writes; per-rank set mutations happen
/// under the entry's shard guard.
pub struct RankManager {
    /// Rank table keyed by normalized name
    pub(super) ranks: DashMap<String, Rank>,
    /// Name of the protected default rank
    default_rank: String,
}

impl RankManager {
    /// Create an empty rank manager
    pub fn new(config: &EngineConfig) -> Self {
        info!(default_rank = %config.default_rank, "initializing rank manager");
        Self {
            ranks: DashMap::new(),
            default_rank: config.default_rank.clone(),
        }
    }

    /// Create a new rank with empty permissions and no parents.
    ///
    /// Returns false without mutating anything when a rank with the same
    /// name (case-insensitive) already exists.
    pub fn create(&self, name: &str, prefix: &str, suffix: &str, weight: i32) -> bool {
        let key = rank_key(name);
        match self.ranks.entry(key.clone()) {
            Entry::Occupied(_) => {
                debug!(rank = %name, "create rejected: name already exists");
                false
            }
            Entry::Vacant(slot) => {
                let mut rank = Rank::new(name, prefix, suffix, weight);
                rank.is_default = key == rank_key(&self.default_rank);
                slot.insert(rank);
                info!(rank = %name, weight, "rank created");
                true
            }
        }
    }

    /// Delete a rank.
    ///
    /// Returns false if the rank does not exist or is the configured default
    /// rank. Deletion does not cascade: parent edges and player role grants
    /// referencing the deleted rank simply stop contributing permissions.
    pub fn delete(&self, name: &str) -> bool {
        let key = rank_key(name);
        if key == rank_key(&self.default_rank) {
            debug!(rank = %name, "delete rejected: default rank is protected");
            return false;
        }

        let removed = self.ranks.remove(&key).is_some();
        if removed {
            info!(rank = %name, "rank deleted");
        } else {
            debug!(rank = %name, "delete rejected: unknown rank");
        }
        removed
    }

    /// Get a snapshot of a rank by name
    pub fn get(&self, name: &str) -> Option<Rank> {
        self.ranks.get(&rank_key(name)).map(|r| r.value().clone())
    }

    /// Whether a rank with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(&rank_key(name))
    }

    /// Number of ranks in the table
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Name of the configured default rank
    pub fn default_rank_name(&self) -> &str {
        &self.default_rank
    }

    /// All ranks, unordered
    pub fn all_ranks(&self) -> Vec<Rank> {
        self.ranks.iter().map(|r| r.value().clone()).collect()
    }

    /// All ranks sorted by weight descending, ties broken by name ascending
    pub fn sorted_ranks(&self) -> Vec<Rank> {
        let mut ranks = self.all_ranks();
        ranks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.key().cmp(&b.key())));
        ranks
    }

    /// Replace the whole table, normalizing keys and the default flag
    pub fn restore(&self, ranks: Vec<Rank>) {
        let default_key = rank_key(&self.default_rank);
        self.ranks.clear();
        for mut rank in ranks {
            let key = rank.key();
            rank.is_default = key == default_key;
            self.ranks.insert(key, rank);
        }
        info!(count = self.ranks.len(), "rank table restored");
    }
}
