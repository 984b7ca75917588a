//! Player table management

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use super::types::{PlayerData, PlayerId, RoleGrant};
use crate::core::rank::rank_key;
use crate::core::ranks::RankManager;

/// Manager for the player table
///
/// Records are created on first contact (attach or first mutation); the
/// query path never creates records and answers deny-by-default for unknown
/// ids. Each record mutates under its entry's shard guard.
pub struct PlayerManager {
    players: DashMap<PlayerId, PlayerData>,
    ranks: Arc<RankManager>,
}

impl PlayerManager {
    /// Create an empty player manager backed by a rank table
    pub fn new(ranks: Arc<RankManager>) -> Self {
        Self {
            players: DashMap::new(),
            ranks,
        }
    }

    /// Create the record for a previously-unseen player id, seeded with the
    /// default rank held permanently. No-op when the record exists.
    pub fn ensure(&self, id: PlayerId) {
        self.players.entry(id).or_insert_with(|| {
            debug!(player = %id, "creating player record");
            PlayerData::new(id, self.ranks.default_rank_name())
        });
    }

    /// Get a snapshot of a player record
    pub fn get(&self, id: PlayerId) -> Option<PlayerData> {
        self.players.get(&id).map(|p| p.value().clone())
    }

    /// Whether a record exists for this id
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Number of known players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Ids of all known players
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| *p.key()).collect()
    }

    /// Update the advisory activity timestamp, creating the record if needed
    pub fn touch(&self, id: PlayerId) {
        self.with(id, |player| player.last_active = Utc::now());
    }

    // Queries. Unknown ids answer deny-by-default.

    /// Resolve a permission check for a player
    pub fn has_permission(&self, id: PlayerId, permission: &str) -> bool {
        match self.players.get(&id) {
            Some(player) => player.has_permission(permission, &self.ranks),
            None => false,
        }
    }

    /// Flattened permission set for a player
    pub fn all_permissions(&self, id: PlayerId) -> HashSet<String> {
        match self.players.get(&id) {
            Some(player) => player.all_permissions(&self.ranks),
            None => HashSet::new(),
        }
    }

    /// Display rank for a player; unknown ids report the default rank
    pub fn primary_rank(&self, id: PlayerId) -> String {
        match self.players.get(&id) {
            Some(player) => player.primary_rank.clone(),
            None => self.ranks.default_rank_name().to_string(),
        }
    }

    /// Currently active grants for a player
    pub fn active_roles(&self, id: PlayerId) -> Vec<RoleGrant> {
        match self.players.get(&id) {
            Some(player) => player.active_roles().into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Expired-but-unswept grants for a player
    pub fn expired_roles(&self, id: PlayerId) -> Vec<RoleGrant> {
        match self.players.get(&id) {
            Some(player) => player.expired_roles().into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    // Mutations. Each creates the record on first contact.

    /// Grant a permission directly to a player
    pub fn grant(&self, id: PlayerId, permission: &str) {
        self.with(id, |player| player.grant(permission));
    }

    /// Remove a direct grant from a player
    pub fn revoke(&self, id: PlayerId, permission: &str) {
        self.with(id, |player| player.revoke(permission));
    }

    /// Deny a permission for a player
    pub fn deny(&self, id: PlayerId, permission: &str) {
        self.with(id, |player| player.deny(permission));
    }

    /// Remove a denial from a player
    pub fn undeny(&self, id: PlayerId, permission: &str) {
        self.with(id, |player| player.undeny(permission));
    }

    /// Add a role grant and recompute the display rank
    pub fn add_role(&self, id: PlayerId, rank: &str, expires_at: Option<DateTime<Utc>>) {
        self.with(id, |player| {
            player.add_role(rank, expires_at);
            player.recompute_primary(&self.ranks);
        });
    }

    /// Remove a role grant and recompute the display rank. Returns whether
    /// a grant was removed.
    pub fn remove_role(&self, id: PlayerId, rank: &str) -> bool {
        self.with(id, |player| {
            let removed = player.remove_role(rank);
            if removed {
                player.recompute_primary(&self.ranks);
            }
            removed
        })
    }

    /// Remove expired grants from a player record, recomputing the display
    /// rank when anything was removed. Returns whether the record changed.
    pub fn sweep_expired(&self, id: PlayerId) -> bool {
        let Some(mut player) = self.players.get_mut(&id) else {
            return false;
        };

        let removed = player.sweep_expired();
        if removed > 0 {
            player.recompute_primary(&self.ranks);
            debug!(player = %id, removed, "swept expired role grants");
        }
        removed > 0
    }

    /// Recompute the display rank of every player whose primary points at
    /// `rank` (case-insensitive). Used after rank deletion so affected
    /// players fall back to their best remaining rank or the default.
    /// Returns the affected player ids.
    pub fn reassign_primary_from(&self, rank: &str) -> Vec<PlayerId> {
        let key = rank_key(rank);
        let mut affected = Vec::new();

        for mut entry in self.players.iter_mut() {
            if rank_key(&entry.primary_rank) == key {
                entry.recompute_primary(&self.ranks);
                affected.push(entry.id);
            }
        }

        if !affected.is_empty() {
            info!(rank = %rank, players = affected.len(), "reassigned primary rank");
        }
        affected
    }

    /// Snapshot of every player record
    pub fn snapshot(&self) -> Vec<PlayerData> {
        self.players.iter().map(|p| p.value().clone()).collect()
    }

    /// Replace the whole table
    pub fn restore(&self, players: Vec<PlayerData>) {
        self.players.clear();
        for player in players {
            self.players.insert(player.id, player);
        }
        info!(count = self.players.len(), "player table restored");
    }

    fn with<R>(&self, id: PlayerId, f: impl FnOnce(&mut PlayerData) -> R) -> R {
        let mut entry = self.players.entry(id).or_insert_with(|| {
            debug!(player = %id, "creating player record");
            PlayerData::new(id, self.ranks.default_rank_name())
        });
        f(&mut entry)
    }
}
