//! Role grant methods and primary-rank selection

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::{PlayerData, RoleGrant};
use crate::core::rank::{Rank, rank_key};
use crate::core::ranks::RankManager;

impl PlayerData {
    /// Add a role grant, replacing any existing grant for the same rank
    /// (case-insensitive). Re-granting a held rank resets its expiry rather
    /// than stacking a second entry.
    pub fn add_role(&mut self, rank: &str, expires_at: Option<DateTime<Utc>>) {
        self.roles
            .insert(rank_key(rank), RoleGrant::new(rank, expires_at));
    }

    /// Remove a role grant. Returns whether an entry was removed.
    pub fn remove_role(&mut self, rank: &str) -> bool {
        self.roles.remove(&rank_key(rank)).is_some()
    }

    /// Whether the player currently holds an active grant for this rank
    pub fn has_role(&self, rank: &str) -> bool {
        self.roles
            .get(&rank_key(rank))
            .is_some_and(|grant| grant.is_active())
    }

    /// Grants that are permanent or not yet expired
    pub fn active_roles(&self) -> Vec<&RoleGrant> {
        self.roles.values().filter(|g| g.is_active()).collect()
    }

    /// Grants whose expiry has passed but have not been swept yet
    pub fn expired_roles(&self) -> Vec<&RoleGrant> {
        self.roles.values().filter(|g| g.is_expired()).collect()
    }

    /// Number of grants held, active or not
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Remove expired grants from the record. Returns how many were removed.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.roles.len();
        self.roles.retain(|_, grant| grant.is_active());
        before - self.roles.len()
    }

    /// Recompute the display rank: the active grant whose rank carries the
    /// highest weight wins, ties broken by name ascending. Grants for ranks
    /// no longer in the table contribute nothing; with no candidates left
    /// the configured default rank is used.
    pub fn recompute_primary(&mut self, ranks: &RankManager) {
        let mut best: Option<Rank> = None;
        for grant in self.active_roles() {
            let Some(rank) = ranks.get(&grant.rank) else {
                debug!(player = %self.id, rank = %grant.rank, "skipping grant for unknown rank");
                continue;
            };
            let better = match &best {
                None => true,
                Some(current) => {
                    rank.weight > current.weight
                        || (rank.weight == current.weight && rank.key() < current.key())
                }
            };
            if better {
                best = Some(rank);
            }
        }

        self.primary_rank = match best {
            Some(rank) => rank.name,
            None => ranks.default_rank_name().to_string(),
        };
    }
}
