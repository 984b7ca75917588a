//! Parent edge management and cycle prevention

use std::collections::HashSet;

use tracing::debug;

use super::manager::RankManager;
use crate::core::rank::rank_key;

impl RankManager {
    /// Add a parent edge so `child` inherits from `parent`.
    ///
    /// Returns false if either rank is missing, if child and parent are the
    /// same rank, or if the edge would create a cycle. The graph is left
    /// unchanged on rejection.
    pub fn add_parent(&self, child: &str, parent: &str) -> bool {
        let child_key = rank_key(child);
        let parent_key = rank_key(parent);

        if child_key == parent_key {
            debug!(rank = %child, "add_parent rejected: self-reference");
            return false;
        }
        if !self.ranks.contains_key(&child_key) || !self.ranks.contains_key(&parent_key) {
            debug!(child = %child, parent = %parent, "add_parent rejected: unknown rank");
            return false;
        }
        if self.would_create_cycle(&child_key, &parent_key) {
            debug!(child = %child, parent = %parent, "add_parent rejected: would create cycle");
            return false;
        }

        match self.ranks.get_mut(&child_key) {
            Some(mut rank) => {
                rank.parents.insert(parent.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove a parent edge.
    ///
    /// Returns false only when the child rank is missing; removing an absent
    /// edge succeeds.
    pub fn remove_parent(&self, child: &str, parent: &str) -> bool {
        let parent_key = rank_key(parent);
        match self.ranks.get_mut(&rank_key(child)) {
            Some(mut rank) => {
                rank.parents.retain(|p| rank_key(p) != parent_key);
                true
            }
            None => {
                debug!(child = %child, "remove_parent rejected: unknown rank");
                false
            }
        }
    }

    /// Depth-first walk from `parent` following existing parent edges,
    /// looking for `child`. Parent sets are cloned out of the table so no
    /// shard guard is held while walking.
    fn would_create_cycle(&self, child_key: &str, parent_key: &str) -> bool {
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack = vec![parent_key.to_string()];

        while let Some(key) = stack.pop() {
            if key == child_key {
                return true;
            }
            if !visited.insert(key.clone()) {
                continue;
            }
            if let Some(rank) = self.ranks.get(&key) {
                stack.extend(rank.parents.iter().map(|p| rank_key(p)));
            }
        }

        false
    }
}
