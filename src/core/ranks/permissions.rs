//! Rank permission methods and the transitive closure

use std::collections::HashSet;

use tracing::{debug, error};

use super::manager::RankManager;
use crate::core::rank::rank_key;

impl RankManager {
    /// Add a permission to a rank. Returns false if the rank is missing.
    pub fn add_permission(&self, name: &str, permission: &str) -> bool {
        match self.ranks.get_mut(&rank_key(name)) {
            Some(mut rank) => {
                rank.permissions.insert(permission.to_string());
                true
            }
            None => {
                debug!(rank = %name, "add_permission rejected: unknown rank");
                false
            }
        }
    }

    /// Remove a permission from a rank. Returns false if the rank is missing.
    pub fn remove_permission(&self, name: &str, permission: &str) -> bool {
        match self.ranks.get_mut(&rank_key(name)) {
            Some(mut rank) => {
                rank.permissions.remove(permission);
                true
            }
            None => {
                debug!(rank = %name, "remove_permission rejected: unknown rank");
                false
            }
        }
    }

    /// Union of a rank's own permissions and those of all its ancestors.
    ///
    /// Unknown ranks yield the empty set. The walk carries a visited set so
    /// a cycle smuggled past [`RankManager::add_parent`] (for example by a
    /// restored snapshot) terminates with a partial result instead of
    /// hanging, and a depth bound equal to the table size turns any latent
    /// walk bug into a loud error rather than a stack overflow.
    pub fn effective_permissions(&self, name: &str) -> HashSet<String> {
        let mut permissions = HashSet::new();
        let mut visited = HashSet::new();
        let limit = self.ranks.len();
        self.collect_permissions(rank_key(name), &mut permissions, &mut visited, 0, limit);
        permissions
    }

    fn collect_permissions(
        &self,
        key: String,
        out: &mut HashSet<String>,
        visited: &mut HashSet<String>,
        depth: usize,
        limit: usize,
    ) {
        if !visited.insert(key.clone()) {
            return;
        }
        if depth > limit {
            // unreachable while the visited set holds; kept as a loud guard
            error!(
                rank = %key,
                depth,
                "inheritance walk exceeded rank count; returning partial result"
            );
            return;
        }

        // clone sets out of the guard before recursing so no shard lock is
        // held while walking parents
        let (own, parents) = match self.ranks.get(&key) {
            Some(rank) => (
                rank.permissions.clone(),
                rank.parents.iter().map(|p| rank_key(p)).collect::<Vec<_>>(),
            ),
            None => {
                debug!(rank = %key, "skipping unknown rank in inheritance walk");
                return;
            }
        };

        out.extend(own);
        for parent in parents {
            self.collect_permissions(parent, out, visited, depth + 1, limit);
        }
    }
}
