//! Player-specific overrides and permission resolution

use std::collections::HashSet;

use super::types::PlayerData;
use crate::core::permission::{GLOBAL_WILDCARD, set_matches};
use crate::core::ranks::RankManager;

impl PlayerData {
    /// Grant a permission directly to the player, clearing any denial of the
    /// exact same string. A string never sits in both sets at once.
    pub fn grant(&mut self, permission: &str) {
        self.deny.remove(permission);
        self.allow.insert(permission.to_string());
    }

    /// Remove a direct grant. Role-derived permissions are unaffected.
    pub fn revoke(&mut self, permission: &str) {
        self.allow.remove(permission);
    }

    /// Deny a permission for the player, clearing any direct grant of the
    /// exact same string.
    pub fn deny(&mut self, permission: &str) {
        self.allow.remove(permission);
        self.deny.insert(permission.to_string());
    }

    /// Remove a denial. Does not reinstate any grant.
    pub fn undeny(&mut self, permission: &str) {
        self.deny.remove(permission);
    }

    /// Resolve a single permission check, in strict precedence order:
    /// denials first (exact, global `*`, or any prefix wildcard), then
    /// direct grants, then the effective permissions of every active role.
    pub fn has_permission(&self, permission: &str, ranks: &RankManager) -> bool {
        if set_matches(&self.deny, permission) {
            return false;
        }
        if set_matches(&self.allow, permission) {
            return true;
        }

        for grant in self.active_roles() {
            if set_matches(&ranks.effective_permissions(&grant.rank), permission) {
                return true;
            }
        }

        false
    }

    /// Flatten the player's permission sources into one set: direct grants
    /// plus the effective permissions of every active role, minus denials.
    ///
    /// Denial subtraction here is by exact string only (a bare `*` empties
    /// the set); a denied wildcard like `a.*` does NOT strip the literal
    /// `a.b` from the result even though `has_permission("a.b")` reports
    /// false. Callers depend on both behaviors independently, so the two
    /// paths intentionally do not agree.
    pub fn all_permissions(&self, ranks: &RankManager) -> HashSet<String> {
        let mut permissions = self.allow.clone();
        for grant in self.active_roles() {
            permissions.extend(ranks.effective_permissions(&grant.rank));
        }

        if self.deny.contains(GLOBAL_WILDCARD) {
            permissions.clear();
            return permissions;
        }
        for denied in &self.deny {
            permissions.remove(denied);
        }
        permissions
    }
}
