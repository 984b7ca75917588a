//! Player record types

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Stable identifier for a player
pub type PlayerId = Uuid;

/// A rank held by a player, optionally until an expiry instant
#[derive(Debug, Clone)]
pub struct RoleGrant {
    /// Rank name (weak string reference, original casing)
    pub rank: String,
    /// Expiry instant; `None` grants the rank permanently
    pub expires_at: Option<DateTime<Utc>>,
}

impl RoleGrant {
    /// Create a grant for a rank
    pub fn new(rank: &str, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            rank: rank.to_string(),
            expires_at,
        }
    }

    /// Whether the grant is permanent or its expiry lies in the future
    pub fn is_active(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            return Utc::now() < expires_at;
        }
        true
    }

    /// Whether the grant's expiry has passed
    pub fn is_expired(&self) -> bool {
        !self.is_active()
    }
}

/// Mutable per-player record
///
/// Expired grants stay in `roles` until a sweep removes them; expiry is a
/// query-time filter so that resolution never mutates the record.
#[derive(Debug, Clone)]
pub struct PlayerData {
    /// Stable player id
    pub id: PlayerId,
    /// Rank used for display (prefix/suffix, sorting)
    pub primary_rank: String,
    /// Role grants keyed by normalized rank name
    pub(crate) roles: HashMap<String, RoleGrant>,
    /// Player-specific permission grants, independent of any rank
    pub allow: HashSet<String>,
    /// Player-specific permission denials, independent of any rank
    pub deny: HashSet<String>,
    /// Advisory timestamp updated on connect/disconnect; never consulted by
    /// resolution
    pub last_active: DateTime<Utc>,
}

impl PlayerData {
    /// Create a record holding only the default rank, permanently
    pub fn new(id: PlayerId, default_rank: &str) -> Self {
        let grant = RoleGrant::new(default_rank, None);
        let mut roles = HashMap::new();
        roles.insert(crate::core::rank::rank_key(default_rank), grant);

        Self {
            id,
            primary_rank: default_rank.to_string(),
            roles,
            allow: HashSet::new(),
            deny: HashSet::new(),
            last_active: Utc::now(),
        }
    }
}
