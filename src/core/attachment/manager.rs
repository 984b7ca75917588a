//! Attachment lifecycle and refresh

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use super::sink::PermissionSink;
use crate::core::player::{PlayerId, PlayerManager};
use crate::core::ranks::RankManager;

/// Manager for per-player live permission caches
///
/// Each connected player is either unattached (no sink registered) or
/// attached (sink registered and kept consistent). At most one attachment
/// exists per player; attaching again replaces the previous sink.
pub struct PermissionManager {
    ranks: Arc<RankManager>,
    players: Arc<PlayerManager>,
    attachments: DashMap<PlayerId, Arc<dyn PermissionSink>>,
}

impl PermissionManager {
    /// Create a manager over the given rank and player tables
    pub fn new(ranks: Arc<RankManager>, players: Arc<PlayerManager>) -> Self {
        Self {
            ranks,
            players,
            attachments: DashMap::new(),
        }
    }

    /// Attach a sink for a player and push their current permission state
    /// into it. Creates the player record on first contact; replaces any
    /// existing attachment.
    pub fn attach(&self, id: PlayerId, sink: Arc<dyn PermissionSink>) {
        if self.attachments.insert(id, sink).is_some() {
            debug!(player = %id, "replacing existing attachment");
        }
        self.players.ensure(id);
        self.players.touch(id);
        self.refresh(id);
        info!(player = %id, "player attached");
    }

    /// Drop a player's attachment. Returns whether one existed.
    pub fn detach(&self, id: PlayerId) -> bool {
        let detached = self.attachments.remove(&id).is_some();
        if detached {
            self.players.touch(id);
            info!(player = %id, "player detached");
        }
        detached
    }

    /// Whether the player currently has an attachment
    pub fn is_attached(&self, id: PlayerId) -> bool {
        self.attachments.contains_key(&id)
    }

    /// Ids of all attached players
    pub fn attached_players(&self) -> Vec<PlayerId> {
        self.attachments.iter().map(|a| *a.key()).collect()
    }

    /// Recompute a player's permission state and replace their sink
    /// contents in one step. Returns false when the player is unattached.
    pub fn refresh(&self, id: PlayerId) -> bool {
        let Some(sink) = self.attachments.get(&id).map(|s| Arc::clone(s.value())) else {
            return false;
        };

        let (granted, denied) = self.compute(id);
        sink.replace(&granted, &denied);
        debug!(player = %id, granted = granted.len(), denied = denied.len(), "attachment refreshed");
        true
    }

    /// Refresh every attached player. Graph-wide mutations (rank created,
    /// deleted, or edited; parent edges changed) can silently affect many
    /// players, so callers invoke this after any of them.
    pub fn refresh_all(&self) {
        let ids = self.attached_players();
        for id in &ids {
            self.refresh(*id);
        }
        debug!(players = ids.len(), "refreshed all attachments");
    }

    /// Sweep expired role grants for every attached player, refreshing the
    /// ones that changed. Returns how many players changed.
    pub fn sweep_attached(&self) -> usize {
        let mut changed = 0;
        for id in self.attached_players() {
            if self.players.sweep_expired(id) {
                self.refresh(id);
                changed += 1;
            }
        }
        changed
    }

    /// A connected player must never be left without a resolvable
    /// permission state: an id with no record degrades to the default
    /// rank's permissions instead of erroring.
    fn compute(&self, id: PlayerId) -> (HashSet<String>, HashSet<String>) {
        match self.players.get(id) {
            Some(player) => (player.all_permissions(&self.ranks), player.deny.clone()),
            None => {
                warn!(
                    player = %id,
                    "no record for attached player; falling back to default rank permissions"
                );
                let fallback = self
                    .ranks
                    .effective_permissions(self.ranks.default_rank_name());
                (fallback, HashSet::new())
            }
        }
    }
}
