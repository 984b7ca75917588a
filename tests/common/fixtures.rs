//! Test fixtures and data factories
//!
//! Provides factory methods for creating engines with sensible defaults.
//! All factories create real objects, not mocks.

use chrono::{DateTime, Duration, Utc};
use rank_engine::{EngineConfig, RankEngine};

/// Factory for creating test engines
pub struct EngineFactory;

impl EngineFactory {
    /// Create an engine with empty tables and the default configuration
    pub fn empty() -> RankEngine {
        RankEngine::new(EngineConfig::default())
    }

    /// Create an engine with a small seeded rank graph:
    ///
    /// - `member` (weight 0, default): `chat.send`
    /// - `vip` (weight 10): `chat.color`
    /// - `moderator` (weight 5, inherits member): `kick.use`
    pub fn seeded() -> RankEngine {
        let engine = Self::empty();

        assert!(engine.create_rank("member", "", "", 0));
        assert!(engine.add_rank_permission("member", "chat.send"));
        assert!(engine.create_rank("vip", "[VIP] ", "", 10));
        assert!(engine.add_rank_permission("vip", "chat.color"));
        assert!(engine.create_rank("moderator", "[MOD] ", "", 5));
        assert!(engine.add_rank_permission("moderator", "kick.use"));
        assert!(engine.add_parent("moderator", "member"));

        engine
    }
}

/// An expiry instant just in the past
pub fn just_expired() -> DateTime<Utc> {
    Utc::now() - Duration::milliseconds(1)
}

/// An expiry instant comfortably in the future
pub fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}
