//! Per-player records and the player table
//!
//! A [`PlayerData`] record holds a player's role grants, allow/deny
//! overrides, and display rank. Records reference ranks by name only, so a
//! deleted rank never requires a fix-up pass over player records.

mod manager;
mod overrides;
mod roles;
mod types;

pub use manager::PlayerManager;
pub use types::{PlayerData, PlayerId, RoleGrant};
