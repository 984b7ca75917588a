//! Rank type definition

use std::collections::HashSet;

/// A named rank carrying a permission set, display strings, a weight, and
/// the ranks it inherits from.
///
/// Rank names are unique case-insensitively; the original casing is kept for
/// display. Parents are referenced by name only, so a deleted parent simply
/// stops contributing permissions.
#[derive(Debug, Clone)]
pub struct Rank {
    /// Display name (original casing)
    pub name: String,
    /// Display prefix, opaque to the engine
    pub prefix: String,
    /// Display suffix, opaque to the engine
    pub suffix: String,
    /// Seniority; higher weights win primary-rank selection and sort first
    pub weight: i32,
    /// Whether this is the configured default rank
    pub is_default: bool,
    /// Permissions granted by this rank, wildcards allowed
    pub permissions: HashSet<String>,
    /// Names of ranks this rank inherits permissions from
    pub parents: HashSet<String>,
}

impl Rank {
    /// Create a rank with empty permissions and no parents
    pub fn new(name: &str, prefix: &str, suffix: &str, weight: i32) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            weight,
            is_default: false,
            permissions: HashSet::new(),
            parents: HashSet::new(),
        }
    }

    /// Normalized lookup key for this rank
    pub fn key(&self) -> String {
        rank_key(&self.name)
    }
}

/// Normalized lookup key for a rank name; names compare case-insensitively
pub fn rank_key(name: &str) -> String {
    name.to_lowercase()
}
