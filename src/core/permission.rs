//! Wildcard permission matching
//!
//! Permissions are dot-separated strings. A permission set may contain the
//! global wildcard `*` or prefix wildcards ending in `.*`; `a.b.*` matches
//! `a.b.c` and anything more specific under `a.b`.

use std::collections::HashSet;

/// The global wildcard, matching every permission
pub const GLOBAL_WILDCARD: &str = "*";

/// Candidate prefix wildcards for a permission, most specific first.
///
/// For `a.b.c` the candidates are `a.b.*` then `a.*`. A single-segment
/// permission has no candidates.
pub fn wildcard_candidates(permission: &str) -> Vec<String> {
    let segments: Vec<&str> = permission.split('.').collect();
    if segments.len() < 2 {
        return Vec::new();
    }

    (1..segments.len())
        .rev()
        .map(|end| format!("{}.*", segments[..end].join(".")))
        .collect()
}

/// Whether `set` matches `permission`: exactly, via the global wildcard, or
/// via any prefix wildcard of the permission.
pub fn set_matches(set: &HashSet<String>, permission: &str) -> bool {
    if set.contains(permission) || set.contains(GLOBAL_WILDCARD) {
        return true;
    }

    wildcard_candidates(permission)
        .iter()
        .any(|candidate| set.contains(candidate))
}
