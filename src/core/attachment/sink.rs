//! Host-facing live permission cache interface

use std::collections::HashSet;

use parking_lot::RwLock;

/// The host runtime's mutable permission-check structure.
///
/// The engine pushes computed permission sets into the sink; it never reads
/// them back. Implementations backed by a swappable structure should
/// override [`PermissionSink::replace`] so readers never observe a
/// half-updated state.
pub trait PermissionSink: Send + Sync {
    /// Mark a permission as granted
    fn set_granted(&self, permission: &str);

    /// Mark a permission as denied
    fn set_denied(&self, permission: &str);

    /// Remove all grants and denials
    fn clear(&self);

    /// Replace the entire contents with the given sets.
    ///
    /// The default clears and re-adds entry by entry; hosts whose structure
    /// supports it should swap a fresh copy in atomically instead.
    fn replace(&self, granted: &HashSet<String>, denied: &HashSet<String>) {
        self.clear();
        for permission in granted {
            self.set_granted(permission);
        }
        for permission in denied {
            self.set_denied(permission);
        }
    }
}

#[derive(Debug, Default)]
struct SinkState {
    granted: HashSet<String>,
    denied: HashSet<String>,
}

/// Reference sink holding the sets behind a lock, with an atomic
/// copy-then-swap [`PermissionSink::replace`]. Useful for tests and for
/// hosts without a native permission structure.
#[derive(Debug, Default)]
pub struct InMemorySink {
    state: RwLock<SinkState>,
}

impl InMemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a permission is currently granted; denials win
    pub fn is_granted(&self, permission: &str) -> bool {
        let state = self.state.read();
        !state.denied.contains(permission) && state.granted.contains(permission)
    }

    /// Snapshot of the granted set
    pub fn granted(&self) -> HashSet<String> {
        self.state.read().granted.clone()
    }

    /// Snapshot of the denied set
    pub fn denied(&self) -> HashSet<String> {
        self.state.read().denied.clone()
    }
}

impl PermissionSink for InMemorySink {
    fn set_granted(&self, permission: &str) {
        let mut state = self.state.write();
        state.granted.insert(permission.to_string());
    }

    fn set_denied(&self, permission: &str) {
        let mut state = self.state.write();
        state.denied.insert(permission.to_string());
    }

    fn clear(&self) {
        let mut state = self.state.write();
        state.granted.clear();
        state.denied.clear();
    }

    fn replace(&self, granted: &HashSet<String>, denied: &HashSet<String>) {
        let fresh = SinkState {
            granted: granted.clone(),
            denied: denied.clone(),
        };
        *self.state.write() = fresh;
    }
}
