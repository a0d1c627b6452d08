//! Last observed content version per credential.

use std::collections::HashMap;

/// Map of credential token to the last content version seen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheVersions(HashMap<String, u64>);

impl CacheVersions {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Version for `token`, or 0 when none was observed.
    pub fn get(&self, token: &str) -> u64 {
        self.0.get(token).copied().unwrap_or(0)
    }

    /// Whether a version was recorded for `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    /// Record `version` for `token`, returning the previous value.
    pub fn set(&mut self, token: &str, version: u64) -> u64 {
        self.0.insert(token.to_string(), version).unwrap_or(0)
    }

    /// Forget `token`.
    pub fn clear(&mut self, token: &str) {
        self.0.remove(token);
    }

    /// Forget every token.
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Snapshot of all recorded versions.
    pub fn all(&self) -> HashMap<String, u64> {
        self.0.clone()
    }
}
