//! Per-session download counters.
//!
//! The quota is a session-scoped throttle, so counters start at zero on
//! every startup and are never persisted.

use std::collections::HashMap;

use codevault_core::types::AssetId;

/// In-memory map of successful downloads per asset this session.
#[derive(Debug, Default)]
pub struct SessionCounters {
    counts: HashMap<AssetId, u32>,
}

impl SessionCounters {
    /// Downloads recorded for `asset_id` (0 if unseen).
    pub fn get(&self, asset_id: &str) -> u32 {
        self.counts.get(asset_id).copied().unwrap_or(0)
    }

    /// Bump the counter for `asset_id`, returning the new count.
    pub fn increment(&mut self, asset_id: &str) -> u32 {
        let count = self.counts.entry(asset_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
