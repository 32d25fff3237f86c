//! Consumed-code and download-quota bookkeeping.
//!
//! The two stores have different lifetimes: used codes are persisted to
//! disk so a restart cannot re-validate a consumed code, while download
//! counters are in-memory only. The quota is a session-scoped throttle,
//! not a permanent ban.
//!
//! [`Ledger`] is the seam the gate controller is generic over, so flows can
//! be unit-tested against in-memory fakes.

pub mod counters;
pub mod used_codes;

use std::collections::HashSet;
use std::path::Path;

pub use counters::SessionCounters;
pub use used_codes::{UsedCodeRecord, UsedCodeStore, USED_CODES_FILE};

/// Errors from the persisted used-code store.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Used-code store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Used-code store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace used-code file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Consumed-code and download-counter operations.
///
/// Mutating operations take `&mut self`: all ledger writes happen inside
/// the controller's single serialized validation path, so no interior
/// locking is needed.
pub trait Ledger {
    /// Whether `code` has ever been recorded as consumed.
    fn is_code_used(&self, code: &str) -> bool;

    /// Record `code` as consumed. Append-only: recording an
    /// already-present code is a no-op.
    fn record_used_code(&mut self, code: &str) -> Result<(), LedgerError>;

    /// Successful downloads of `asset_id` this session (0 if unseen).
    fn get_download_count(&self, asset_id: &str) -> u32;

    /// Bump the counter for `asset_id`, returning the new count.
    fn increment_download_count(&mut self, asset_id: &str) -> u32;

    /// Read-only snapshot of the consumed-code set, for the validator.
    fn used_code_snapshot(&self) -> HashSet<String>;
}

/// Production ledger: persisted used codes plus session counters.
#[derive(Debug)]
pub struct DownloadLedger {
    used: UsedCodeStore,
    counters: SessionCounters,
}

impl DownloadLedger {
    /// Open the ledger, loading any previously persisted used codes from
    /// `state_dir`. A missing file means a fresh ledger; an unreadable or
    /// corrupt file is logged and likewise treated as fresh.
    pub fn open(state_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        Ok(Self {
            used: UsedCodeStore::open(state_dir)?,
            counters: SessionCounters::default(),
        })
    }
}

impl Ledger for DownloadLedger {
    fn is_code_used(&self, code: &str) -> bool {
        self.used.contains(code)
    }

    fn record_used_code(&mut self, code: &str) -> Result<(), LedgerError> {
        self.used.record(code)?;
        Ok(())
    }

    fn get_download_count(&self, asset_id: &str) -> u32 {
        self.counters.get(asset_id)
    }

    fn increment_download_count(&mut self, asset_id: &str) -> u32 {
        self.counters.increment(asset_id)
    }

    fn used_code_snapshot(&self) -> HashSet<String> {
        self.used.snapshot()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
