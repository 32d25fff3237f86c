//! Persisted consumed-code store.
//!
//! One well-known JSON file under the state directory holds the full list
//! of consumed codes. The file is read in full at open and rewritten
//! atomically (temp file + rename into place) on every record, mirroring
//! the read-parse-append-rewrite cycle of the original storage layout.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use codevault_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::LedgerError;

/// Well-known filename of the used-code ledger inside the state directory.
pub const USED_CODES_FILE: &str = "used_codes.json";

/// One consumed authorization code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedCodeRecord {
    pub code: String,
    pub consumed_at: Timestamp,
}

/// File-backed, append-only store of consumed codes.
#[derive(Debug)]
pub struct UsedCodeStore {
    path: PathBuf,
    records: Vec<UsedCodeRecord>,
    index: HashSet<String>,
}

impl UsedCodeStore {
    /// Open the store rooted at `state_dir`, creating the directory if
    /// needed and loading any existing ledger file.
    ///
    /// A corrupt ledger file is logged and treated as empty rather than
    /// failing startup; the next record rewrites it wholesale.
    pub fn open(state_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let state_dir = state_dir.as_ref();
        std::fs::create_dir_all(state_dir)?;
        let path = state_dir.join(USED_CODES_FILE);

        let records: Vec<UsedCodeRecord> = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Used-code file is corrupt, starting with an empty ledger"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let index = records.iter().map(|r| r.code.clone()).collect();
        Ok(Self {
            path,
            records,
            index,
        })
    }

    /// Whether `code` has been recorded.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains(code)
    }

    /// Record `code` as consumed and rewrite the ledger file.
    ///
    /// Returns `false` without touching the file when the code is already
    /// present.
    pub fn record(&mut self, code: &str) -> Result<bool, LedgerError> {
        if self.index.contains(code) {
            return Ok(false);
        }
        self.records.push(UsedCodeRecord {
            code: code.to_string(),
            consumed_at: Utc::now(),
        });
        self.index.insert(code.to_string());
        self.rewrite()?;
        tracing::debug!(code_count = self.records.len(), "Recorded consumed code");
        Ok(true)
    }

    /// Snapshot of the consumed-code set.
    pub fn snapshot(&self) -> HashSet<String> {
        self.index.clone()
    }

    /// Number of recorded codes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no codes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the full record list into a temp file in the state
    /// directory, then rename it over the ledger file. Readers never see a
    /// partially written file.
    fn rewrite(&self) -> Result<(), LedgerError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(tmp.as_file(), &self.records)?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
