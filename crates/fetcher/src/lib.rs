//! Asynchronous fetch-and-save of gated binary resources.
//!
//! [`AssetFetcher`] performs a plain HTTP GET, classifies the failure mode,
//! and materializes the body on disk through a scoped temporary file. The
//! [`Fetcher`] trait is the seam the gate controller is generic over, so
//! download flows can be tested without a network.

pub mod client;

use std::path::PathBuf;

pub use client::{AssetFetcher, DEFAULT_TIMEOUT_SECS};

/// How a fetch failed, in the vocabulary surfaced to users.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Resource not available (HTTP {status})")]
    NotFound { status: u16 },

    /// The request never completed: connection failure, DNS, TLS, or
    /// timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The response arrived but its body could not be read or written out
    /// as a local file.
    #[error("Failed to materialize downloaded file: {0}")]
    Decode(String),
}

/// A successfully saved download.
#[derive(Debug, Clone)]
pub struct SavedAsset {
    /// Final on-disk location.
    pub path: PathBuf,
    /// Size of the saved body in bytes.
    pub bytes_written: u64,
}

/// Fetch a resource and save it under the suggested filename.
#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch_and_save(
        &self,
        resource_locator: &str,
        file_name: &str,
    ) -> Result<SavedAsset, FetchError>;
}
