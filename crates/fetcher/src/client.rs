//! HTTP download client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::{FetchError, Fetcher, SavedAsset};

/// Default per-request timeout in seconds. Expiry is reported as a
/// [`FetchError::Network`] like any other connection failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Downloads gated resources into a local directory.
///
/// Holds a shared [`reqwest::Client`] so connections are pooled across
/// downloads. The timeout applies per request.
pub struct AssetFetcher {
    client: reqwest::Client,
    download_dir: PathBuf,
    timeout: Duration,
}

impl AssetFetcher {
    /// Create a fetcher saving into `download_dir` with the default timeout.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            download_dir: download_dir.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory downloads are saved into.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Write `bytes` to `file_name` inside the download directory via a
    /// scoped temporary file.
    ///
    /// The temp file lives in the same directory as the final path so the
    /// rename is atomic; on any failure the handle is dropped and the
    /// partial file deleted with it.
    fn save_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<SavedAsset, FetchError> {
        std::fs::create_dir_all(&self.download_dir)
            .map_err(|e| FetchError::Decode(format!("cannot create download directory: {e}")))?;

        let mut tmp = NamedTempFile::new_in(&self.download_dir)
            .map_err(|e| FetchError::Decode(format!("cannot create temporary file: {e}")))?;
        std::io::Write::write_all(&mut tmp, bytes)
            .map_err(|e| FetchError::Decode(format!("cannot write download body: {e}")))?;

        let path = self.download_dir.join(file_name);
        tmp.persist(&path)
            .map_err(|e| FetchError::Decode(format!("cannot finalize downloaded file: {e}")))?;

        Ok(SavedAsset {
            path,
            bytes_written: bytes.len() as u64,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for AssetFetcher {
    /// GET `resource_locator` and save the body as `file_name`.
    ///
    /// Any 2xx status with a readable body is success. Non-2xx statuses map
    /// to [`FetchError::NotFound`], transport failures (including timeout)
    /// to [`FetchError::Network`], and body-read or file-materialization
    /// failures to [`FetchError::Decode`].
    async fn fetch_and_save(
        &self,
        resource_locator: &str,
        file_name: &str,
    ) -> Result<SavedAsset, FetchError> {
        let response = self
            .client
            .get(resource_locator)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::NotFound {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let saved = self.save_bytes(file_name, &bytes)?;
        tracing::info!(
            locator = resource_locator,
            path = %saved.path.display(),
            bytes = saved.bytes_written,
            "Saved downloaded asset"
        );
        Ok(saved)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_body_to_final_path() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetFetcher::new(dir.path());

        let saved = fetcher.save_bytes("stack.cpp", b"int main() {}").unwrap();
        assert_eq!(saved.path, dir.path().join("stack.cpp"));
        assert_eq!(saved.bytes_written, 13);
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"int main() {}");
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetFetcher::new(dir.path());

        fetcher.save_bytes("a.bin", b"old").unwrap();
        fetcher.save_bytes("a.bin", b"new contents").unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("a.bin")).unwrap(),
            b"new contents"
        );
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetFetcher::new(dir.path());

        fetcher.save_bytes("kept.bin", b"data").unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["kept.bin"]);
    }

    #[test]
    fn save_creates_missing_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("downloads");
        let fetcher = AssetFetcher::new(&nested);

        let saved = fetcher.save_bytes("x.zip", b"zip").unwrap();
        assert!(saved.path.starts_with(&nested));
        assert!(saved.path.exists());
    }
}
