use codevault_core::messages::Locale;
use codevault_fetcher::DEFAULT_TIMEOUT_SECS;

/// Runtime configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the asset registry JSON file (default: `registry.json`).
    pub registry_path: String,
    /// Directory downloads are saved into (default: `downloads`).
    pub download_dir: String,
    /// Directory the used-code ledger file lives in (default: `state`).
    pub state_dir: String,
    /// Per-request fetch timeout in seconds (default: `30`).
    pub fetch_timeout_secs: u64,
    /// Display locale for notifications (default: `en`).
    pub locale: Locale,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default         |
    /// |----------------------|-----------------|
    /// | `REGISTRY_PATH`      | `registry.json` |
    /// | `DOWNLOAD_DIR`       | `downloads`     |
    /// | `STATE_DIR`          | `state`         |
    /// | `FETCH_TIMEOUT_SECS` | `30`            |
    /// | `LOCALE`             | `en`            |
    pub fn from_env() -> anyhow::Result<Self> {
        let registry_path =
            std::env::var("REGISTRY_PATH").unwrap_or_else(|_| "registry.json".into());
        let download_dir = std::env::var("DOWNLOAD_DIR").unwrap_or_else(|_| "downloads".into());
        let state_dir = std::env::var("STATE_DIR").unwrap_or_else(|_| "state".into());

        let fetch_timeout_secs: u64 = std::env::var("FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()?;

        let locale = Locale::from_name(&std::env::var("LOCALE").unwrap_or_else(|_| "en".into()))?;

        Ok(Self {
            registry_path,
            download_dir,
            state_dir,
            fetch_timeout_secs,
            locale,
        })
    }
}
