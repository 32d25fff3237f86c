//! Localized user-facing message catalog.
//!
//! Keys and locales are enums, so the mapping is total: every
//! `(locale, key)` pair resolves at compile time and a missing-translation
//! bug cannot ship. Amharic strings carry over from the catalog pages'
//! translation tables.

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Am,
}

impl Locale {
    /// Parse from a locale name (e.g. the `LOCALE` env var).
    pub fn from_name(name: &str) -> Result<Self, crate::error::CoreError> {
        match name {
            "en" => Ok(Self::En),
            "am" => Ok(Self::Am),
            other => Err(crate::error::CoreError::UnknownLocale(other.to_string())),
        }
    }

    /// The locale's short name.
    pub fn name(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Am => "am",
        }
    }
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Every user-facing message this subsystem can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Prompt heading: a code is needed before downloading.
    AuthRequired,
    /// Prompt body: ask the user to enter their code.
    AuthMessage,
    /// Info shown when the fetch begins.
    DownloadStarted,
    /// The download completed and was saved.
    DownloadSuccess,
    /// Submitted code was empty.
    CodeRequired,
    /// Submitted code matched no rule.
    InvalidCode,
    /// Submitted code was already consumed.
    CodeAlreadyUsed,
    /// The per-session quota for the asset is exhausted.
    DownloadLimitReached,
    /// The request or connection failed.
    NetworkError,
    /// The server answered with a non-success status.
    NotFound,
    /// The response body could not be materialized locally.
    DecodeError,
}

impl From<crate::authcode::CodeRejection> for MessageKey {
    fn from(rejection: crate::authcode::CodeRejection) -> Self {
        match rejection {
            crate::authcode::CodeRejection::Required => Self::CodeRequired,
            crate::authcode::CodeRejection::Invalid => Self::InvalidCode,
            crate::authcode::CodeRejection::AlreadyUsed => Self::CodeAlreadyUsed,
        }
    }
}

/// Resolve a message key to its localized string.
// TODO: distinct Amharic strings for NotFound/DecodeError once translated;
// both currently reuse the generic download-failure translation.
pub fn message(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::En => match key {
            MessageKey::AuthRequired => "Authorization Required",
            MessageKey::AuthMessage => "Please enter the authorization code to download",
            MessageKey::DownloadStarted => "Starting download...",
            MessageKey::DownloadSuccess => "Download started successfully!",
            MessageKey::CodeRequired => "Authorization code is required.",
            MessageKey::InvalidCode => "Invalid authorization code format or code not found.",
            MessageKey::CodeAlreadyUsed => "This code has already been used.",
            MessageKey::DownloadLimitReached => "Maximum download limit reached for this project.",
            MessageKey::NetworkError => "Network error occurred. Please try again.",
            MessageKey::NotFound => "The requested file could not be found.",
            MessageKey::DecodeError => "Download failed. Please try again.",
        },
        Locale::Am => match key {
            MessageKey::AuthRequired => "·çà·âÉ·ãµ ·ã´·àµ·çà·àç·åã·àç",
            MessageKey::AuthMessage => "·ä•·â£·ä≠·ãé ·ã®·çà·âÉ·ãµ ·äÆ·ãµ ·ã´·àµ·åà·â°",
            MessageKey::DownloadStarted => "·ã≥·ãç·äï·àé·ãµ ·ä•·ã®·åÄ·àò·à® ·äê·ãç...",
            MessageKey::DownloadSuccess => "·ã≥·ãç·äï·àé·ãµ ·â†·â∞·à≥·ä´ ·àÅ·äî·â≥ ·â∞·åÄ·àù·àØ·àç!",
            MessageKey::CodeRequired => "·ã®·çà·âÉ·ãµ ·äÆ·ãµ ·ã´·àµ·çà·àç·åã·àç·ç¢",
            MessageKey::InvalidCode => "·ã®·â∞·à≥·à≥·â∞ ·ã®·çà·âÉ·ãµ ·äÆ·ãµ ·âÖ·à≠·å∏·å∏·âµ ·ãà·ã≠·àù ·äÆ·ãµ ·ä†·àç·â∞·åà·äò·àù·ç¢",
            MessageKey::CodeAlreadyUsed => "·ã≠·àÖ ·äÆ·ãµ ·ä†·àµ·âÄ·ãµ·àû ·å•·âÖ·àù ·àã·ã≠ ·ãç·àè·àç·ç¢",
            MessageKey::DownloadLimitReached => "·àà·ãö·àÖ ·çï·àÆ·åÄ·ä≠·âµ ·ã®·ã≥·ãç·äï·àé·ãµ ·åà·ã∞·â• ·ã∞·à≠·à∑·àç·ç¢",
            MessageKey::NetworkError => "·ã®·ä†·ãç·â≥·à® ·àò·à®·â• ·àµ·àÖ·â∞·âµ ·â∞·ä®·àµ·â∑·àç·ç¢ ·ä•·â£·ä≠·ãé ·ä•·äï·ã∞·åà·äì ·ã≠·àû·ä≠·à©·ç¢",
            MessageKey::NotFound => "·ã≥·ãç·äï·àé·ãµ ·ä†·àç·â∞·à≥·ä´·àù·ç¢ ·ä•·â£·ä≠·ãé ·ä•·äï·ã∞·åà·äì ·ã≠·àû·ä≠·à©·ç¢",
            MessageKey::DecodeError => "·ã≥·ãç·äï·àé·ãµ ·ä†·àç·â∞·à≥·ä´·àù·ç¢ ·ä•·â£·ä≠·ãé ·ä•·äï·ã∞·åà·äì ·ã≠·àû·ä≠·à©·ç¢",
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
