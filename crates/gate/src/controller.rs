//! Download-prompt state machine.

use codevault_core::asset::Asset;
use codevault_core::authcode::{validate_code, CodeRejection};
use codevault_core::messages::{message, Locale, MessageKey, NotificationKind};
use codevault_core::naming::suggested_file_name;
use codevault_fetcher::{FetchError, Fetcher, SavedAsset};
use codevault_ledger::Ledger;
use codevault_notify::NotificationQueue;

/// Where the gate currently is in the prompt flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No prompt is open.
    Idle,
    /// The prompt is open for a selected asset, awaiting a code.
    PromptOpen,
    /// A submission is being validated/fetched; further submissions are
    /// ignored until it settles.
    Validating,
}

/// Result of [`GateController::request_download`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The prompt opened for the asset.
    PromptOpened,
    /// The session quota is exhausted; the prompt never opens.
    LimitReached,
    /// A prompt or submission is already in progress.
    Busy,
}

/// Result of [`GateController::submit_code`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// No prompt was open (or a submission was already in flight).
    Ignored,
    /// The code failed validation; the prompt stays open.
    Rejected(CodeRejection),
    /// The code was accepted but the fetch failed; the prompt reopens.
    FetchFailed(FetchError),
    /// The asset was fetched and saved; the prompt closed.
    Downloaded(SavedAsset),
}

/// Drives the prompt-and-validate flow for one catalog surface.
///
/// Generic over its [`Ledger`] and [`Fetcher`] so tests can inject
/// in-memory fakes. State transitions all run through `&mut self`, which
/// serializes them; asynchronous work (the fetch, notification expiry)
/// never executes transition logic concurrently.
pub struct GateController<L, F> {
    state: GateState,
    selected: Option<Asset>,
    code_input: String,
    ledger: L,
    fetcher: F,
    queue: NotificationQueue,
    locale: Locale,
}

impl<L: Ledger, F: Fetcher> GateController<L, F> {
    pub fn new(ledger: L, fetcher: F, queue: NotificationQueue, locale: Locale) -> Self {
        Self {
            state: GateState::Idle,
            selected: None,
            code_input: String::new(),
            ledger,
            fetcher,
            queue,
            locale,
        }
    }

    /// Current state of the flow.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// The asset the open prompt is for, if any.
    pub fn selected_asset(&self) -> Option<&Asset> {
        self.selected.as_ref()
    }

    /// The code from the in-flight or last-failed submission. Cleared when
    /// the prompt opens, when a fetch fails, on cancel, and on success.
    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    /// Read access to the ledger (e.g. for rendering remaining quota).
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Read access to the fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Begin the download flow for `asset`.
    ///
    /// Only acts from [`GateState::Idle`]. When the session quota for the
    /// asset is already exhausted, a `DownloadLimitReached` notification is
    /// queued and the prompt never opens.
    pub fn request_download(&mut self, asset: &Asset) -> RequestOutcome {
        if self.state != GateState::Idle {
            tracing::debug!(asset_id = %asset.id, state = ?self.state, "Ignoring download request");
            return RequestOutcome::Busy;
        }

        let count = self.ledger.get_download_count(&asset.id);
        if count >= asset.max_downloads_per_session {
            tracing::info!(
                asset_id = %asset.id,
                count,
                limit = asset.max_downloads_per_session,
                "Download limit reached, prompt not opened"
            );
            self.notify(NotificationKind::Error, MessageKey::DownloadLimitReached);
            return RequestOutcome::LimitReached;
        }

        self.selected = Some(asset.clone());
        self.code_input.clear();
        self.state = GateState::PromptOpen;
        RequestOutcome::PromptOpened
    }

    /// Submit an authorization code for the open prompt.
    ///
    /// Valid only from [`GateState::PromptOpen`]; calls in any other state
    /// are ignored, which limits the controller to a single in-flight
    /// submission. Validation failure keeps the prompt open; fetch failure
    /// reopens it with the code input cleared; success closes it.
    pub async fn submit_code(&mut self, code: &str) -> SubmitOutcome {
        if self.state != GateState::PromptOpen {
            tracing::debug!(state = ?self.state, "Ignoring code submission");
            return SubmitOutcome::Ignored;
        }
        let Some(asset) = self.selected.clone() else {
            // Unreachable by construction; recover to Idle rather than panic.
            self.state = GateState::Idle;
            return SubmitOutcome::Ignored;
        };

        self.state = GateState::Validating;
        self.code_input = code.to_string();

        let used_codes = self.ledger.used_code_snapshot();
        if let Err(rejection) = validate_code(&asset, code, &used_codes) {
            tracing::info!(asset_id = %asset.id, ?rejection, "Code rejected");
            self.notify(NotificationKind::Error, MessageKey::from(rejection));
            self.state = GateState::PromptOpen;
            return SubmitOutcome::Rejected(rejection);
        }

        self.notify(NotificationKind::Info, MessageKey::DownloadStarted);

        let file_name = suggested_file_name(&asset);
        match self
            .fetcher
            .fetch_and_save(&asset.resource_locator, &file_name)
            .await
        {
            Ok(saved) => {
                let code = code.trim();
                if let Err(e) = self.ledger.record_used_code(code) {
                    // The download already succeeded; the code is still
                    // consumed in memory for the rest of the session.
                    tracing::warn!(error = %e, "Failed to persist consumed code");
                }
                let count = self.ledger.increment_download_count(&asset.id);
                tracing::info!(
                    asset_id = %asset.id,
                    count,
                    path = %saved.path.display(),
                    "Asset downloaded"
                );
                self.notify(NotificationKind::Success, MessageKey::DownloadSuccess);
                self.selected = None;
                self.code_input.clear();
                self.state = GateState::Idle;
                SubmitOutcome::Downloaded(saved)
            }
            Err(err) => {
                tracing::warn!(asset_id = %asset.id, error = %err, "Fetch failed");
                self.notify(NotificationKind::Error, fetch_error_key(&err));
                self.code_input.clear();
                self.state = GateState::PromptOpen;
                SubmitOutcome::FetchFailed(err)
            }
        }
    }

    /// Close the prompt without side effects.
    ///
    /// Acts only from [`GateState::PromptOpen`] and returns whether a
    /// prompt was actually closed. A cancel while [`GateState::Validating`]
    /// is ignored: the in-flight submission still settles, and its ledger
    /// and notification effects still occur.
    pub fn cancel(&mut self) -> bool {
        if self.state != GateState::PromptOpen {
            return false;
        }
        self.selected = None;
        self.code_input.clear();
        self.state = GateState::Idle;
        true
    }

    fn notify(&self, kind: NotificationKind, key: MessageKey) {
        self.queue.enqueue(kind, message(self.locale, key));
    }
}

/// Map a fetch failure to its user-facing message key.
fn fetch_error_key(err: &FetchError) -> MessageKey {
    match err {
        FetchError::NotFound { .. } => MessageKey::NotFound,
        FetchError::Network(_) => MessageKey::NetworkError,
        FetchError::Decode(_) => MessageKey::DecodeError,
    }
}
