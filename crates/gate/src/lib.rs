//! The download-prompt gate.
//!
//! [`GateController`] composes the code validator, the download ledger, the
//! asset fetcher, and the notification queue into the prompt-and-validate
//! flow guarding each download. No error escapes it: every failure settles
//! back into a stable state plus a queued notification.

pub mod controller;

pub use controller::{GateController, GateState, RequestOutcome, SubmitOutcome};
