//! Domain types and pure logic for the gated-download subsystem.
//!
//! This crate holds everything that needs no I/O at runtime: the asset
//! registry model, authorization-code validation, the localized message
//! catalog, and filename derivation. Stores and network access live in
//! sibling crates; callers pass in snapshots of whatever state the pure
//! functions need.

pub mod asset;
pub mod authcode;
pub mod error;
pub mod messages;
pub mod naming;
pub mod types;

pub use asset::{Asset, AssetRegistry, DEFAULT_MAX_DOWNLOADS};
pub use authcode::{validate_code, CodeRejection};
pub use error::CoreError;
pub use messages::{message, Locale, MessageKey, NotificationKind};
