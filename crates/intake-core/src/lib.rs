//! Intake Core Library
//!
//! Message types and wire codecs for content submissions: direct URL
//! submissions and storage "object created" batch notifications.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::IntakeConfig;
pub use error::{Error, Result};
pub use types::RawPayload;

/// Intake version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Discriminant carried by every URL submission message
pub const URL_SUBMISSION_EVENT_TYPE: &str = "URLSubmission";

/// Field whose presence marks a storage-provider notification record
pub const STORAGE_RECORD_MARKER: &str = "s3";
