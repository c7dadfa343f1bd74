//! Intake Dispatch
//!
//! Routes raw transport payloads to the message family that can parse them.

pub mod dispatcher;
pub mod metrics;

pub use dispatcher::{MessageFamily, Submission, SubmissionDispatcher};
pub use crate::metrics::DispatchMetrics;
