//! Dispatch metrics
//!
//! Emitted through the `metrics` facade; the binary decides whether a
//! recorder is installed. Without one every call is a no-op.

use intake_core::types::BatchStats;
use metrics::counter;

/// Metric names
pub mod names {
    pub const MESSAGES_TOTAL: &str = "intake_messages_total";
    pub const UNRECOGNIZED_MESSAGES_TOTAL: &str = "intake_unrecognized_messages_total";
    pub const RECORDS_ACCEPTED_TOTAL: &str = "intake_records_accepted_total";
    pub const RECORDS_SKIPPED_TOTAL: &str = "intake_records_skipped_total";
}

/// Skip reasons used as the `reason` label
pub mod reasons {
    pub const EMPTY_OBJECT: &str = "empty_object";
    pub const OUTSIDE_PREFIX: &str = "outside_prefix";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchMetrics;

impl DispatchMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Record one payload handled by `family`
    pub fn record_message(&self, family: &'static str, success: bool) {
        counter!(
            names::MESSAGES_TOTAL,
            "family" => family,
            "status" => if success { "success" } else { "error" }
        )
        .increment(1);
    }

    pub fn record_unrecognized(&self) {
        counter!(names::UNRECOGNIZED_MESSAGES_TOTAL).increment(1);
    }

    /// Record the filter outcome of one storage batch
    pub fn record_batch(&self, stats: &BatchStats) {
        counter!(names::RECORDS_ACCEPTED_TOTAL).increment(stats.accepted() as u64);

        if stats.skipped_empty > 0 {
            counter!(names::RECORDS_SKIPPED_TOTAL, "reason" => reasons::EMPTY_OBJECT)
                .increment(stats.skipped_empty as u64);
        }
        if stats.skipped_foreign > 0 {
            counter!(names::RECORDS_SKIPPED_TOTAL, "reason" => reasons::OUTSIDE_PREFIX)
                .increment(stats.skipped_foreign as u64);
        }
    }
}
