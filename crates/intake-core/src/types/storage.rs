//! Storage upload submissions
//!
//! The storage provider batches "object created" events together. Each
//! batch becomes one [`StorageBatchSubmission`] holding one
//! [`StorageObjectSubmission`] per non-empty object, with the content id
//! derived from the key by the upload naming convention.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::notification::S3EventMessage;
use super::RawPayload;
use crate::config::{PrefixPolicy, StorageConfig};
use crate::utils::{decode_key, derive_content_id};
use crate::{Error, Result};

/// One uploaded object inside a batch notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageObjectSubmission {
    pub content_id: String,
    pub bucket: String,
    /// Decoded object key
    pub key: String,
}

/// All content-bearing objects from one notification, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageBatchSubmission {
    pub records: Vec<StorageObjectSubmission>,
}

impl StorageBatchSubmission {
    /// Parse a notification, failing the batch on any key outside `prefix`.
    pub fn from_raw(raw: &RawPayload, prefix: &str) -> Result<Self> {
        StorageBatchParser::new(prefix)
            .parse(raw)
            .map(|parsed| parsed.batch)
    }

    /// Cheap check used for routing. Never fails.
    pub fn could_be(raw: &RawPayload) -> bool {
        S3EventMessage::could_be(raw)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Counts of what happened to the records of one notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Records in the notification
    pub total: usize,
    /// Zero-byte objects (folder markers, empty uploads)
    pub skipped_empty: usize,
    /// Keys outside the prefix dropped under [`PrefixPolicy::SkipRecord`]
    pub skipped_foreign: usize,
}

impl BatchStats {
    pub fn accepted(&self) -> usize {
        self.total - self.skipped_empty - self.skipped_foreign
    }
}

/// A parsed batch together with its filter counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedBatch {
    pub batch: StorageBatchSubmission,
    pub stats: BatchStats,
}

/// Turns raw storage notifications into batches for one bucket layout
#[derive(Debug, Clone)]
pub struct StorageBatchParser {
    prefix: String,
    policy: PrefixPolicy,
}

impl StorageBatchParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            policy: PrefixPolicy::default(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.prefix.clone()).with_policy(config.prefix_policy)
    }

    pub fn with_policy(mut self, policy: PrefixPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn policy(&self) -> PrefixPolicy {
        self.policy
    }

    pub fn parse(&self, raw: &RawPayload) -> Result<ParsedBatch> {
        let message = S3EventMessage::from_raw(raw)?;

        let mut stats = BatchStats {
            total: message.records.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(message.records.len());

        for record in message.records {
            let key = decode_key(&record.s3.object.key);

            if record.s3.object.is_empty() {
                info!("Disregarding empty file or directory: {}", key);
                stats.skipped_empty += 1;
                continue;
            }

            let content_id = match derive_content_id(&key, &self.prefix) {
                Ok(id) => id,
                Err(err @ Error::NamingConventionViolation { .. }) => match self.policy {
                    PrefixPolicy::Reject => return Err(err),
                    PrefixPolicy::SkipRecord => {
                        warn!(
                            "Skipping {}/{}: key outside prefix {:?}",
                            record.s3.bucket.name, key, self.prefix
                        );
                        stats.skipped_foreign += 1;
                        continue;
                    }
                    PrefixPolicy::KeepFullKey => key.clone(),
                },
                Err(err) => return Err(err),
            };

            debug!(
                "Accepted {}/{} as {} ({:?})",
                record.s3.bucket.name, key, content_id, record.event_name
            );

            records.push(StorageObjectSubmission {
                content_id,
                bucket: record.s3.bucket.name,
                key,
            });
        }

        Ok(ParsedBatch {
            batch: StorageBatchSubmission { records },
            stats,
        })
    }
}
