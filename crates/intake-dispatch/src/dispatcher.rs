//! Submission Dispatcher
//!
//! Both message families arrive as plain string-keyed mappings with no
//! shared type tag. Each family contributes a cheap `could_be` probe and a
//! strict parser; the dispatcher tries the probes in registration order
//! and hands the payload to the first family that claims it.
//!
//! The default order is URL submission first, storage batch second. A
//! payload carrying both `EventType` and a `Records` list is therefore
//! treated as a URL submission.

use intake_core::config::StorageConfig;
use intake_core::types::{ParsedBatch, StorageBatchParser, StorageBatchSubmission, URLSubmission};
use intake_core::{Error, RawPayload, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::metrics::DispatchMetrics;

/// Family names as reported by [`SubmissionDispatcher::classify`]
pub mod families {
    pub const URL_SUBMISSION: &str = "url_submission";
    pub const STORAGE_BATCH: &str = "storage_batch";
}

/// A typed message produced by one of the built-in families
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", content = "message", rename_all = "snake_case")]
pub enum Submission {
    #[serde(rename = "url_submission")]
    Url(URLSubmission),
    StorageBatch(ParsedBatch),
}

impl Submission {
    pub fn family(&self) -> &'static str {
        match self {
            Submission::Url(_) => families::URL_SUBMISSION,
            Submission::StorageBatch(_) => families::STORAGE_BATCH,
        }
    }

    pub fn as_url(&self) -> Option<&URLSubmission> {
        match self {
            Submission::Url(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn as_storage_batch(&self) -> Option<&StorageBatchSubmission> {
        match self {
            Submission::StorageBatch(parsed) => Some(&parsed.batch),
            _ => None,
        }
    }
}

type ParseFn<T> = Box<dyn Fn(&RawPayload) -> Result<T> + Send + Sync>;

/// One routable message family: a non-failing probe plus a strict parser
pub struct MessageFamily<T> {
    name: &'static str,
    could_be: fn(&RawPayload) -> bool,
    parse: ParseFn<T>,
}

impl<T> MessageFamily<T> {
    pub fn new<F>(name: &'static str, could_be: fn(&RawPayload) -> bool, parse: F) -> Self
    where
        F: Fn(&RawPayload) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name,
            could_be,
            parse: Box::new(parse),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn could_be(&self, raw: &RawPayload) -> bool {
        (self.could_be)(raw)
    }

    pub fn parse(&self, raw: &RawPayload) -> Result<T> {
        (self.parse)(raw)
    }
}

impl<T> fmt::Debug for MessageFamily<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFamily")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// URL submissions, recognised by the `EventType` key
pub fn url_submission_family() -> MessageFamily<Submission> {
    MessageFamily::new(families::URL_SUBMISSION, URLSubmission::could_be, |raw| {
        URLSubmission::from_raw(raw).map(Submission::Url)
    })
}

/// Storage batch notifications, recognised by a `Records` list of `s3` records
pub fn storage_batch_family(
    parser: StorageBatchParser,
    metrics: DispatchMetrics,
) -> MessageFamily<Submission> {
    MessageFamily::new(
        families::STORAGE_BATCH,
        StorageBatchSubmission::could_be,
        move |raw| {
            let parsed = parser.parse(raw)?;
            metrics.record_batch(&parsed.stats);
            Ok(Submission::StorageBatch(parsed))
        },
    )
}

/// Ordered family registry
pub struct SubmissionDispatcher<T = Submission> {
    families: Vec<MessageFamily<T>>,
    metrics: DispatchMetrics,
}

impl SubmissionDispatcher<Submission> {
    /// Dispatcher for the built-in families, URL submission first
    pub fn new(config: &StorageConfig) -> Self {
        let metrics = DispatchMetrics::new();
        Self::empty()
            .register(url_submission_family())
            .register(storage_batch_family(
                StorageBatchParser::from_config(config),
                metrics,
            ))
    }
}

impl<T> SubmissionDispatcher<T> {
    /// Dispatcher with no families; every payload is unrecognised
    pub fn empty() -> Self {
        Self {
            families: Vec::new(),
            metrics: DispatchMetrics::new(),
        }
    }

    /// Append a family. Families are probed in registration order.
    pub fn register(mut self, family: MessageFamily<T>) -> Self {
        debug!("Registered message family {}", family.name());
        self.families.push(family);
        self
    }

    pub fn family_names(&self) -> Vec<&'static str> {
        self.families.iter().map(MessageFamily::name).collect()
    }

    /// Name of the first family whose probe accepts `raw`. Never fails.
    pub fn classify(&self, raw: &RawPayload) -> Option<&'static str> {
        self.find(raw).map(MessageFamily::name)
    }

    /// Route `raw` to the first matching family and parse it strictly
    pub fn dispatch(&self, raw: &RawPayload) -> Result<T> {
        let Some(family) = self.find(raw) else {
            warn!(
                "Unrecognized payload with keys {:?}",
                raw.keys().collect::<Vec<_>>()
            );
            self.metrics.record_unrecognized();
            return Err(Error::UnrecognizedMessage);
        };

        match family.parse(raw) {
            Ok(message) => {
                info!("Dispatched payload as {}", family.name());
                self.metrics.record_message(family.name(), true);
                Ok(message)
            }
            Err(e) => {
                warn!("Failed to parse {} payload: {}", family.name(), e);
                self.metrics.record_message(family.name(), false);
                Err(e)
            }
        }
    }

    fn find(&self, raw: &RawPayload) -> Option<&MessageFamily<T>> {
        self.families.iter().find(|family| family.could_be(raw))
    }
}

impl<T> fmt::Debug for SubmissionDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionDispatcher")
            .field("families", &self.family_names())
            .finish()
    }
}
