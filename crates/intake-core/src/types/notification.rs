//! Event Notification types
//!
//! Inbound view of the storage provider's "object created" notification.
//! Only the bucket name, object key and size are required. Everything
//! else in the AWS-compatible record is ignored, except the event name,
//! which is kept for logging when it is a string.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::RawPayload;
use crate::STORAGE_RECORD_MARKER;

// ============================================================================
// Event Record (S3 Event Message Format)
// ============================================================================

/// S3 Event message (contains multiple records)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3EventMessage {
    pub records: Vec<S3EventRecord>,
}

/// S3 Event record (AWS-compatible format)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    /// Event name, e.g. `ObjectCreated:Put`
    #[serde(default, deserialize_with = "string_or_none")]
    pub event_name: Option<String>,
    /// S3 info
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    pub bucket: S3BucketInfo,
    pub object: S3ObjectInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3BucketInfo {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ObjectInfo {
    /// Form-encoded object key
    pub key: String,
    pub size: u64,
}

/// Accept any JSON value; only strings are kept
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_string))
}

impl S3EventMessage {
    /// Strictly decode a notification; any missing required field is an error.
    pub fn from_raw(raw: &RawPayload) -> crate::Result<Self> {
        if !raw.contains_key("Records") {
            return Err(crate::Error::missing_key("Records"));
        }
        Self::deserialize(Value::Object(raw.clone())).map_err(|e| {
            crate::Error::MalformedMessage(format!("invalid storage notification: {}", e))
        })
    }

    /// True iff `Records` is a non-empty list whose first element carries
    /// the provider marker field. Never fails.
    pub fn could_be(raw: &RawPayload) -> bool {
        raw.get("Records")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .and_then(Value::as_object)
            .is_some_and(|first| first.contains_key(STORAGE_RECORD_MARKER))
    }
}

impl S3ObjectInfo {
    /// Folder markers and empty uploads carry no content
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawPayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_from_raw_minimal() {
        let message = S3EventMessage::from_raw(&raw(json!({
            "Records": [
                { "s3": { "bucket": { "name": "b" }, "object": { "key": "k", "size": 3 } } }
            ]
        })))
        .unwrap();

        assert_eq!(message.records.len(), 1);
        let record = &message.records[0];
        assert_eq!(record.s3.bucket.name, "b");
        assert_eq!(record.s3.object.key, "k");
        assert!(!record.s3.object.is_empty());
        assert!(record.event_name.is_none());
    }

    #[test]
    fn test_from_raw_full_aws_record() {
        let message = S3EventMessage::from_raw(&raw(json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-01-01T00:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "cfg",
                    "bucket": { "name": "media", "arn": "arn:aws:s3:::media" },
                    "object": {
                        "key": "images/a.jpg",
                        "size": 1024,
                        "eTag": "abc",
                        "sequencer": "00"
                    }
                }
            }]
        })))
        .unwrap();

        let record = &message.records[0];
        assert_eq!(record.event_name.as_deref(), Some("ObjectCreated:Put"));
        assert_eq!(record.s3.object.size, 1024);
    }

    #[test]
    fn test_event_name_of_wrong_type_is_dropped() {
        let message = S3EventMessage::from_raw(&raw(json!({
            "Records": [
                { "eventName": 7, "s3": { "bucket": { "name": "b" }, "object": { "key": "k", "size": 1 } } },
                { "eventName": null, "s3": { "bucket": { "name": "b" }, "object": { "key": "k", "size": 1 } } }
            ]
        })))
        .unwrap();

        assert!(message.records[0].event_name.is_none());
        assert!(message.records[1].event_name.is_none());
    }

    #[test]
    fn test_from_raw_missing_fields() {
        let cases = [
            json!({}),
            json!({ "Records": "nope" }),
            json!({ "Records": [{ "s3": { "object": { "key": "k", "size": 1 } } }] }),
            json!({ "Records": [{ "s3": { "bucket": { "name": "b" }, "object": { "size": 1 } } }] }),
            json!({ "Records": [{ "s3": { "bucket": { "name": "b" }, "object": { "key": "k" } } }] }),
            json!({ "Records": [{ "s3": { "bucket": { "name": "b" }, "object": { "key": "k", "size": -1 } } }] }),
        ];
        for case in cases {
            let err = S3EventMessage::from_raw(&raw(case.clone())).unwrap_err();
            assert_eq!(err.code(), "MalformedMessage", "case {}", case);
        }
    }

    #[test]
    fn test_could_be() {
        assert!(S3EventMessage::could_be(&raw(json!({ "Records": [{ "s3": {} }] }))));
        assert!(S3EventMessage::could_be(&raw(json!({
            "Records": [{ "s3": {} }, { "other": 1 }]
        }))));

        assert!(!S3EventMessage::could_be(&RawPayload::new()));
        assert!(!S3EventMessage::could_be(&raw(json!({ "Records": [] }))));
        assert!(!S3EventMessage::could_be(&raw(json!({ "Records": null }))));
        assert!(!S3EventMessage::could_be(&raw(json!({ "Records": "s3" }))));
        assert!(!S3EventMessage::could_be(&raw(json!({ "Records": [1, { "s3": {} }] }))));
        assert!(!S3EventMessage::could_be(&raw(json!({ "Records": [{ "sns": {} }] }))));
        assert!(!S3EventMessage::could_be(&raw(json!({ "EventType": "URLSubmission" }))));
    }
}
