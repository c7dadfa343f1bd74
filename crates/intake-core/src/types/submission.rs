//! Direct URL submission messages
//!
//! Produced by the submission entry point and consumed by processing stages.
//! Wire shape:
//!
//! ```json
//! { "ContentType": "photo", "ContentId": "abc", "URL": "https://...", "EventType": "URLSubmission" }
//! ```

use super::content_type::ContentTypeName;
use super::{payload_from_json, payload_to_json, RawPayload};
use crate::{Error, Result, URL_SUBMISSION_EVENT_TYPE};
use serde::Serialize;
use serde_json::Value;

/// Wire keys
pub mod keys {
    pub const CONTENT_TYPE: &str = "ContentType";
    pub const CONTENT_ID: &str = "ContentId";
    pub const URL: &str = "URL";
    pub const EVENT_TYPE: &str = "EventType";
}

/// Content submitted by URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct URLSubmission {
    pub content_type: ContentTypeName,
    pub content_id: String,
    pub url: String,
    /// Distinguishes these messages from storage notifications
    pub event_type: String,
}

impl URLSubmission {
    pub fn new(
        content_type: impl Into<ContentTypeName>,
        content_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            content_id: content_id.into(),
            url: url.into(),
            event_type: URL_SUBMISSION_EVENT_TYPE.to_string(),
        }
    }

    /// Serialize into the four-key wire mapping
    pub fn to_raw(&self) -> RawPayload {
        let mut raw = RawPayload::new();
        raw.insert(
            keys::CONTENT_TYPE.to_string(),
            Value::String(self.content_type.0.clone()),
        );
        raw.insert(
            keys::CONTENT_ID.to_string(),
            Value::String(self.content_id.clone()),
        );
        raw.insert(keys::URL.to_string(), Value::String(self.url.clone()));
        raw.insert(
            keys::EVENT_TYPE.to_string(),
            Value::String(self.event_type.clone()),
        );
        raw
    }

    /// Rebuild a submission from its wire mapping.
    ///
    /// All four keys must be present and hold strings. Nothing else is
    /// checked: the content type name is carried through unresolved.
    pub fn from_raw(raw: &RawPayload) -> Result<Self> {
        Ok(Self {
            content_type: ContentTypeName(required_str(raw, keys::CONTENT_TYPE)?),
            content_id: required_str(raw, keys::CONTENT_ID)?,
            url: required_str(raw, keys::URL)?,
            event_type: required_str(raw, keys::EVENT_TYPE)?,
        })
    }

    /// Cheap check used for routing. True iff the event type key is present.
    pub fn could_be(raw: &RawPayload) -> bool {
        raw.contains_key(keys::EVENT_TYPE)
    }

    pub fn to_json(&self) -> String {
        payload_to_json(&self.to_raw())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_raw(&payload_from_json(json)?)
    }
}

fn required_str(raw: &RawPayload, key: &str) -> Result<String> {
    match raw.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::MalformedMessage(format!(
            "key {:?} must be a string, got {}",
            key, other
        ))),
        None => Err(Error::missing_key(key)),
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

    fn sample() -> URLSubmission {
        URLSubmission::new("photo", "abc123", "https://example.com/abc123.jpg")
    }

    #[test]
    fn test_new_sets_event_type() {
        assert_eq!(sample().event_type, "URLSubmission");
    }

    #[test]
    fn test_to_raw_has_exactly_four_keys() {
        let raw = sample().to_raw();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw["ContentType"], json!("photo"));
        assert_eq!(raw["ContentId"], json!("abc123"));
        assert_eq!(raw["URL"], json!("https://example.com/abc123.jpg"));
        assert_eq!(raw["EventType"], json!("URLSubmission"));
    }

    #[test]
    fn test_round_trip() {
        let original = sample();
        assert_eq!(URLSubmission::from_raw(&original.to_raw()).unwrap(), original);

        let odd = URLSubmission::new("", "id with spaces/é", "not a url");
        assert_eq!(URLSubmission::from_json(&odd.to_json()).unwrap(), odd);
    }

    #[test]
    fn test_from_raw_missing_url() {
        let payload = raw(json!({
            "ContentType": "photo",
            "ContentId": "abc123",
            "EventType": "URLSubmission"
        }));
        let err = URLSubmission::from_raw(&payload).unwrap_err();
        assert!(matches!(err, Error::MalformedMessage(ref m) if m.contains("URL")));
    }

    #[test]
    fn test_from_raw_each_key_required() {
        for missing in ["ContentType", "ContentId", "URL", "EventType"] {
            let mut payload = sample().to_raw();
            payload.remove(missing);
            let err = URLSubmission::from_raw(&payload).unwrap_err();
            assert_eq!(err.code(), "MalformedMessage", "missing {}", missing);
        }
    }

    #[test]
    fn test_from_raw_non_string_value() {
        let payload = raw(json!({
            "ContentType": "photo",
            "ContentId": 42,
            "URL": "https://example.com",
            "EventType": "URLSubmission"
        }));
        assert_eq!(
            URLSubmission::from_raw(&payload).unwrap_err().code(),
            "MalformedMessage"
        );
    }

    #[test]
    fn test_from_raw_ignores_extra_keys_and_keeps_names() {
        let payload = raw(json!({
            "ContentType": "hologram",
            "ContentId": "x",
            "URL": "u",
            "EventType": "Custom",
            "Extra": true
        }));
        let msg = URLSubmission::from_raw(&payload).unwrap();
        assert_eq!(msg.content_type.as_str(), "hologram");
        assert_eq!(msg.event_type, "Custom");
    }

    #[test]
    fn test_could_be() {
        assert!(URLSubmission::could_be(&sample().to_raw()));
        assert!(URLSubmission::could_be(&raw(json!({ "EventType": null }))));
        assert!(!URLSubmission::could_be(&raw(json!({ "Records": [] }))));
        assert!(!URLSubmission::could_be(&RawPayload::new()));
        assert!(!URLSubmission::could_be(&raw(json!({ "eventtype": "URLSubmission" }))));
    }
}
