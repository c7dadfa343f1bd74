//! Core types for Intake

mod content_type;
mod notification;
mod storage;
mod submission;

pub use content_type::*;
pub use notification::*;
pub use storage::*;
pub use submission::*;

/// Untyped string-keyed message as handed over by the transport
pub type RawPayload = serde_json::Map<String, serde_json::Value>;

/// Parse message text into a raw payload; the top level must be an object.
pub fn payload_from_json(json: &str) -> crate::Result<RawPayload> {
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(crate::Error::MalformedMessage(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

pub fn payload_to_json(raw: &RawPayload) -> String {
    serde_json::Value::Object(raw.clone()).to_string()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_json() {
        let raw = payload_from_json(r#"{"EventType":"URLSubmission"}"#).unwrap();
        assert!(raw.contains_key("EventType"));

        let err = payload_from_json("[1,2]").unwrap_err();
        assert!(err.to_string().contains("an array"));

        let err = payload_from_json("{not json").unwrap_err();
        assert_eq!(err.code(), "MalformedMessage");
    }

    #[test]
    fn test_payload_to_json() {
        let raw = payload_from_json(r#"{"a":"b"}"#).unwrap();
        assert_eq!(payload_to_json(&raw), r#"{"a":"b"}"#);
    }
}
