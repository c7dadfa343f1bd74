//! Utility functions

use crate::{Error, Result};

/// Decode a storage key as it appears in an event notification.
///
/// Notification keys are form-encoded: `+` stands for a space and the rest
/// uses percent escapes. Byte sequences that are not valid UTF-8 after
/// decoding are replaced rather than rejected.
pub fn decode_key(encoded: &str) -> String {
    let spaced = encoded.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Derive a content id from a decoded storage key by stripping `prefix`.
pub fn derive_content_id(key: &str, prefix: &str) -> Result<String> {
    key.strip_prefix(prefix)
        .map(str::to_string)
        .ok_or_else(|| Error::NamingConventionViolation {
            key: key.to_string(),
            prefix: prefix.to_string(),
        })
}
