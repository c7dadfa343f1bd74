//! Error types for Intake

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Message Errors
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Storage key {key:?} does not start with configured prefix {prefix:?}")]
    NamingConventionViolation { key: String, prefix: String },

    #[error("Payload does not match any registered message family")]
    UnrecognizedMessage,

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    // Validation Errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Internal Errors
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedMessage(_) => "MalformedMessage",
            Error::NamingConventionViolation { .. } => "NamingConventionViolation",
            Error::UnrecognizedMessage => "UnrecognizedMessage",
            Error::UnknownContentType(_) => "UnknownContentType",
            Error::InvalidArgument(_) => "InvalidArgument",
            Error::InternalError(_) => "InternalError",
            Error::Io(_) => "InternalError",
        }
    }

    /// Shorthand for a payload that lacks a required key
    pub fn missing_key(key: &str) -> Self {
        Error::MalformedMessage(format!("missing required key {:?}", key))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedMessage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::missing_key("URL").code(), "MalformedMessage");
        assert_eq!(
            Error::NamingConventionViolation {
                key: "a".into(),
                prefix: "b/".into()
            }
            .code(),
            "NamingConventionViolation"
        );
        assert_eq!(Error::InternalError("x".into()).code(), "InternalError");
    }

    #[test]
    fn test_missing_key_message() {
        let err = Error::missing_key("ContentId");
        assert_eq!(err.to_string(), "Malformed message: missing required key \"ContentId\"");
    }
}
