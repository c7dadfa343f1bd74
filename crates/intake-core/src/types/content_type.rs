//! Content type names and the registry seam used to resolve them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry name of a content type (e.g. `photo`, `video`).
///
/// Carried verbatim through the wire codecs. Resolving it to a descriptor is
/// left to whoever consumes the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTypeName(pub String);

impl ContentTypeName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn photo() -> Self {
        Self("photo".to_string())
    }

    pub fn video() -> Self {
        Self("video".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentTypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentTypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What a registry knows about a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeDescriptor {
    pub name: ContentTypeName,
    /// Lowercase file extensions associated with the type
    pub extensions: Vec<&'static str>,
}

impl ContentTypeDescriptor {
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

/// Resolves content type names to descriptors
pub trait ContentTypeRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Option<ContentTypeDescriptor>;

    fn names(&self) -> Vec<String>;

    /// Resolve or fail with `UnknownContentType`
    fn require(&self, name: &str) -> crate::Result<ContentTypeDescriptor> {
        self.resolve(name)
            .ok_or_else(|| crate::Error::UnknownContentType(name.to_string()))
    }

    /// Guess the content type of a path or URL from its file extension
    fn guess_from_path(&self, path: &str) -> Option<ContentTypeDescriptor> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        self.names()
            .iter()
            .filter_map(|name| self.resolve(name))
            .find(|d| d.matches_extension(ext))
    }
}

/// Registry with the built-in photo and video types
#[derive(Debug, Clone, Default)]
pub struct StaticContentTypeRegistry;

impl StaticContentTypeRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl ContentTypeRegistry for StaticContentTypeRegistry {
    fn resolve(&self, name: &str) -> Option<ContentTypeDescriptor> {
        match name {
            "photo" => Some(ContentTypeDescriptor {
                name: ContentTypeName::photo(),
                extensions: vec!["jpg", "jpeg", "png", "gif", "webp", "bmp"],
            }),
            "video" => Some(ContentTypeDescriptor {
                name: ContentTypeName::video(),
                extensions: vec!["mp4", "webm", "mov", "avi", "mkv"],
            }),
            _ => None,
        }
    }

    fn names(&self) -> Vec<String> {
        vec!["photo".to_string(), "video".to_string()]
    }
}
