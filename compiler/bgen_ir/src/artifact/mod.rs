//! Generated artifacts.

use std::fmt;

/// Identifier of one generated artifact, unique within a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(id: impl Into<String>) -> Self {
        ArtifactId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the host should store the artifact under.
    pub fn file_name(&self) -> String {
        format!("{}.g.rs", self.0)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named unit of generated source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedArtifact {
    pub identifier: ArtifactId,
    pub text: String,
}

impl GeneratedArtifact {
    pub fn new(identifier: ArtifactId, text: impl Into<String>) -> Self {
        GeneratedArtifact {
            identifier,
            text: text.into(),
        }
    }
}
