use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The two independently loaded artifact groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactGroup {
    Popularity,
    Collaborative,
}

impl std::fmt::Display for ArtifactGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactGroup::Popularity => write!(f, "popularity"),
            ArtifactGroup::Collaborative => write!(f, "collaborative filtering"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Artifact '{artifact}' not found at {path}")]
    ArtifactMissing { artifact: String, path: String },

    #[error("Artifact '{artifact}' has an invalid schema: {reason}")]
    SchemaInvalid { artifact: String, reason: String },

    #[error("Unknown title: {0}")]
    UnknownTitle(String),

    #[error("No metadata found for title: {0}")]
    MetadataNotFound(String),

    #[error("The {group} feature is unavailable: {reason}")]
    Unavailable { group: ArtifactGroup, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn schema(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SchemaInvalid {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }
}
