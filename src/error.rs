use std::path::PathBuf;

/// Errors surfaced at the edges of the list block (paste input, config, stored records).
///
/// Editing itself never fails: empty views and missing data are treated as
/// benign states and handled by guards.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("unsupported paste tag <{0}>, expected <ol>, <ul> or <li>")]
    UnsupportedPasteTag(String),

    #[error("pasted markup does not start with an element")]
    MalformedPaste,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid list record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ListError>;
