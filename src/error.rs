//! Error types for parsing and configuration.

use crate::model::NodeKind;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions raised by the comment-block parser.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A comment match produced no block interior.
    #[error("tried to parse a missing comment block")]
    MissingBlock,

    /// Two nodes share a qualified name while duplicates are rejected.
    #[error("duplicate qualified name `{name}`: {incoming} conflicts with earlier {existing}")]
    DuplicateName {
        name: String,
        existing: NodeKind,
        incoming: NodeKind,
    },
}

/// Problems locating or reading the JSON config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
