//! Error types for schema generation and reflector configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort schema generation. No partial document is produced.
#[derive(Debug, Error)]
pub enum ReflectError {
    #[error("unsupported type {type_name} ({kind}) at {path}")]
    UnsupportedType {
        /// Dotted location of the offending field (e.g. `models.Job.done`).
        path: String,
        type_name: String,
        kind: &'static str,
    },
}

/// Errors while loading a [`Reflector`](crate::Reflector) configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}
