use std::path::PathBuf;

use thiserror::Error;
use yaml_rust2::{EmitError, ScanError};

/// Errors raised while loading, rendering or writing values.
#[derive(Debug, Error)]
pub enum ValuesError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name} is not valid UTF-8: {source}")]
    Utf8 {
        source_name: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to parse {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: ScanError,
    },

    #[error("failed to parse {source_name}: expected a single document, found {count}")]
    MultipleDocuments { source_name: String, count: usize },

    #[error("failed to parse {source_name}: root must be a mapping, found {kind}")]
    NotAMapping {
        source_name: String,
        kind: &'static str,
    },

    #[error("chart directory {0} does not exist")]
    ChartNotFound(PathBuf),

    #[error("value {value} would not read back unchanged from the emitted YAML")]
    Unrepresentable { value: String },

    #[error("failed to emit YAML: {0}")]
    Emit(#[from] EmitError),
}

impl ValuesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ValuesError::Io {
            path: path.into(),
            source,
        }
    }
}
