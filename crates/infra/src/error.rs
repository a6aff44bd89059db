use std::path::PathBuf;

use thiserror::Error;

/// Failures at the table-loading boundary.
///
/// These halt the calling workflow; the projection engine itself never sees them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {source_name} at line {line}: {source}")]
    Csv {
        source_name: String,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}
