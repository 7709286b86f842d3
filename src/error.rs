use std::path::PathBuf;

use thiserror::Error;

/// Every way a batch run can fail.  Any of these aborts the whole run;
/// plots written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{file}: no [Data] marker line found")]
    MissingSectionMarker { file: String },

    #[error("{file}, line {line}: expected 2 tab-separated fields, found {fields} in '{content}'")]
    MalformedRow {
        file: String,
        line: usize,
        content: String,
        fields: usize,
    },

    #[error("{table}, row {row}: column '{column}' value '{value}' is not a number")]
    NumericCoercion {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering {}: {message}", .path.display())]
    Plot { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
