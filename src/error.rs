use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions of an analysis run.
///
/// Unresolved includes and include cycles are regular outcomes recorded in
/// the report and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument {}: {reason}", path.display())]
    InvalidArgument { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to enumerate project files: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
