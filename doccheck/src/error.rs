use shared::{DocError, PolicySubject, PolicyViolation};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{document}: {source}")]
    Document {
        document: String,
        #[source]
        source: DocError,
    },

    #[error("walking source tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("the contributor guide states no policy for {0}")]
    NoPolicy(PolicySubject),

    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting output: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
