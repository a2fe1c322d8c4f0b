use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub token not found in ${var}")]
    MissingToken { var: String },

    #[error("No run ID provided. Please provide the run ID.")]
    MissingRunId,

    #[error("Too many arguments provided. Please provide only the run ID.")]
    TooManyArguments,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch artifact info for run {run_id} (status {status})")]
    ListArtifacts { run_id: String, status: StatusCode },

    #[error("Failed to fetch artifact from {url} (status {status})")]
    FetchArtifact { url: String, status: StatusCode },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(
        "Artifact {artifact} of run {run_id} failed after {completed} of {total} were written: {source}"
    )]
    Incomplete {
        run_id: String,
        artifact: String,
        completed: usize,
        total: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
