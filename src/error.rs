use thiserror::Error;

/// Errors that can abort a run
/// Bad input lines are not errors here, see [`crate::models::Rejection`]
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
