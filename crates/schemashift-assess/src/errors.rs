use thiserror::Error;

/// Errors emitted while building or publishing an assessment.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("core error: {0}")]
    Core(#[from] schemashift_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for assessment operations.
pub type Result<T> = std::result::Result<T, AssessError>;
