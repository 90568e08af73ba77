use thiserror::Error as ThisError;

/// Failure taxonomy shared by every stage of the pipeline.
///
/// Configuration errors are skippable per unit of work, data integrity errors stop a series
/// before it reaches aggregation, and I/O style errors always surface to the caller.
#[derive(ThisError, Debug)]
pub enum ForecastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Invalid timezone '{0}': {1}")]
    InvalidTimezone(String, String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Configuration problems only skip the offending unit of work
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ForecastError::Config(_)
                | ForecastError::UnsupportedResolution(_)
                | ForecastError::UnknownLocation(_)
                | ForecastError::InvalidTimezone(_, _)
        )
    }
}

pub type ForecastResult<T> = std::result::Result<T, ForecastError>;
