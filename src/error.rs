use thiserror::Error;

/// Errors returned by the recipe catalog client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The catalog could not be reached or answered with a failure status
    #[error("Recipe catalog unavailable: {0}")]
    SourceUnavailable(String),

    /// The catalog answered but the body was not usable
    #[error("{0}")]
    MalformedResponse(String),

    /// The catalog has no record for the requested id
    #[error("Recipe not found: {0}")]
    NotFound(String),
}

impl SourceError {
    /// Status shown by the error view. Every catalog failure is reported as 500.
    pub fn status(&self) -> u16 {
        500
    }

    /// Message shown by the error view
    pub fn user_message(&self) -> String {
        match self {
            SourceError::SourceUnavailable(_) => "Network error occurred".to_string(),
            SourceError::MalformedResponse(msg) => msg.clone(),
            SourceError::NotFound(_) => "Recipe not found".to_string(),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::MalformedResponse(err.to_string())
        } else {
            SourceError::SourceUnavailable(err.to_string())
        }
    }
}

/// Errors raised by durable storage backends.
///
/// These never escape the favorites store; they are logged and reported
/// through [`crate::favorites::StoreEvent`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored data could not be parsed
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    /// Writing to storage failed
    #[error("Failed to write to storage: {0}")]
    WriteFailed(String),

    /// The value does not fit into the storage quota
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Underlying filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the value failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Recipe catalog failure
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid command-line usage
    #[error("Usage error: {0}")]
    Usage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_messages() {
        let err = SourceError::MalformedResponse("Failed to fetch meals".to_string());
        assert_eq!(err.to_string(), "Failed to fetch meals");
        assert_eq!(err.user_message(), "Failed to fetch meals");
        assert_eq!(err.status(), 500);

        let err = SourceError::SourceUnavailable("connection refused".to_string());
        assert_eq!(err.user_message(), "Network error occurred");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_app_error_from_source_error() {
        let err: AppError = SourceError::NotFound("52874".to_string()).into();
        assert_eq!(err.to_string(), "Recipe not found: 52874");
    }
}
