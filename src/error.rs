//! Error types for curve generation, shunt analysis and rendering

use std::io;
use thiserror::Error;

/// Result type for library operations
pub type TacResult<T> = Result<T, TacError>;

/// Errors that can occur while generating, analyzing or rendering a TAC run
#[derive(Error, Debug)]
pub enum TacError {
    /// A parameter or window does not fit the generated data
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Both region sums are zero, the shunt ratio is undefined
    #[error("Degenerate shunt window: liver counts {liver_counts}, heart counts {heart_counts}")]
    DegenerateShunt { liver_counts: f64, heart_counts: f64 },

    /// Plotting backend failure
    #[error("Render failed: {0}")]
    Render(String),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed TOML configuration
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Report serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TacError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        TacError::InvalidParameter(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_descriptive() {
        let err = TacError::invalid("lag_heart 0 is below 1");
        assert_eq!(err.to_string(), "Invalid parameter: lag_heart 0 is below 1");

        let err = TacError::DegenerateShunt { liver_counts: 0.0, heart_counts: 0.0 };
        assert!(err.to_string().contains("Degenerate shunt window"));
    }
}
