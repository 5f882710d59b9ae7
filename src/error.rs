use std::fmt;

/// Result type for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Main error type for the explorer library
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerError {
    /// A value outside the closed action/observation vocabulary, or a query
    /// that does not fit the map
    Model {
        reason: String,
    },

    /// Malformed map or invalid parameters at construction time
    Configuration {
        reason: String,
    },

    /// A session call made in the wrong phase of the turn
    OutOfTurn {
        expected: String,
        actual: String,
    },

    /// A belief grid that is not a probability mass function
    InvalidBelief {
        reason: String,
    },

    /// IO errors (file operations)
    Io(String),

    /// Serialization/deserialization errors
    Serialization(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::Model { reason } => write!(f, "Model error: {}", reason),
            ExplorerError::Configuration { reason } => {
                write!(f, "Configuration error: {}", reason)
            }
            ExplorerError::OutOfTurn { expected, actual } => {
                write!(f, "Out of turn: expected {}, session is {}", expected, actual)
            }
            ExplorerError::InvalidBelief { reason } => write!(f, "Invalid belief: {}", reason),
            ExplorerError::Io(msg) => write!(f, "IO error: {}", msg),
            ExplorerError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ExplorerError {}

// Conversion from std::io::Error
impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        ExplorerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Serialization(err.to_string())
    }
}

// Helper functions for common error patterns
impl ExplorerError {
    pub fn model<S: Into<String>>(reason: S) -> Self {
        ExplorerError::Model {
            reason: reason.into(),
        }
    }

    pub fn configuration<S: Into<String>>(reason: S) -> Self {
        ExplorerError::Configuration {
            reason: reason.into(),
        }
    }

    pub fn out_of_turn<S: Into<String>>(expected: S, actual: S) -> Self {
        ExplorerError::OutOfTurn {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_belief<S: Into<String>>(reason: S) -> Self {
        ExplorerError::InvalidBelief {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ExplorerError::model("unknown sensor action 7");
        assert_eq!(err.to_string(), "Model error: unknown sensor action 7");

        let err = ExplorerError::out_of_turn("AwaitingObservation", "AwaitingSensorAction");
        assert!(err.to_string().contains("expected AwaitingObservation"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: ExplorerError = io.into();
        assert!(matches!(err, ExplorerError::Io(_)));
    }
}
