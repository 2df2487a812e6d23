//! Error types for the perceptris crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the perceptris crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("network capacity of {capacity} nodes exhausted")]
    CapacityExceeded { capacity: usize },

    #[error("bad node id(s) [{from}, {to}] for a network of {dimension} nodes")]
    InvalidNodeId {
        from: usize,
        to: usize,
        dimension: usize,
    },

    #[error("malformed match: {message}")]
    MalformedMatch { message: String },

    #[error("unexpected final classification '{got}' while mining {kind} lessons")]
    UnexpectedClassification { kind: String, got: String },

    #[error("inconsistent transition at cell {cell}: {from} -> {to}")]
    InconsistentTransition {
        cell: usize,
        from: String,
        to: String,
    },

    #[error("no destination cell between consecutive boards '{from}' and '{to}'")]
    MissingDestination { from: String, to: String },

    #[error("lesson target cell {target} is off the board (must be 0-8)")]
    InvalidLessonTarget { target: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("cell {position} is already occupied")]
    CellOccupied { position: usize },

    #[error("invalid board string '{input}': {reason}")]
    InvalidBoardString { input: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lesson file {path:?} at line {line}: {message}")]
    MalformedLessonFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl Error {
    /// True for errors that signal a broken internal invariant rather than bad
    /// input or a failing environment. No operation retries after one of these.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidNodeId { .. }
                | Error::MalformedMatch { .. }
                | Error::UnexpectedClassification { .. }
                | Error::InconsistentTransition { .. }
                | Error::MissingDestination { .. }
                | Error::InvalidLessonTarget { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_category() {
        let err = Error::InvalidNodeId {
            from: 3,
            to: 400,
            dimension: 10,
        };
        assert!(err.is_invariant_violation());
        assert!(!Error::CapacityExceeded { capacity: 300 }.is_invariant_violation());
        assert!(!Error::CellOccupied { position: 4 }.is_invariant_violation());
    }

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = Error::InvalidNodeId {
            from: 3,
            to: 400,
            dimension: 10,
        };
        assert_eq!(
            err.to_string(),
            "bad node id(s) [3, 400] for a network of 10 nodes"
        );
    }
}
