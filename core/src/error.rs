//! Error types for the traversal engines
//!
//! Unreachable targets are not errors: they yield an empty path set and an
//! unreached cost.

use thiserror::Error;

/// Errors surfaced by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// Operation issued in the wrong lifecycle state: start node set twice
    /// without reset, query before a start node, or reuse after a failed run.
    #[error("invalid engine state: {reason}")]
    InvalidState { reason: String },

    /// The cost evaluator produced a cost the algebra rejects: below zero
    /// under its comparator, or NaN for floats.
    #[error("unsupported edge cost {cost}")]
    UnsupportedCost { cost: String },

    #[error("invalid {context}: {value}")]
    InvalidConfig { context: String, value: String },
}

impl TraversalError {
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        TraversalError::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn unsupported_cost(cost: impl std::fmt::Debug) -> Self {
        TraversalError::UnsupportedCost {
            cost: format!("{:?}", cost),
        }
    }

    pub fn invalid_config(context: &str, value: impl std::fmt::Display) -> Self {
        TraversalError::InvalidConfig {
            context: context.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, TraversalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TraversalError::invalid_state("start node already set");
        assert_eq!(err.to_string(), "invalid engine state: start node already set");

        let err = TraversalError::unsupported_cost(-3i64);
        assert_eq!(err.to_string(), "unsupported edge cost -3");

        let err = TraversalError::invalid_config("direction", "sideways");
        assert_eq!(err.to_string(), "invalid direction: sideways");
    }
}
