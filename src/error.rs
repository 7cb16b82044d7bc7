//! Error types for the grounding engine.
//!
//! Missing input variables and empty value sets are not errors: they are
//! part of normal partial-state grounding. What remains is configuration
//! mistakes, unbounded enumeration and faults raised by rules themselves.

use thiserror::Error;

/// Error raised by a [`Rule`](crate::rules::Rule) while evaluating an assignment.
pub type RuleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GroundingError>;

/// Errors returned while grounding rules against a state snapshot.
#[derive(Debug, Error)]
pub enum GroundingError {
    /// A rule returned an error for one input assignment.
    #[error("rule '{rule_id}' failed to evaluate input [{assignment}]")]
    RuleEvaluation {
        /// Failing rule.
        rule_id: String,
        /// The input assignment, rendered as text.
        assignment: String,
        /// Error raised by the rule.
        #[source]
        source: RuleError,
    },

    /// The input product exceeds the configured assignment limit.
    #[error("rule '{rule_id}' would enumerate {size} input assignments (limit: {limit})")]
    DomainTooLarge {
        /// Rule whose input domain exceeded the limit.
        rule_id: String,
        /// Product size, or `usize::MAX` when it overflowed.
        size: usize,
        /// Configured `max_assignments`.
        limit: usize,
    },

    /// A variable template could not be compiled.
    #[error("invalid variable template '{pattern}': {reason}")]
    InvalidTemplate { pattern: String, reason: String },

    /// A [`GroundingConfig`](crate::anchor::GroundingConfig) failed validation.
    #[error("invalid grounding configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GroundingError {
    /// Identifier of the rule the error relates to, if any.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            GroundingError::RuleEvaluation { rule_id, .. }
            | GroundingError::DomainTooLarge { rule_id, .. } => Some(rule_id),
            GroundingError::InvalidTemplate { .. } | GroundingError::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_rule_evaluation_keeps_source() {
        let err = GroundingError::RuleEvaluation {
            rule_id: "r1".into(),
            assignment: "S=greet".into(),
            source: "lookup table missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'r1' failed to evaluate input [S=greet]"
        );
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("lookup table missing".to_string())
        );
        assert_eq!(err.rule_id(), Some("r1"));
    }

    #[test]
    fn test_config_error_has_no_rule() {
        let err = GroundingError::InvalidConfig {
            reason: "max_assignments must be positive".into(),
        };
        assert!(err.rule_id().is_none());
        assert!(err.to_string().contains("max_assignments"));
    }
}
