//! Grounding configuration.
//!
//! [`GroundingConfig`] bounds the enumeration performed per rule and
//! controls how batches are scheduled.

use crate::error::{GroundingError, Result};

/// Configuration for grounding rules against a state snapshot.
///
/// # Defaults
///
/// ```
/// use u_anchor::anchor::GroundingConfig;
///
/// let config = GroundingConfig::default();
/// assert_eq!(config.max_assignments, Some(1 << 20));
/// assert!(config.parallel);
/// assert!(!config.skip_irrelevant);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_anchor::anchor::GroundingConfig;
///
/// let config = GroundingConfig::default()
///     .with_max_assignments(10_000)
///     .with_parallel(false)
///     .with_skip_irrelevant(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingConfig {
    /// Maximum number of input assignments enumerated for one rule.
    ///
    /// Grounding fails with [`GroundingError::DomainTooLarge`] when the
    /// Cartesian product of the input domain is larger. `None` disables
    /// the check.
    pub max_assignments: Option<usize>,

    /// Whether batches are grounded in parallel using rayon.
    ///
    /// Only effective with the `parallel` cargo feature.
    pub parallel: bool,

    /// Whether batch results leave out rules that are not relevant.
    pub skip_irrelevant: bool,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            max_assignments: Some(1 << 20),
            parallel: true,
            skip_irrelevant: false,
        }
    }
}

impl GroundingConfig {
    /// Sets the assignment cap.
    pub fn with_max_assignments(mut self, n: usize) -> Self {
        self.max_assignments = Some(n);
        self
    }

    /// Removes the assignment cap.
    pub fn without_limit(mut self) -> Self {
        self.max_assignments = None;
        self
    }

    /// Enables or disables parallel batch grounding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables pruning of irrelevant rules from batch results.
    pub fn with_skip_irrelevant(mut self, skip: bool) -> Self {
        self.skip_irrelevant = skip;
        self
    }

    /// Preset for interactive use: small cap, sequential, prunes irrelevant rules.
    ///
    /// - Max assignments: 4096
    pub fn strict() -> Self {
        Self {
            max_assignments: Some(4096),
            parallel: false,
            skip_irrelevant: true,
        }
    }

    /// Preset without any enumeration cap.
    ///
    /// The caller is responsible for keeping input domains small.
    pub fn unbounded() -> Self {
        Self {
            max_assignments: None,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_assignments == Some(0) {
            return Err(GroundingError::InvalidConfig {
                reason: "max_assignments must be positive or None".into(),
            });
        }
        Ok(())
    }
}
