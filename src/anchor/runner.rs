//! Batch grounding of many rules against one snapshot.
//!
//! [`GroundingRunner`] anchors every rule of a batch in the same state.
//! Rules only read the snapshot, so with the `parallel` feature the batch
//! is spread over the rayon thread pool.

use super::anchored::AnchoredRule;
use super::config::GroundingConfig;
use crate::error::Result;
use crate::rules::Rule;
use crate::state::StateSnapshot;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of grounding a batch of rules.
#[derive(Debug)]
pub struct GroundingResult<'a> {
    /// Anchored rules, in the order of the input batch.
    ///
    /// Irrelevant rules are missing when
    /// [`GroundingConfig::skip_irrelevant`] is set.
    pub anchored: Vec<AnchoredRule<'a>>,

    /// Number of rules grounded.
    pub grounded: usize,

    /// Number of relevant rules.
    pub relevant: usize,

    /// Number of irrelevant rules left out of `anchored`.
    pub skipped: usize,
}

impl<'a> GroundingResult<'a> {
    /// Iterates over the relevant anchored rules.
    pub fn relevant_rules(&self) -> impl Iterator<Item = &AnchoredRule<'a>> {
        self.anchored.iter().filter(|a| a.is_relevant())
    }

    /// The anchored rule with the given id, if present.
    pub fn get(&self, id: &str) -> Option<&AnchoredRule<'a>> {
        self.anchored.iter().find(|a| a.id() == id)
    }
}

/// Grounds batches of rules.
///
/// # Usage
///
/// ```
/// use u_anchor::anchor::{GroundingConfig, GroundingRunner};
/// use u_anchor::domain::Assignment;
/// use u_anchor::rules::{CaseRule, Effect, Rule, RuleCase, RuleKind};
/// use u_anchor::state::DialogueState;
///
/// let rules: Vec<Box<dyn Rule>> = vec![
///     Box::new(CaseRule::new("greet", RuleKind::Probability).with_case(
///         RuleCase::when(Assignment::new().with("u_u", "hello"))
///             .then(Effect::new().with("a_m", "Greet"), ["theta_greet"]),
///     )),
///     Box::new(CaseRule::new("idle", RuleKind::Probability).with_input("u_u")),
/// ];
/// let state = DialogueState::new().with_node("u_u", ["hello", "bye"]);
///
/// let config = GroundingConfig::default().with_skip_irrelevant(true);
/// let result = GroundingRunner::run(&rules, &state, &config).unwrap();
/// assert_eq!(result.grounded, 2);
/// assert_eq!(result.anchored.len(), 1);
/// assert_eq!(result.skipped, 1);
/// ```
pub struct GroundingRunner;

impl GroundingRunner {
    /// Anchors every rule of `rules` in `state`.
    ///
    /// Results keep the order of `rules`. If several rules fail, the error
    /// of the first failing rule (in batch order) is returned and no
    /// result is produced.
    pub fn run<'a, R: Rule>(
        rules: &'a [R],
        state: &'a dyn StateSnapshot,
        config: &GroundingConfig,
    ) -> Result<GroundingResult<'a>> {
        config.validate()?;
        let _span = tracing::info_span!("ground_batch", rules = rules.len()).entered();

        let anchored = anchor_all(rules, state, config)?;
        let grounded = anchored.len();
        let relevant = anchored.iter().filter(|a| a.is_relevant()).count();

        let anchored: Vec<AnchoredRule<'a>> = if config.skip_irrelevant {
            anchored.into_iter().filter(|a| a.is_relevant()).collect()
        } else {
            anchored
        };
        let skipped = grounded - anchored.len();

        tracing::info!(grounded, relevant, skipped, "batch grounded");

        Ok(GroundingResult {
            anchored,
            grounded,
            relevant,
            skipped,
        })
    }
}

#[cfg(feature = "parallel")]
fn anchor_all<'a, R: Rule>(
    rules: &'a [R],
    state: &'a dyn StateSnapshot,
    config: &GroundingConfig,
) -> Result<Vec<AnchoredRule<'a>>> {
    if !config.parallel {
        return anchor_sequential(rules, state, config);
    }
    let outcomes: Vec<Result<AnchoredRule<'a>>> = rules
        .par_iter()
        .map(|rule| AnchoredRule::with_config(rule, state, config))
        .collect();
    outcomes.into_iter().collect()
}

#[cfg(not(feature = "parallel"))]
fn anchor_all<'a, R: Rule>(
    rules: &'a [R],
    state: &'a dyn StateSnapshot,
    config: &GroundingConfig,
) -> Result<Vec<AnchoredRule<'a>>> {
    anchor_sequential(rules, state, config)
}

fn anchor_sequential<'a, R: Rule>(
    rules: &'a [R],
    state: &'a dyn StateSnapshot,
    config: &GroundingConfig,
) -> Result<Vec<AnchoredRule<'a>>> {
    rules
        .iter()
        .map(|rule| AnchoredRule::with_config(rule, state, config))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
