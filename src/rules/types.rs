//! Core trait for probabilistic rules.

use super::RuleOutput;
use crate::domain::Assignment;
use crate::error::RuleError;
use std::collections::BTreeSet;
use std::fmt;

/// Kind of a rule: does it weight effects by probability or by utility?
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Effects are weighted by probabilities (prediction / update rules).
    #[default]
    Probability,
    /// Effects are weighted by utilities (action selection rules).
    Utility,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Probability => f.write_str("prob"),
            RuleKind::Utility => f.write_str("util"),
        }
    }
}

/// A symbolic rule mapping input assignments to weighted effects.
///
/// Rules are defined outside this crate (typically by a domain parser);
/// the grounding engine only relies on this contract.
///
/// # Thread Safety
///
/// `Rule` must be `Send + Sync` because independent rules may be grounded
/// in parallel against the same state snapshot.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_anchor::domain::{Assignment, Value};
/// use u_anchor::error::RuleError;
/// use u_anchor::rules::{Effect, Rule, RuleKind, RuleOutput};
///
/// struct Echo;
///
/// impl Rule for Echo {
///     fn id(&self) -> &str { "echo" }
///     fn input_variables(&self) -> BTreeSet<String> { ["u_u".to_string()].into() }
///     fn output_variables(&self) -> BTreeSet<String> { ["a_m".to_string()].into() }
///     fn kind(&self) -> RuleKind { RuleKind::Probability }
///
///     fn evaluate(&self, input: &Assignment) -> Result<RuleOutput, RuleError> {
///         let mut out = RuleOutput::new(self.kind());
///         if let Some(v) = input.value("u_u") {
///             out.add_effect(Effect::new().with("a_m", v.clone()), ["theta_echo"]);
///         }
///         Ok(out)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique rule identifier.
    fn id(&self) -> &str;

    /// Declared input variable names. Entries may be templates
    /// (see [`Template`](super::Template)).
    fn input_variables(&self) -> BTreeSet<String>;

    /// Declared output variable names (without next-value marker).
    fn output_variables(&self) -> BTreeSet<String>;

    /// Whether the rule is a probability or a utility rule.
    fn kind(&self) -> RuleKind;

    /// Whether the rule's effects are action templates resolved later
    /// rather than concrete values.
    ///
    /// The default implementation returns `false`.
    fn has_underspecified_effects(&self) -> bool {
        false
    }

    /// Parameter ids declared by the rule itself.
    ///
    /// The default implementation declares none.
    fn parameter_ids(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Computes the output for one input assignment.
    ///
    /// Must be pure: the same assignment always yields the same output.
    /// An error is treated as a defect of the rule definition and aborts
    /// grounding.
    fn evaluate(&self, input: &Assignment) -> Result<RuleOutput, RuleError>;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn input_variables(&self) -> BTreeSet<String> {
        (**self).input_variables()
    }

    fn output_variables(&self) -> BTreeSet<String> {
        (**self).output_variables()
    }

    fn kind(&self) -> RuleKind {
        (**self).kind()
    }

    fn has_underspecified_effects(&self) -> bool {
        (**self).has_underspecified_effects()
    }

    fn parameter_ids(&self) -> BTreeSet<String> {
        (**self).parameter_ids()
    }

    fn evaluate(&self, input: &Assignment) -> Result<RuleOutput, RuleError> {
        (**self).evaluate(input)
    }
}
