//! Table-driven rule implementation.

use super::{Effect, Rule, RuleKind, RuleOutput};
use crate::domain::Assignment;
use crate::error::RuleError;
use std::collections::BTreeSet;

/// One `if condition then effects` branch of a [`CaseRule`].
#[derive(Debug, Clone, Default)]
pub struct RuleCase {
    /// Bindings that must all hold in the input. Empty means "always".
    pub condition: Assignment,
    /// Effects with their parameter ids.
    pub effects: Vec<(Effect, BTreeSet<String>)>,
}

impl RuleCase {
    /// Creates a case guarded by `condition`.
    pub fn when(condition: Assignment) -> Self {
        Self {
            condition,
            effects: Vec::new(),
        }
    }

    /// Creates an unconditional case.
    pub fn otherwise() -> Self {
        Self::default()
    }

    /// Adds an effect weighted by the given parameter ids.
    pub fn then<I, S>(mut self, effect: Effect, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effects
            .push((effect, parameters.into_iter().map(Into::into).collect()));
        self
    }

    fn is_satisfied(&self, input: &Assignment) -> bool {
        input.contains_all(&self.condition)
    }
}

/// A rule made of ordered cases; the first satisfied case produces the output.
///
/// Inputs that satisfy no case yield an empty output. Input and output
/// variables default to the ones mentioned by the cases and can be widened
/// with the builder.
///
/// # Examples
///
/// ```
/// use u_anchor::domain::Assignment;
/// use u_anchor::rules::{CaseRule, Effect, Rule, RuleCase, RuleKind};
///
/// let rule = CaseRule::new("R1", RuleKind::Probability)
///     .with_case(
///         RuleCase::when(Assignment::new().with("S", "greet"))
///             .then(Effect::new().with("intent", "greeting"), ["p1"]),
///     )
///     .with_case(
///         RuleCase::when(Assignment::new().with("S", "bye"))
///             .then(Effect::new().with("intent", "farewell"), Vec::<String>::new()),
///     );
///
/// let out = rule.evaluate(&Assignment::new().with("S", "greet")).unwrap();
/// assert!(out.has_concrete_effect());
/// assert!(rule.input_variables().contains("S"));
/// ```
#[derive(Debug, Clone)]
pub struct CaseRule {
    id: String,
    kind: RuleKind,
    cases: Vec<RuleCase>,
    extra_inputs: BTreeSet<String>,
    extra_outputs: BTreeSet<String>,
    parameters: BTreeSet<String>,
    underspecified: bool,
}

impl CaseRule {
    /// Creates a rule without cases.
    pub fn new(id: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: id.into(),
            kind,
            cases: Vec::new(),
            extra_inputs: BTreeSet::new(),
            extra_outputs: BTreeSet::new(),
            parameters: BTreeSet::new(),
            underspecified: false,
        }
    }

    /// Appends a case.
    pub fn with_case(mut self, case: RuleCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Declares an additional input variable (name or template).
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.extra_inputs.insert(name.into());
        self
    }

    /// Declares an additional output variable.
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.extra_outputs.insert(name.into());
        self
    }

    /// Declares a rule-level parameter id.
    pub fn with_parameter(mut self, id: impl Into<String>) -> Self {
        self.parameters.insert(id.into());
        self
    }

    /// Marks the rule's effects as action templates.
    pub fn with_underspecified_effects(mut self, underspecified: bool) -> Self {
        self.underspecified = underspecified;
        self
    }

    /// The cases, in evaluation order.
    pub fn cases(&self) -> &[RuleCase] {
        &self.cases
    }
}

impl Rule for CaseRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn input_variables(&self) -> BTreeSet<String> {
        let mut inputs = self.extra_inputs.clone();
        for case in &self.cases {
            inputs.extend(case.condition.variables().map(str::to_string));
        }
        inputs
    }

    fn output_variables(&self) -> BTreeSet<String> {
        let mut outputs = self.extra_outputs.clone();
        for case in &self.cases {
            for (effect, _) in &case.effects {
                outputs.extend(effect.variables().into_iter().map(str::to_string));
            }
        }
        outputs
    }

    fn kind(&self) -> RuleKind {
        self.kind
    }

    fn has_underspecified_effects(&self) -> bool {
        self.underspecified
    }

    fn parameter_ids(&self) -> BTreeSet<String> {
        let mut ids = self.parameters.clone();
        for case in &self.cases {
            for (_, params) in &case.effects {
                ids.extend(params.iter().cloned());
            }
        }
        ids
    }

    fn evaluate(&self, input: &Assignment) -> Result<RuleOutput, RuleError> {
        let mut output = RuleOutput::new(self.kind);
        if let Some(case) = self.cases.iter().find(|c| c.is_satisfied(input)) {
            for (effect, params) in &case.effects {
                output.add_effect(effect.clone(), params.iter().cloned());
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting_rule() -> CaseRule {
        CaseRule::new("greet", RuleKind::Probability)
            .with_case(
                RuleCase::when(Assignment::new().with("u_u", "hello"))
                    .then(Effect::new().with("a_m", "Greet"), ["theta_greet"]),
            )
            .with_case(RuleCase::otherwise().then(Effect::empty(), Vec::<String>::new()))
    }

    #[test]
    fn test_first_matching_case_wins() {
        let rule = greeting_rule();
        let out = rule
            .evaluate(&Assignment::new().with("u_u", "hello"))
            .unwrap();
        let effects: Vec<&Effect> = out.effects().collect();
        assert_eq!(effects, vec![&Effect::new().with("a_m", "Greet")]);
    }

    #[test]
    fn test_fallback_case() {
        let rule = greeting_rule();
        let out = rule.evaluate(&Assignment::new().with("u_u", "ok")).unwrap();
        assert!(!out.has_concrete_effect());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_no_case_matches() {
        let rule = CaseRule::new("r", RuleKind::Probability).with_case(
            RuleCase::when(Assignment::new().with("x", 1)).then(Effect::new().with("y", 2), ["p"]),
        );
        let out = rule.evaluate(&Assignment::new().with("x", 0)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_declared_variables() {
        let rule = greeting_rule()
            .with_input("a_u*")
            .with_output("a_m_alt")
            .with_parameter("theta_global");

        assert_eq!(
            rule.input_variables(),
            BTreeSet::from(["a_u*".to_string(), "u_u".to_string()])
        );
        assert_eq!(
            rule.output_variables(),
            BTreeSet::from(["a_m".to_string(), "a_m_alt".to_string()])
        );
        assert_eq!(
            rule.parameter_ids(),
            BTreeSet::from(["theta_global".to_string(), "theta_greet".to_string()])
        );
        assert_eq!(rule.cases().len(), 2);
    }
}
