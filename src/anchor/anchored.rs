//! Anchoring of one rule in one state snapshot.

use super::config::GroundingConfig;
use crate::domain::{primed, Value, ValueDomain};
use crate::error::{GroundingError, Result};
use crate::rules::{Effect, Rule, RuleKind, RuleOutput, Template};
use crate::state::{Node, StateSnapshot};
use std::collections::BTreeSet;
use std::fmt;

/// A rule grounded in a particular state snapshot.
///
/// Construction evaluates the rule on every assignment of its input
/// domain and records:
///
/// - whether the rule is relevant in the state
/// - the values of the input variables present in the state
/// - every distinct effect the rule can produce (the no-op effect included)
/// - the values each output variable (`X'`) can take
/// - the parameter ids weighting those effects
///
/// The result is immutable. When the state changes, anchor the rule again.
///
/// # Examples
///
/// ```
/// use u_anchor::anchor::AnchoredRule;
/// use u_anchor::domain::Assignment;
/// use u_anchor::rules::{CaseRule, Effect, RuleCase, RuleKind};
/// use u_anchor::state::DialogueState;
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
/// let state = DialogueState::new().with_node("S", ["greet", "bye"]);
///
/// let anchored = AnchoredRule::new(&rule, &state).unwrap();
/// assert!(anchored.is_relevant());
/// assert_eq!(anchored.effects().len(), 3);
/// assert_eq!(anchored.outputs().values("intent'").map(|v| v.len()), Some(2));
/// assert!(anchored.parameter_ids().contains("p1"));
/// ```
pub struct AnchoredRule<'a> {
    rule: &'a dyn Rule,
    id: String,
    relevant: bool,
    inputs: ValueDomain,
    input_nodes: Vec<&'a Node>,
    outputs: ValueDomain,
    effects: BTreeSet<Effect>,
    parameters: BTreeSet<String>,
    parameter_nodes: Vec<&'a Node>,
    assignment_count: usize,
}

impl<'a> AnchoredRule<'a> {
    /// Anchors `rule` in `state` with the default configuration.
    pub fn new(rule: &'a dyn Rule, state: &'a dyn StateSnapshot) -> Result<Self> {
        Self::with_config(rule, state, &GroundingConfig::default())
    }

    /// Anchors `rule` in `state`.
    ///
    /// # Errors
    ///
    /// - [`GroundingError::InvalidConfig`] if `config` does not validate
    /// - [`GroundingError::DomainTooLarge`] if the input domain has more
    ///   assignments than `config.max_assignments`
    /// - [`GroundingError::RuleEvaluation`] if the rule fails on any
    ///   assignment; nothing is returned for partial work
    pub fn with_config(
        rule: &'a dyn Rule,
        state: &'a dyn StateSnapshot,
        config: &GroundingConfig,
    ) -> Result<Self> {
        config.validate()?;
        let id = rule.id().to_string();
        let _span = tracing::debug_span!("anchor", rule = %id).entered();

        let inputs = input_domain(rule, state);
        check_product_size(&id, &inputs, config)?;

        let mut acc = Accumulator::default();
        for input in inputs.assignments() {
            let output = rule
                .evaluate(&input)
                .map_err(|source| GroundingError::RuleEvaluation {
                    rule_id: id.clone(),
                    assignment: input.to_string(),
                    source,
                })?;
            acc.absorb(&output);
        }
        acc.effects.insert(Effect::empty());

        if rule.kind() == RuleKind::Utility && rule.has_underspecified_effects() {
            acc.add_action_placeholders(rule);
        }

        let input_nodes = present_nodes(state, inputs.variables());
        let parameter_nodes = present_nodes(state, acc.parameters.iter().map(String::as_str));

        tracing::debug!(
            assignments = acc.evaluated,
            effects = acc.effects.len(),
            parameters = acc.parameters.len(),
            relevant = acc.relevant,
            "rule anchored"
        );

        Ok(Self {
            rule,
            id,
            relevant: acc.relevant,
            inputs,
            input_nodes,
            outputs: acc.outputs,
            effects: acc.effects,
            parameters: acc.parameters,
            parameter_nodes,
            assignment_count: acc.evaluated,
        })
    }

    /// Whether at least one input assignment produced a non-empty effect,
    /// or the rule is a utility rule with underspecified effects.
    /// An output holding only the no-op effect does not count.
    pub fn is_relevant(&self) -> bool {
        self.relevant
    }

    /// Identifier of the anchored rule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Values of the declared input variables present in the state.
    pub fn inputs(&self) -> &ValueDomain {
        &self.inputs
    }

    /// State nodes backing the input variables.
    pub fn input_nodes(&self) -> &[&'a Node] {
        &self.input_nodes
    }

    /// Names of the output variables (with next-value marker).
    pub fn output_variables(&self) -> BTreeSet<&str> {
        self.outputs.variables().collect()
    }

    /// Possible values of each output variable.
    pub fn outputs(&self) -> &ValueDomain {
        &self.outputs
    }

    /// Every distinct effect the rule can produce, the no-op effect included.
    pub fn effects(&self) -> &BTreeSet<Effect> {
        &self.effects
    }

    /// Parameter ids weighting the rule's effects.
    pub fn parameter_ids(&self) -> &BTreeSet<String> {
        &self.parameters
    }

    /// State nodes backing the parameter ids.
    pub fn parameter_nodes(&self) -> &[&'a Node] {
        &self.parameter_nodes
    }

    /// The underlying rule.
    pub fn rule(&self) -> &'a dyn Rule {
        self.rule
    }

    /// Number of input assignments the rule was evaluated on.
    pub fn assignment_count(&self) -> usize {
        self.assignment_count
    }
}

impl fmt::Debug for AnchoredRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchoredRule")
            .field("id", &self.id)
            .field("relevant", &self.relevant)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("effects", &self.effects)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AnchoredRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.id, self.inputs, self.outputs)
    }
}

/// Running aggregates over the rule outputs of all input assignments.
///
/// Every merge is a set union, so the order of assignments does not matter.
#[derive(Default)]
struct Accumulator {
    relevant: bool,
    evaluated: usize,
    outputs: ValueDomain,
    effects: BTreeSet<Effect>,
    parameters: BTreeSet<String>,
}

impl Accumulator {
    fn absorb(&mut self, output: &RuleOutput) {
        self.evaluated += 1;
        if output.has_concrete_effect() {
            self.relevant = true;
        }
        for (effect, params) in output.iter() {
            self.parameters.extend(params.iter().cloned());
            for e in effect.sub_effects() {
                self.outputs.add_value(e.output_variable(), e.value.clone());
            }
            self.effects.insert(effect.clone());
        }
    }

    /// Utility rules whose effects are action templates stay relevant and
    /// expose a `None` placeholder for every declared output.
    fn add_action_placeholders(&mut self, rule: &dyn Rule) {
        self.relevant = true;
        self.parameters.extend(rule.parameter_ids());
        let outputs = rule.output_variables();
        if outputs.is_empty() {
            tracing::warn!(
                rule = rule.id(),
                "utility rule with underspecified effects declares no output variables"
            );
        }
        for variable in outputs {
            self.outputs.add_value(primed(&variable), Value::None);
        }
    }
}

fn input_domain(rule: &dyn Rule, state: &dyn StateSnapshot) -> ValueDomain {
    let declared = rule.input_variables();
    let mut inputs = ValueDomain::new();
    for node in state.matching_nodes(&declared) {
        inputs.add_values(node.id.clone(), node.values.iter().cloned());
    }
    for name in &declared {
        if !Template::has_wildcards(name) && !inputs.contains(name) {
            tracing::trace!(variable = %name, "input variable absent from state, omitted");
        }
    }
    inputs
}

fn check_product_size(id: &str, inputs: &ValueDomain, config: &GroundingConfig) -> Result<()> {
    let Some(limit) = config.max_assignments else {
        return Ok(());
    };
    let size = inputs.product_size().unwrap_or(usize::MAX);
    if size > limit {
        return Err(GroundingError::DomainTooLarge {
            rule_id: id.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

fn present_nodes<'s, 'n>(
    state: &'s dyn StateSnapshot,
    names: impl Iterator<Item = &'n str>,
) -> Vec<&'s Node> {
    names.filter_map(|name| state.node(name)).collect()
}

// ============================================================================
// Tests
// ============================================================================
