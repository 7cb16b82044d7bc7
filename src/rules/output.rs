//! Output of a rule for one input assignment.

use super::{Effect, RuleKind};
use std::collections::{BTreeMap, BTreeSet};

/// The effects a rule can produce for one assignment, with the parameter
/// identifiers that weight each effect.
///
/// Adding the same effect twice merges its parameter ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutput {
    kind: RuleKind,
    effects: BTreeMap<Effect, BTreeSet<String>>,
}

impl RuleOutput {
    /// Creates an output with no effects.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            effects: BTreeMap::new(),
        }
    }

    /// Adds an effect weighted by the given parameter ids.
    pub fn add_effect<I, S>(&mut self, effect: Effect, parameters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effects
            .entry(effect)
            .or_default()
            .extend(parameters.into_iter().map(Into::into));
    }

    /// Builder form of [`add_effect`](Self::add_effect).
    pub fn with_effect<I, S>(mut self, effect: Effect, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_effect(effect, parameters);
        self
    }

    /// Kind of the rule that produced this output.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The effects, in order.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.keys()
    }

    /// Parameter ids attached to `effect`; empty if the effect is unknown.
    pub fn parameters_for(&self, effect: &Effect) -> impl Iterator<Item = &str> {
        self.effects
            .get(effect)
            .into_iter()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    /// Iterates over `(effect, parameter ids)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Effect, &BTreeSet<String>)> {
        self.effects.iter()
    }

    /// Whether at least one effect changes something.
    pub fn has_concrete_effect(&self) -> bool {
        self.effects.keys().any(|e| !e.is_empty())
    }

    /// Number of distinct effects, the no-op effect included.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether no effect was added.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
