//! Effects produced by rules.

use crate::domain::{primed, Assignment, Value};
use std::collections::BTreeSet;
use std::fmt;

/// A single update: variable `variable` takes value `value`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicEffect {
    /// Updated variable (without next-value marker).
    pub variable: String,
    /// New value.
    pub value: Value,
}

impl BasicEffect {
    /// Creates a basic effect.
    pub fn new(variable: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
        }
    }

    /// Name of the output variable this effect writes to (`variable'`).
    pub fn output_variable(&self) -> String {
        primed(&self.variable)
    }
}

impl fmt::Display for BasicEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:={}", self.variable, self.value)
    }
}

/// A conjunction of [`BasicEffect`]s that happen together.
///
/// Equality and hashing are structural: two effects made of the same
/// basic effects are the same effect, whatever order they were added in.
/// The empty effect is the no-op outcome.
///
/// # Examples
///
/// ```
/// use u_anchor::rules::{BasicEffect, Effect};
///
/// let a = Effect::from_basic([BasicEffect::new("x", 1), BasicEffect::new("y", 2)]);
/// let b = Effect::new().with("y", 2).with("x", 1);
/// assert_eq!(a, b);
/// assert!(Effect::empty().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    sub_effects: BTreeSet<BasicEffect>,
}

impl Effect {
    /// Creates the empty (no-op) effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`new`](Self::new), reads better at call sites that mean "no change".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an effect from basic effects.
    pub fn from_basic(effects: impl IntoIterator<Item = BasicEffect>) -> Self {
        Self {
            sub_effects: effects.into_iter().collect(),
        }
    }

    /// Returns this effect extended with `variable := value`.
    pub fn with(mut self, variable: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sub_effects.insert(BasicEffect::new(variable, value));
        self
    }

    /// The basic effects, in order.
    pub fn sub_effects(&self) -> impl Iterator<Item = &BasicEffect> {
        self.sub_effects.iter()
    }

    /// Variables updated by this effect (without next-value marker).
    pub fn variables(&self) -> BTreeSet<&str> {
        self.sub_effects
            .iter()
            .map(|e| e.variable.as_str())
            .collect()
    }

    /// Output variables written by this effect (`variable'`).
    pub fn output_variables(&self) -> BTreeSet<String> {
        self.sub_effects
            .iter()
            .map(BasicEffect::output_variable)
            .collect()
    }

    /// The effect as an assignment over its output variables.
    ///
    /// When several basic effects update the same variable, the greatest
    /// value wins.
    pub fn to_output_assignment(&self) -> Assignment {
        self.sub_effects
            .iter()
            .map(|e| (e.output_variable(), e.value.clone()))
            .collect()
    }

    /// Number of basic effects.
    pub fn len(&self) -> usize {
        self.sub_effects.len()
    }

    /// Whether this is the no-op effect.
    pub fn is_empty(&self) -> bool {
        self.sub_effects.is_empty()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sub_effects.is_empty() {
            return f.write_str("Void");
        }
        for (i, e) in self.sub_effects.iter().enumerate() {
            if i > 0 {
                f.write_str(" ^ ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl FromIterator<BasicEffect> for Effect {
    fn from_iter<I: IntoIterator<Item = BasicEffect>>(iter: I) -> Self {
        Self::from_basic(iter)
    }
}
