//! Concrete variable assignments.

use super::{primed, unprimed, Value};
use std::collections::BTreeMap;
use std::fmt;

/// An immutable mapping from variable names to one concrete value each.
///
/// Assignments are the unit consumed by rule evaluation. They are ordered
/// and hashable, so the full set of candidate assignments produced by
/// [`ValueDomain::linearise`](super::ValueDomain::linearise) can be held in
/// a set.
///
/// # Examples
///
/// ```
/// use u_anchor::domain::{Assignment, Value};
///
/// let a = Assignment::new().with("A", 0).with("B", "x");
/// assert_eq!(a.value("B"), Some(&Value::from("x")));
/// assert_eq!(a.to_string(), "A=0 ^ B=x");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pairs: BTreeMap<String, Value>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this assignment extended with `name = value`.
    ///
    /// An existing binding for `name` is overwritten.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.pairs.insert(name.into(), value.into());
        self
    }

    /// Builds an assignment from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value bound to `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.pairs.get(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.contains_key(name)
    }

    /// Whether every binding of `other` also holds in this assignment.
    pub fn contains_all(&self, other: &Assignment) -> bool {
        other
            .pairs
            .iter()
            .all(|(k, v)| self.pairs.get(k) == Some(v))
    }

    /// Bound variable names, in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// Iterates over the `(name, value)` bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the assignment binds nothing.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Copy with every variable renamed to its next-value form (`X` → `X'`).
    pub fn primed(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|(k, v)| (primed(k), v.clone()))
                .collect(),
        }
    }

    /// Copy with the next-value marker stripped from every variable name.
    pub fn unprimed(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|(k, v)| (unprimed(k).to_string(), v.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ^ ")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overwrites() {
        let a = Assignment::new().with("x", 1).with("x", 2);
        assert_eq!(a.len(), 1);
        assert_eq!(a.value("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Assignment::from_pairs([("a", "1"), ("b", "2")]);
        let b = Assignment::new().with("b", "2").with("a", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains_all() {
        let full = Assignment::new().with("S", "greet").with("T", true);
        assert!(full.contains_all(&Assignment::new().with("S", "greet")));
        assert!(!full.contains_all(&Assignment::new().with("S", "bye")));
        assert!(full.contains_all(&Assignment::new()));
    }

    #[test]
    fn test_primed_and_back() {
        let a = Assignment::new().with("intent", "greeting");
        let p = a.primed();
        assert!(p.contains("intent'"));
        assert_eq!(p.unprimed(), a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Assignment::new().to_string(), "");
        let a: Assignment = [("u", "hi"), ("a", "none")].into_iter().collect();
        assert_eq!(a.to_string(), "a=none ^ u=hi");
    }
}
