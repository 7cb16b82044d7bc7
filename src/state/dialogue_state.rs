//! In-memory dialogue state snapshot.

use super::{Node, StateSnapshot};
use crate::domain::Value;
use crate::rules::Template;
use std::collections::{BTreeMap, BTreeSet};

/// A dialogue state held in memory, keyed by variable name.
///
/// Grounding borrows the state immutably, so the borrow checker already
/// rules out mutation while a batch is running.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_anchor::state::{DialogueState, StateSnapshot};
///
/// let state = DialogueState::new()
///     .with_node("a_u1", ["Confirm", "Reject"])
///     .with_node("a_u2", ["Confirm"])
///     .with_node("u_m", ["ok"]);
///
/// let names: BTreeSet<String> = ["a_u*".to_string()].into();
/// assert_eq!(state.matching_nodes(&names).len(), 2);
/// assert!(state.has_node("u_m"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueState {
    nodes: BTreeMap<String, Node>,
}

impl DialogueState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a node.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Builder form of [`add_node`](Self::add_node).
    pub fn with_node<I, V>(mut self, id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add_node(Node::new(id, values));
        self
    }

    /// Node ids, in order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the state holds no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl StateSnapshot for DialogueState {
    fn matching_nodes(&self, names: &BTreeSet<String>) -> Vec<&Node> {
        let mut matched: BTreeSet<&str> = BTreeSet::new();
        for name in names {
            let template = if Template::has_wildcards(name) {
                match Template::new(name.as_str()) {
                    Ok(template) => Some(template),
                    Err(e) => {
                        tracing::warn!(template = %name, error = %e, "unusable variable template, matching literally");
                        None
                    }
                }
            } else {
                None
            };
            match template {
                Some(template) => matched.extend(
                    self.nodes
                        .keys()
                        .map(String::as_str)
                        .filter(|id| template.matches(id)),
                ),
                None => {
                    if let Some((id, _)) = self.nodes.get_key_value(name.as_str()) {
                        matched.insert(id.as_str());
                    }
                }
            }
        }
        matched
            .into_iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }
}

impl FromIterator<Node> for DialogueState {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut state = Self::new();
        for node in iter {
            state.add_node(node);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn state() -> DialogueState {
        DialogueState::new()
            .with_node("u_u", ["hello", "bye"])
            .with_node("a_u1", ["Confirm"])
            .with_node("a_u2", ["Reject"])
    }

    #[test]
    fn test_literal_lookup() {
        let s = state();
        let nodes = s.matching_nodes(&names(&["u_u", "missing"]));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "u_u");
        assert!(!s.has_node("missing"));
    }

    #[test]
    fn test_template_lookup_dedups() {
        let s = state();
        let nodes = s.matching_nodes(&names(&["a_u*", "a_u1", "a_{n}"]));
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a_u1", "a_u2"]);
    }

    #[test]
    fn test_bad_template_matches_nothing() {
        let s = state();
        assert!(s.matching_nodes(&names(&["a_{u"])).is_empty());
    }

    #[test]
    fn test_bad_template_falls_back_to_literal_name() {
        let s = state().with_node("a{b", ["x"]);
        assert!(s.has_node("a{b"));
        let nodes = s.matching_nodes(&names(&["a{b"]));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "a{b");
    }

    #[test]
    fn test_replace_node() {
        let mut s = state();
        s.add_node(Node::new("u_u", ["hi"]));
        assert_eq!(s.len(), 3);
        assert_eq!(s.node("u_u").map(|n| n.values.len()), Some(1));
    }

    #[test]
    fn test_from_nodes() {
        let s: DialogueState = vec![Node::new("x", [1, 2]), Node::new("y", [true])]
            .into_iter()
            .collect();
        assert_eq!(s.node_ids().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(!s.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let s = state();
        let json = serde_json::to_string(&s).unwrap();
        let back: DialogueState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
