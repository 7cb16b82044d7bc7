//! State snapshot contract.

use crate::domain::Value;
use std::collections::BTreeSet;

/// A state variable together with the values it may currently take.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Variable name.
    pub id: String,
    /// Possible values.
    pub values: BTreeSet<Value>,
}

impl Node {
    /// Creates a node with the given possible values.
    pub fn new<I, V>(id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            id: id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only, point-in-time view of the dialogue state.
///
/// The grounding engine only borrows the snapshot. Anything that changes
/// the state must produce a new snapshot rather than mutate one that is
/// being grounded against.
///
/// `StateSnapshot` is `Sync` so that many rules can be grounded against
/// the same snapshot concurrently.
pub trait StateSnapshot: Sync {
    /// Nodes whose id matches any of `names`.
    ///
    /// Entries of `names` may be templates (see
    /// [`Template`](crate::rules::Template)). Each node appears once.
    fn matching_nodes(&self, names: &BTreeSet<String>) -> Vec<&Node>;

    /// Whether a node named `name` exists.
    fn has_node(&self, name: &str) -> bool {
        self.node(name).is_some()
    }

    /// The node named `name`, if any.
    fn node(&self, name: &str) -> Option<&Node>;
}
