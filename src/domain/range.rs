//! Value domains and their linearisation into assignments.

use super::{Assignment, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Mapping from variable names to the set of values each may take.
///
/// Merging never replaces: adding values to an existing variable unions
/// them into its set. [`linearise`](Self::linearise) expands the domain
/// into the Cartesian product of all variables that hold at least one
/// value.
///
/// # Examples
///
/// ```
/// use u_anchor::domain::ValueDomain;
///
/// let mut domain = ValueDomain::new();
/// domain.add_values("A", [0, 1]);
/// domain.add_values("B", ["x", "y"]);
///
/// assert_eq!(domain.product_size(), Some(4));
/// assert_eq!(domain.linearise().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueDomain {
    ranges: BTreeMap<String, BTreeSet<Value>>,
}

impl ValueDomain {
    /// Creates an empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions `values` into the set of `name`, creating the entry if absent.
    ///
    /// The variable is registered even when `values` is empty.
    pub fn add_values<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.ranges
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Adds a single value to the set of `name`.
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.ranges
            .entry(name.into())
            .or_default()
            .insert(value.into());
    }

    /// Unions every variable of `other` into this domain.
    pub fn add_domain(&mut self, other: &ValueDomain) {
        for (name, values) in &other.ranges {
            self.add_values(name.clone(), values.iter().cloned());
        }
    }

    /// Values of `name`, if the variable is present.
    pub fn values(&self, name: &str) -> Option<&BTreeSet<Value>> {
        self.ranges.get(name)
    }

    /// Whether `name` is present (possibly with an empty set).
    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    /// Variable names, in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    /// Iterates over `(name, values)` entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Value>)> {
        self.ranges.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the domain has no variables.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of assignments [`linearise`](Self::linearise) would produce.
    ///
    /// Variables with empty value sets do not contribute. Returns `None`
    /// if the product overflows `usize`.
    pub fn product_size(&self) -> Option<usize> {
        self.ranges
            .values()
            .filter(|values| !values.is_empty())
            .try_fold(1usize, |acc, values| acc.checked_mul(values.len()))
    }

    /// Expands the domain into every assignment of its Cartesian product.
    ///
    /// Variables with empty value sets are excluded. A domain without any
    /// non-empty variable yields a single empty assignment, so that rules
    /// with no inputs are still evaluated exactly once.
    pub fn linearise(&self) -> BTreeSet<Assignment> {
        self.assignments().collect()
    }

    /// Lazily enumerates the same assignments as [`linearise`](Self::linearise).
    pub fn assignments(&self) -> Assignments<'_> {
        Assignments::new(self)
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, values)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}=[")?;
            for (j, v) in values.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

/// Iterator over the Cartesian product of a [`ValueDomain`].
///
/// Works as an odometer over the ordered `(name, values)` columns: the
/// last column advances fastest and carries into the previous ones.
/// Memory use is independent of the number of assignments produced.
pub struct Assignments<'a> {
    columns: Vec<(&'a str, Vec<&'a Value>)>,
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> Assignments<'a> {
    fn new(domain: &'a ValueDomain) -> Self {
        let columns: Vec<(&str, Vec<&Value>)> = domain
            .ranges
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| (name.as_str(), values.iter().collect()))
            .collect();
        let cursor = vec![0; columns.len()];
        Self {
            columns,
            cursor,
            done: false,
        }
    }

    fn current(&self) -> Assignment {
        self.columns
            .iter()
            .zip(&self.cursor)
            .map(|((name, values), &i)| (*name, values[i].clone()))
            .collect()
    }

    /// Moves the cursor to the next combination. Returns false on wrap-around.
    fn advance(&mut self) -> bool {
        for col in (0..self.columns.len()).rev() {
            self.cursor[col] += 1;
            if self.cursor[col] < self.columns[col].1.len() {
                return true;
            }
            self.cursor[col] = 0;
        }
        false
    }
}

impl Iterator for Assignments<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.done {
            return None;
        }
        let item = self.current();
        self.done = !self.advance();
        Some(item)
    }
}
