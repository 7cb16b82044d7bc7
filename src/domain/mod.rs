//! Values, assignments and value domains.
//!
//! # Key Components
//!
//! - [`Value`]: a concrete, ordered value held by a state variable
//! - [`Assignment`]: an immutable mapping from variable names to one value each
//! - [`ValueDomain`]: per-variable value sets with union-merge and
//!   Cartesian-product linearisation
//!
//! # Next-value naming
//!
//! Output variables are named after the variable they update, followed by
//! [`NEXT_VALUE_MARKER`]. The downstream network builder relies on this
//! exact form, so always go through [`primed`] and [`unprimed`].

mod assignment;
mod range;
mod value;

pub use assignment::Assignment;
pub use range::{Assignments, ValueDomain};
pub use value::Value;

/// Suffix marking the next-value (output) copy of a variable.
pub const NEXT_VALUE_MARKER: char = '\'';

/// Returns the next-value name of `variable` (`X` → `X'`).
///
/// ```
/// assert_eq!(u_anchor::domain::primed("intent"), "intent'");
/// ```
pub fn primed(variable: &str) -> String {
    let mut name = String::with_capacity(variable.len() + 1);
    name.push_str(variable);
    name.push(NEXT_VALUE_MARKER);
    name
}

/// Strips one trailing next-value marker, if present.
pub fn unprimed(variable: &str) -> &str {
    variable
        .strip_suffix(NEXT_VALUE_MARKER)
        .unwrap_or(variable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primed_appends_single_marker() {
        assert_eq!(primed("a_m"), "a_m'");
        assert_eq!(primed("a_m'"), "a_m''");
    }

    #[test]
    fn test_unprimed() {
        assert_eq!(unprimed("a_m'"), "a_m");
        assert_eq!(unprimed("a_m"), "a_m");
        assert_eq!(unprimed("a_m''"), "a_m'");
    }
}
