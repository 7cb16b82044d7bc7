//! Rules, effects and rule outputs.
//!
//! The grounding engine consumes rules through the [`Rule`] trait only.
//! Rule definitions (and the language they are written in) live outside
//! this crate; [`CaseRule`] is a small table-driven implementation for
//! programmatic use and testing.
//!
//! # Key Components
//!
//! - [`Rule`]: contract between the engine and rule definitions
//! - [`Effect`] / [`BasicEffect`]: conjunctive variable updates, compared structurally
//! - [`RuleOutput`]: effects and parameter ids produced for one assignment
//! - [`Template`]: declared variable names with `*` and `{slot}` wildcards

mod case_rule;
mod effect;
mod output;
mod template;
mod types;

pub use case_rule::{CaseRule, RuleCase};
pub use effect::{BasicEffect, Effect};
pub use output::RuleOutput;
pub use template::Template;
pub use types::{Rule, RuleKind};
