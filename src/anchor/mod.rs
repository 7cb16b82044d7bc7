//! Rule anchoring (grounding) engine.
//!
//! Anchoring evaluates a symbolic rule against a concrete state snapshot
//! and enumerates the structure downstream inference needs: relevant input
//! values, possible output values, distinct effects and parameters.
//!
//! # Key Types
//!
//! - [`AnchoredRule`]: one rule grounded in one snapshot
//! - [`GroundingConfig`]: enumeration cap and batch scheduling options
//! - [`GroundingRunner`]: grounds a batch of rules against the same snapshot
//! - [`GroundingResult`]: batch output with relevance statistics
//!
//! # Algorithm
//!
//! 1. Collect the snapshot nodes matching the rule's declared inputs into
//!    an input [`ValueDomain`](crate::domain::ValueDomain)
//! 2. Enumerate every assignment of its Cartesian product
//! 3. Evaluate the rule on each assignment and union the effects,
//!    parameter ids and output values
//! 4. Add the no-op effect
//! 5. For utility rules with underspecified effects, force relevance and
//!    add a `None` placeholder to every declared output
//!
//! No probabilities are computed here.

mod anchored;
mod config;
mod runner;

pub use anchored::AnchoredRule;
pub use config::GroundingConfig;
pub use runner::{GroundingResult, GroundingRunner};
