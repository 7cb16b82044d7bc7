//! Rule-grounding engine for probabilistic dialogue rules.
//!
//! Given a probabilistic rule and a snapshot of the dialogue state, the
//! engine computes the concrete consequence of applying the rule in that
//! state:
//!
//! - **Domains** ([`domain`]): values, assignments and value domains with
//!   Cartesian-product linearisation.
//! - **Rules** ([`rules`]): the rule contract, effects and rule outputs.
//! - **State** ([`state`]): read-only state snapshots.
//! - **Anchoring** ([`anchor`]): the grounding engine and batch runner.
//!
//! # Architecture
//!
//! This crate computes structure only. Building the Bayesian network,
//! inference, parameter learning and action selection are left to
//! consumers, which read the anchored result through
//! [`anchor::AnchoredRule`].
//!
//! Diagnostics are emitted through `tracing`; install a subscriber to see
//! them.

pub mod anchor;
pub mod domain;
pub mod error;
pub mod rules;
pub mod state;

pub use error::{GroundingError, Result};
