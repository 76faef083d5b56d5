//! Component evaluation
//!
//! The synchronous part of decision resolution: evaluating a component's
//! candidates and resolving its decision. Fetching candidates and walking the
//! console is left to the caller.

mod candidate;
mod component;

pub use candidate::Candidate;
pub use component::{evaluate_component, resolve_decision};
