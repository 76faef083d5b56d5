//! Evaluation context
//!
//! The typed charge and the flattened attribute map the evaluator reads.

mod attributes;
mod charge;
mod field_lookup;

// Re-export public types
pub use attributes::AttributeMap;
pub use charge::{Charge, Device, Payer, PaymentMethod};
