//! Runtime type system

pub mod value;

pub use value::{format_number, Value};
