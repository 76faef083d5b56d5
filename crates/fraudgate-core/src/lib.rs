//! fraudgate core - shared types for the fraudgate decision engine
//!
//! This crate provides the vocabulary every other crate speaks:
//! - Value types for charge attributes
//! - The rule expression AST and its canonical text rendering
//! - Decisions, consoles and their components
//! - Rule scopes, list entries and compiled rules
//! - Error types

pub mod ast;
pub mod decision;
pub mod error;
pub mod list;
pub mod rule;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use ast::{Clause, Condition, Expression, FormulaArg, Literal, MathOp, Operand, Operator};
pub use decision::{ComponentName, Console, ConsoleComponent, Decision};
pub use error::CoreError;
pub use list::{ListEntry, ListType, SearchKeys, SEARCHABLE_FIELDS};
pub use rule::{CompiledRule, RuleClause, RuleRequest};
pub use scope::{ChargeScope, FamilyMembership, Scope, ScopeFilter};
pub use types::Value;
