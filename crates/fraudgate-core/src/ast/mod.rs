//! Abstract Syntax Tree for rule expressions

pub mod expression;
pub mod operator;

pub use expression::{Clause, Expression, FormulaArg, Literal, Operand};
pub use operator::{Condition, MathOp, Operator};
