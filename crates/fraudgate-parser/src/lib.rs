//! fraudgate parser - rule expression text to AST
//!
//! This crate turns the canonical expression text stored on compiled rules
//! (`payment_method.country in ["MX","US"] and not amount gt 100`) into the
//! [`fraudgate_core::Expression`] AST consumed by the evaluator.

pub mod error;
pub mod expression_parser;
pub mod lexer;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use lexer::{Lexer, Token, TokenKind};
