//! Expression parser
//!
//! Parses rule expression text into the [`Expression`] AST.
//!
//! Supported syntax:
//! - Clauses: `[not] operand operator value`, chained left to right by `and` / `or`
//! - Operands: dotted field paths (`aggregation.payer.charge.h1.sum`) or
//!   formula calls (`DIV (a.count,b.count)`, `SUBTRACT(4,6)`)
//! - Operators: `eq ne lt le gt ge co ew in` and `== != < <= > >=`
//! - Values: numbers, quoted strings, `true` / `false`, bracketed lists for `in`
//!
//! Keywords are case-insensitive; field paths are kept verbatim.

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use fraudgate_core::ast::{Clause, Condition, Expression, FormulaArg, Literal, MathOp, Operand, Operator};

/// Expression parser
pub struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let mut parser = ExpressionParser {
            tokens: Lexer::tokenize(input)?,
            pos: 0,
        };
        parser.parse_expression()
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let mut clauses = Vec::new();
        loop {
            let mut clause = self.parse_clause()?;

            if self.peek().is_none() {
                clauses.push(clause);
                break;
            }

            clause.condition = Some(self.parse_condition()?);
            clauses.push(clause);

            if self.peek().is_none() {
                return Err(ParseError::UnexpectedEnd {
                    expected: "clause after condition",
                });
            }
        }
        Ok(Expression::new(clauses))
    }

    fn parse_clause(&mut self) -> Result<Clause> {
        let negated = matches!(
            self.peek(),
            Some(TokenKind::Ident(word)) if word.eq_ignore_ascii_case("not")
        );
        if negated {
            self.advance();
        }

        let operand = self.parse_operand()?;
        let operator = self.parse_operator()?;
        let value = self.parse_value(operator)?;

        Ok(Clause {
            negated,
            operand,
            operator,
            value,
            condition: None,
        })
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let token = self.next_or_end("field or formula")?;
        let name = match token.kind {
            TokenKind::Ident(name) => name,
            other => return Err(unexpected(other, token.position, "field or formula")),
        };

        if !matches!(self.peek(), Some(TokenKind::LParen)) {
            return Ok(Operand::Field(name));
        }

        let op: MathOp = name.parse().map_err(|_| ParseError::UnexpectedToken {
            found: name.clone(),
            expected: "math operation (SUM, SUBTRACT, MLP, DIV)",
            position: token.position,
        })?;
        self.advance();

        let args = self.parse_formula_args()?;
        if args.len() < 2 {
            return Err(ParseError::InvalidFormula(format!(
                "{} requires at least 2 operands, got {}",
                op,
                args.len()
            )));
        }
        if let Some(arity) = op.required_arity() {
            if args.len() != arity {
                return Err(ParseError::InvalidFormula(format!(
                    "{} requires exactly {} operands, got {}",
                    op,
                    arity,
                    args.len()
                )));
            }
        }

        Ok(Operand::Formula { op, args })
    }

    /// Arguments after the opening parenthesis, through the closing one
    fn parse_formula_args(&mut self) -> Result<Vec<FormulaArg>> {
        let mut args = Vec::new();
        loop {
            let token = self.next_or_end("formula operand")?;
            match token.kind {
                TokenKind::Ident(field) => args.push(FormulaArg::Field(field)),
                TokenKind::Number(n) => args.push(FormulaArg::Constant(n)),
                TokenKind::RParen if args.is_empty() => return Ok(args),
                other => return Err(unexpected(other, token.position, "formula operand")),
            }

            let token = self.next_or_end("',' or ')'")?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok(args),
                other => return Err(unexpected(other, token.position, "',' or ')'")),
            }
        }
    }

    fn parse_operator(&mut self) -> Result<Operator> {
        let token = self.next_or_end("operator")?;
        let text = match &token.kind {
            TokenKind::Ident(word) => word.as_str(),
            TokenKind::Symbol(symbol) => *symbol,
            _ => "",
        };
        text.parse()
            .map_err(|_| unexpected(token.kind, token.position, "operator"))
    }

    fn parse_value(&mut self, operator: Operator) -> Result<Literal> {
        if operator == Operator::In {
            return self.parse_list();
        }
        let token = self.next_or_end("value")?;
        match token.kind {
            TokenKind::LBracket => Err(unexpected(
                TokenKind::LBracket,
                token.position,
                "scalar value (lists are only allowed with 'in')",
            )),
            kind => scalar_literal(kind, token.position),
        }
    }

    fn parse_list(&mut self) -> Result<Literal> {
        let token = self.next_or_end("list")?;
        if token.kind != TokenKind::LBracket {
            return Err(unexpected(token.kind, token.position, "'[' after 'in'"));
        }

        let mut items = Vec::new();
        loop {
            let token = self.next_or_end("list item")?;
            items.push(scalar_literal(token.kind, token.position)?);

            let token = self.next_or_end("',' or ']'")?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RBracket => return Ok(Literal::List(items)),
                other => return Err(unexpected(other, token.position, "',' or ']'")),
            }
        }
    }

    fn parse_condition(&mut self) -> Result<Condition> {
        let token = self.next_or_end("condition")?;
        let text = match &token.kind {
            TokenKind::Ident(word) => word.as_str(),
            TokenKind::Symbol(symbol) => *symbol,
            _ => "",
        };
        text.parse()
            .map_err(|_| unexpected(token.kind, token.position, "'and' or 'or'"))
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next_or_end(&mut self, expected: &'static str) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }
}

fn scalar_literal(kind: TokenKind, position: usize) -> Result<Literal> {
    match kind {
        TokenKind::Number(n) => Ok(Literal::Number(n)),
        TokenKind::Str(s) => Ok(Literal::String(s)),
        TokenKind::Ident(word) if word.eq_ignore_ascii_case("true") => Ok(Literal::Bool(true)),
        TokenKind::Ident(word) if word.eq_ignore_ascii_case("false") => Ok(Literal::Bool(false)),
        other => Err(unexpected(other, position, "number, quoted string or boolean")),
    }
}

fn unexpected(kind: TokenKind, position: usize, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        found: kind.to_string(),
        expected,
        position,
    }
}
