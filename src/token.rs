//! # token.rs
//!
//! Lexical units produced by the lexer, and the operand subset of them that
//! can sit in a leaf of the expression tree.

use crate::complex::ComplexNumber;
use crate::functions::Function;
use crate::operators::OperatorKind;

/// Token enum representing the lexical units of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Real and/or imaginary literal.
    Number(ComplexNumber),

    /// The single free variable `x`.
    Variable,

    /// One of `+ - * / ^`.
    Operator(OperatorKind),

    /// Function call with its arguments already reduced to operands.
    Function(Function),

    /// `(` when `open`, `)` otherwise.
    Parenthesis { open: bool },
}

impl Token {
    /// Whether the token can end an operand, i.e. stand on the left side of
    /// an implicit multiplication.
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(self,
            Token::Number(_) | Token::Variable | Token::Function(_)
            | Token::Parenthesis { open: false }
        )
    }

    /// Whether the token can start an operand that juxtaposition multiplies,
    /// i.e. stand on the right side of an implicit multiplication.
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(self,
            Token::Variable | Token::Function(_) | Token::Parenthesis { open: true }
        )
    }

    /// Converts the token into an operand, or `None` for operators and
    /// parentheses.
    pub fn into_operand(self) -> Option<Operand> {
        match self {
            Token::Number(value) => Some(Operand::Number(value)),
            Token::Variable => Some(Operand::Variable),
            Token::Function(func) => Some(Operand::Function(func)),
            Token::Operator(_) | Token::Parenthesis { .. } => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Variable => f.write_str("x"),
            Token::Operator(kind) => write!(f, "{kind}"),
            Token::Function(func) => write!(f, "{func}"),
            Token::Parenthesis { open: true } => f.write_str("("),
            Token::Parenthesis { open: false } => f.write_str(")"),
        }
    }
}

/// A value-producing token: what a tree leaf or a function argument holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(ComplexNumber),
    Variable,
    Function(Function),
}

impl Operand {
    /// Evaluates the operand with `x` bound to the free variable.
    pub fn evaluate(&self, x: ComplexNumber) -> ComplexNumber {
        match self {
            Operand::Number(value) => *value,
            Operand::Variable => x,
            Operand::Function(func) => func.evaluate(x),
        }
    }

    /// Whether the free variable occurs anywhere below this operand.
    pub fn contains_variable(&self) -> bool {
        match self {
            Operand::Number(_) => false,
            Operand::Variable => true,
            Operand::Function(func) => func.is_changing(),
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Number(value) => write!(f, "{value}"),
            Operand::Variable => f.write_str("x"),
            Operand::Function(func) => write!(f, "{func}"),
        }
    }
}
