//! # warpexpr
//!
//! `warpexpr` parses single-variable expressions over **complex numbers** once
//! and evaluates them as many times as needed, for example once per pixel of
//! an image being distorted.
//!
//! ## Overview
//! - Real and imaginary literals (`2`, `3.5i`, `2*i`), the free variable `x`,
//!   the operators `+ - * / ^` and parentheses.
//! - Built-in functions (`sin`, `cos`, `tan`, `sinh`, `cosh`, `exp`, `ln`,
//!   `sqrt`, `pow`), matched case-insensitively.
//! - Implicit multiplication (`2x`, `(x+1)(x-1)`, `3sin(x)`) and unary minus.
//! - Function calls whose arguments do not mention `x` are computed once at
//!   parse time and reused by every evaluation.
//!
//! Internally, expressions are first tokenized into lexemes (function calls
//! are resolved there), then converted to Reverse Polish Notation (RPN) with
//! the Shunting-Yard algorithm, and finally folded into a binary tree stored
//! in breadth-first order for iterative evaluation.
//!
//! ## Example
//! ```rust
//! use num_complex::Complex;
//!
//! let tree = warpexpr::parse("sin(x) + 2i").expect("Failed to parse formula");
//! let result = tree.evaluate(Complex::new(1.0, 2.0));
//! println!("Result = {}", result);
//! ```
//!
//! ## Example: Limiting nesting
//! ```rust
//! use warpexpr::{Builder, ParseError};
//!
//! let err = Builder::new("sin(sin(sin(x)))").max_depth(2).build().unwrap_err();
//! assert!(matches!(err, ParseError::NestingTooDeep { .. }));
//! ```
//!
//! ## Example: Remapping pixels
//! ```rust
//! let tree = warpexpr::parse("x / 2").unwrap();
//! let destinations = warpexpr::remap::remap_indices(&tree, 64, 48);
//! assert_eq!(destinations.len(), 64 * 48);
//! ```
//!
//! ## Logging
//! Parse results are reported through the [`log`] facade: `debug` for each
//! parse, `trace` for the token and RPN streams. No logger is installed by
//! the library.

mod lexer;
mod rpn;
pub mod astnode;
pub mod builder;
pub mod complex;
pub mod error;
pub mod expression;
pub mod functions;
pub mod operators;
pub mod remap;
pub mod token;

pub use builder::Builder;
pub use complex::ComplexNumber;
pub use error::{ParseError, Position};
pub use expression::ExpressionTree;

/// Parses an expression with the default configuration.
///
/// Equivalent to `Builder::new(expression).build()`.
///
/// # Example
/// ```rust
/// use num_complex::Complex;
///
/// let tree = warpexpr::parse("2 + 3 * 4").unwrap();
/// assert_eq!(tree.evaluate(Complex::new(0.0, 0.0)), Complex::new(14.0, 0.0));
/// ```
///
/// # Errors
/// See [`ParseError`] for every way parsing can fail.
pub fn parse(expression: &str) -> Result<ExpressionTree, ParseError> {
    Builder::new(expression).build()
}
