//! # builder.rs
//!
//! This module provides the configurable entry point that turns an expression
//! string into an [`ExpressionTree`].

use crate::astnode;
use crate::error::ParseError;
use crate::expression::ExpressionTree;
use crate::lexer::{Lexemes, Lexer};
use crate::operators::OperatorTable;
use crate::rpn;

use log::{debug, log_enabled, trace, Level};

/// Default bound on nested parentheses and nested function calls.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Builder
{
    formula: String,
    max_depth: usize,
}

impl Builder
{
    /// Creates a new `Builder` for the given formula.
    ///
    /// # Examples
    /// ```rust
    /// use warpexpr::Builder;
    /// use num_complex::Complex;
    ///
    /// let tree = Builder::new("x + 1").build()
    ///     .expect("Failed to parse 'x + 1'");
    /// println!("{} + 1 = {}", 3, tree.evaluate(Complex::new(3.0, 0.0)));
    /// ```
    pub fn new(formula: &str) -> Self
    {
        Self {
            formula: formula.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deep parentheses and function calls may nest.
    ///
    /// Each level of `(` counts once, and so does each level of function call
    /// inside another call's arguments. Exceeding the limit fails with
    /// [`ParseError::NestingTooDeep`].
    ///
    /// # Examples
    /// ```rust
    /// use warpexpr::{Builder, ParseError};
    ///
    /// let err = Builder::new("((x))").max_depth(1).build().unwrap_err();
    /// assert!(matches!(err, ParseError::NestingTooDeep { limit: 1, .. }));
    /// ```
    pub fn max_depth(mut self, max_depth: usize) -> Self
    {
        self.max_depth = max_depth;
        self
    }

    /// Parses the formula into an [`ExpressionTree`].
    ///
    /// Runs the whole pipeline: lexing (with function calls resolved and
    /// constant-folded), Shunting-yard conversion to RPN, and tree building.
    ///
    /// # Errors
    /// The first [`ParseError`] any stage reports; nothing is partially built.
    pub fn build(&self) -> Result<ExpressionTree, ParseError>
    {
        match self.run() {
            Ok(tree) => {
                debug!("parsed {:?}: {} nodes, constant: {}", self.formula, tree.len(), tree.is_constant());
                Ok(tree)
            },
            Err(err) => {
                debug!("failed to parse {:?}: {}", self.formula, err);
                Err(err)
            },
        }
    }

    fn run(&self) -> Result<ExpressionTree, ParseError>
    {
        let table = &OperatorTable::STANDARD;

        let lexemes = Lexer::new(table, self.max_depth).tokenize(&self.formula)?;
        trace_lexemes("tokens", &lexemes);

        let rpn = rpn::make_rpn(lexemes, table, self.max_depth)?;
        trace_lexemes("rpn", &rpn);

        let (arena, root) = astnode::from_rpn(rpn)?;
        Ok(ExpressionTree::new(astnode::breadth_first(arena, root)))
    }
}

fn trace_lexemes(stage: &str, lexemes: &Lexemes)
{
    if log_enabled!(Level::Trace) {
        let rendered: Vec<String> = lexemes.iter().map(ToString::to_string).collect();
        trace!("{stage}: {}", rendered.join(" "));
    }
}
