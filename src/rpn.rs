//! rpn.rs
//!
//! Converts an infix lexeme sequence into Reverse Polish Notation (RPN)
//! using the Shunting-yard algorithm. Function calls arrive from the lexer
//! already resolved into single tokens, so only operators and parentheses
//! go through the operator stack.

use crate::error::{ParseError, Position};
use crate::lexer::{Lexeme, Lexemes};
use crate::operators::{OperatorKind, OperatorTable};
use crate::token::Token;

use std::ops::Range;

/// Handles the case when a right parenthesis `)` is encountered.
///
/// Pops lexemes from the stack into the RPN output until a left parenthesis
/// `(` is found; the `(` itself is discarded.
///
/// # Errors
///
/// Returns `UnbalancedParentheses` if the stack empties before a `(` is found.
fn make_rpn_case_of_rparen(position: Position, rpn: &mut Lexemes, stack: &mut Lexemes) -> Result<(), ParseError> {
    loop {
        match stack.pop() {
            Some(lexeme) if matches!(lexeme.token(), Token::Parenthesis { open: true }) => return Ok(()),
            Some(lexeme) => rpn.push(lexeme),
            None => return Err(ParseError::UnbalancedParentheses { position }),
        }
    }
}

/// Handles the case when an operator is encountered.
///
/// Pops operators from the stack into the RPN output while the table says
/// the stacked operator binds first, then pushes the incoming one.
fn make_rpn_case_of_operator(
    oper: OperatorKind,
    span: Range<usize>,
    rpn: &mut Lexemes,
    stack: &mut Lexemes,
    table: &OperatorTable,
) {
    while let Some(Token::Operator(top)) = stack.last().map(Lexeme::token) {
        if !table.should_pop(*top, oper) {
            break;
        }
        if let Some(popped) = stack.pop() {
            rpn.push(popped);
        }
    }
    stack.push(Lexeme::new(Token::Operator(oper), span));
}

/// Converts an infix lexeme sequence into Reverse Polish Notation (RPN).
///
/// Parentheses may nest at most `max_depth` levels.
///
/// # Errors
///
/// * `UnbalancedParentheses` for a `)` without a matching `(`, or a `(` left
///   open at the end of input.
/// * `NestingTooDeep` when parentheses nest past `max_depth`.
pub(crate) fn make_rpn(lexemes: Lexemes, table: &OperatorTable, max_depth: usize) -> Result<Lexemes, ParseError> {
    let mut rpn = Lexemes::with_capacity(lexemes.len());
    let mut stack = Lexemes::new();
    let mut depth = 0usize;

    for lexeme in lexemes {
        let (token, span) = lexeme.into_parts();
        match token {
            token @ (Token::Number(_) | Token::Variable | Token::Function(_))
                => rpn.push(Lexeme::new(token, span)),

            Token::Operator(oper)
                => make_rpn_case_of_operator(oper, span, &mut rpn, &mut stack, table),

            Token::Parenthesis { open: true } => {
                depth += 1;
                if depth > max_depth {
                    return Err(ParseError::NestingTooDeep { limit: max_depth, position: Position::at(span.start) });
                }
                stack.push(Lexeme::new(Token::Parenthesis { open: true }, span));
            },

            Token::Parenthesis { open: false } => {
                make_rpn_case_of_rparen(Position::at(span.start), &mut rpn, &mut stack)?;
                depth -= 1;
            },
        }
    }

    // Push any remaining operators to the RPN output
    while let Some(lexeme) = stack.pop() {
        if matches!(lexeme.token(), Token::Parenthesis { .. }) {
            return Err(ParseError::UnbalancedParentheses { position: lexeme.position() });
        }
        rpn.push(lexeme);
    }
    Ok(rpn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    /// Space separated rendering of the RPN sequence.
    fn rpn_of(formula: &str) -> Result<String, ParseError> {
        let table = &OperatorTable::STANDARD;
        let lexemes = Lexer::new(table, 16).tokenize(formula)?;
        let rpn = make_rpn(lexemes, table, 16)?;
        Ok(rpn.iter().map(|l| l.token().to_string()).collect::<Vec<_>>().join(" "))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(rpn_of("3+4*2").unwrap(), "3+0i 4+0i 2+0i * +");
        assert_eq!(rpn_of("3*4+2").unwrap(), "3+0i 4+0i * 2+0i +");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(rpn_of("8-3-2").unwrap(), "8+0i 3+0i - 2+0i -");
        assert_eq!(rpn_of("8/4*2").unwrap(), "8+0i 4+0i / 2+0i *");
    }

    #[test]
    fn test_right_associativity() {
        assert_eq!(rpn_of("2^3^2").unwrap(), "2+0i 3+0i 2+0i ^ ^");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(rpn_of("(1+2)*x").unwrap(), "1+0i 2+0i + x *");
        assert_eq!(rpn_of("((x))").unwrap(), "x");
    }

    #[test]
    fn test_function_passes_through() {
        assert_eq!(rpn_of("1+sin(x)").unwrap(), "1+0i sin(x) +");
    }

    #[test]
    fn test_classic_example() {
        assert_eq!(
            rpn_of("3+4*2/(1-5)^2^3").unwrap(),
            "3+0i 4+0i 2+0i * 1+0i 5+0i - 2+0i 3+0i ^ ^ / +"
        );
    }

    #[test]
    fn test_unmatched_right_paren() {
        let err = rpn_of("1+2)").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParentheses { position: Position::at(3) });
    }

    #[test]
    fn test_unmatched_left_paren() {
        let err = rpn_of("(2+3").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParentheses { position: Position::at(0) });
    }

    #[test]
    fn test_nesting_limit() {
        let table = &OperatorTable::STANDARD;
        let lexemes = Lexer::new(table, 16).tokenize("((x))").unwrap();
        assert!(make_rpn(lexemes.clone(), table, 2).is_ok());
        let err = make_rpn(lexemes, table, 1).unwrap_err();
        assert_eq!(err, ParseError::NestingTooDeep { limit: 1, position: Position::at(1) });
    }
}
