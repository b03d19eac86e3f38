//! lexer.rs
//!
//! This module provides the lexical analyzer for expressions. It turns an input
//! string into a sequence of `Lexeme`s, each holding a `Token` and its span in
//! the original string.
//!
//! Scanning is case-insensitive and skips whitespace. Besides splitting the
//! input, the lexer resolves the ambiguous parts of the grammar:
//!
//! - a `-` in operand position fuses into the following numeric literal, or
//!   becomes `-1 *` in front of a variable, call or parenthesis. Since `*`
//!   binds looser than `^`, `2^-x` reads as `(2^-1)*x`; write `2^(-x)` for
//!   a negated exponent;
//! - a literal followed by `i` or `*i` is imaginary;
//! - a letter run followed by `(` is a function call whose arguments are
//!   lexed recursively and must each reduce to a single token;
//! - juxtaposed operands (`2x`, `(a)(b)`) get an explicit `*` between them.

use crate::complex::{ComplexNumber, I};
use crate::error::{ParseError, Position};
use crate::functions::Function;
use crate::operators::{OperatorKind, OperatorTable};
use crate::token::Token;

use std::ops::Range;

/// Constant char representing an imaginary unit
pub const IMAGINARY_UNIT: char = 'i';

/// Constant char representing the free variable
pub const VARIABLE: char = 'x';

/// A single token together with its span (start..end byte offsets) in the
/// original input string.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    token: Token,
    span: Range<usize>,
}

impl Lexeme {
    /// Create a new `Lexeme`.
    pub fn new(token: Token, span: Range<usize>) -> Self {
        Self { token, span }
    }

    /// Returns the token of the lexeme.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the span of the lexeme in the original input string.
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// Returns the start of the lexeme as an error position.
    pub fn position(&self) -> Position {
        Position::at(self.span.start)
    }

    /// Splits the lexeme into its token and span.
    pub fn into_parts(self) -> (Token, Range<usize>) {
        (self.token, self.span)
    }
}

impl std::fmt::Display for Lexeme
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{token} [{start}, {end})", token=self.token, start=self.span.start, end=self.span.end)
    }
}

/// Type alias for a collection of lexemes.
pub type Lexemes = Vec<Lexeme>;

/// A non-whitespace, lower-cased character and its byte offset in the input.
type Scanned = (usize, char);

/// Cursor over the scanned characters of one (sub-)expression.
struct Scan<'a> {
    chars: &'a [Scanned],
    cursor: usize,
}

impl<'a> Scan<'a> {
    fn peek(&self) -> Option<Scanned> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_char_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.cursor + ahead).map(|&(_, ch)| ch)
    }

    fn bump(&mut self) -> Option<Scanned> {
        let scanned = self.peek()?;
        self.cursor += 1;
        Some(scanned)
    }

    /// Byte offset just past the last consumed character.
    fn consumed_end(&self) -> usize {
        match self.cursor.checked_sub(1).and_then(|idx| self.chars.get(idx)) {
            Some(&(pos, ch)) => pos + ch.len_utf8(),
            None => 0,
        }
    }

    /// Whether a `-` at the cursor is in operand position: at the start, or
    /// after a character that cannot end an operand (a trailing `.` ends a
    /// literal such as `2.`).
    fn in_operand_position(&self) -> bool {
        match self.cursor.checked_sub(1).and_then(|idx| self.chars.get(idx)) {
            None => true,
            Some(&(_, prev)) => !(prev.is_ascii_alphanumeric() || prev == ')' || prev == '.'),
        }
    }
}

/// Splits expressions into lexemes using a given operator table.
pub(crate) struct Lexer<'t> {
    table: &'t OperatorTable,
    max_depth: usize,
}

impl<'t> Lexer<'t> {
    /// Creates a lexer that allows function calls nested up to `max_depth`.
    pub fn new(table: &'t OperatorTable, max_depth: usize) -> Self {
        Self { table, max_depth }
    }

    /// Splits `input` into lexemes.
    ///
    /// # Errors
    ///
    /// Any lexical failure, including failures raised while resolving
    /// function calls (unknown name, argument count, unclosed bracket).
    pub fn tokenize(&self, input: &str) -> Result<Lexemes, ParseError> {
        let chars: Vec<Scanned> = input.char_indices()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(idx, ch)| (idx, ch.to_ascii_lowercase()))
            .collect();

        self.lex(&chars, 0)
    }

    fn lex(&self, chars: &[Scanned], depth: usize) -> Result<Lexemes, ParseError> {
        let mut scan = Scan { chars, cursor: 0 };
        let mut lexemes = Lexemes::new();

        while let Some((pos, ch)) = scan.peek() {
            match ch {
                '0'..='9' | '.' => {
                    lexemes.push(lex_number(&mut scan, pos, false)?);
                },
                '-' if scan.in_operand_position() => {
                    scan.bump();
                    match scan.peek_char_at(0) {
                        Some(next) if next.is_ascii_digit() || next == '.' => {
                            lexemes.push(lex_number(&mut scan, pos, true)?);
                        },
                        Some(next) if next.is_ascii_alphabetic() || next == '(' => {
                            // negation of a non-literal operand
                            lexemes.push(Lexeme::new(Token::Number(ComplexNumber::new(-1.0, 0.0)), pos..pos + 1));
                            lexemes.push(Lexeme::new(Token::Operator(OperatorKind::Mul), pos..pos + 1));
                        },
                        _ => {
                            // nothing to negate; the converter reports the missing operand
                            lexemes.push(Lexeme::new(Token::Operator(OperatorKind::Sub), pos..pos + 1));
                        },
                    }
                },
                VARIABLE => {
                    scan.bump();
                    lexemes.push(Lexeme::new(Token::Variable, pos..pos + 1));
                },
                IMAGINARY_UNIT => {
                    scan.bump();
                    lexemes.push(Lexeme::new(Token::Number(I), pos..pos + 1));
                },
                c if c.is_ascii_alphabetic() => {
                    lexemes.push(self.lex_function(&mut scan, depth)?);
                },
                '(' | ')' => {
                    scan.bump();
                    lexemes.push(Lexeme::new(Token::Parenthesis { open: ch == '(' }, pos..pos + 1));
                },
                c => match self.table.lookup(c) {
                    Some(kind) => {
                        scan.bump();
                        lexemes.push(Lexeme::new(Token::Operator(kind), pos..pos + c.len_utf8()));
                    },
                    None => return Err(ParseError::LexError {
                        message: format!("unexpected character '{c}'"),
                        position: Position::at(pos),
                    }),
                },
            }
        }

        Ok(insert_implicit_multiplication(lexemes))
    }

    /// Lexes a letter run and the argument list that must follow it.
    fn lex_function(&self, scan: &mut Scan, depth: usize) -> Result<Lexeme, ParseError> {
        let chars = scan.chars;
        let (start, _) = scan.peek().unwrap_or((0, ' '));
        let mut name = String::new();
        while let Some((_, ch)) = scan.peek() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            name.push(ch);
            scan.bump();
        }

        let open = match scan.peek() {
            Some((open, '(')) => open,
            _ => return Err(ParseError::UnknownFunction { name, position: Position::at(start) }),
        };
        if depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep { limit: self.max_depth, position: Position::at(open) });
        }
        scan.bump();

        // split on top-level commas up to the matching ')'
        let mut ranges: Vec<Range<usize>> = Vec::new();
        let mut arg_begin = scan.cursor;
        let mut level = 0usize;
        loop {
            let Some((_, ch)) = scan.bump() else {
                return Err(ParseError::MissingClosingBracket { position: Position::at(open) });
            };
            match ch {
                '(' => level += 1,
                ')' if level == 0 => {
                    ranges.push(arg_begin..scan.cursor - 1);
                    break;
                },
                ')' => level -= 1,
                ',' if level == 0 => {
                    ranges.push(arg_begin..scan.cursor - 1);
                    arg_begin = scan.cursor;
                },
                _ => {},
            }
        }
        let end = scan.consumed_end();

        let mut args = Vec::with_capacity(ranges.len());
        for range in ranges {
            let arg_chars = &chars[range];
            let position = arg_chars.first().map_or(Position::at(open), |&(pos, _)| Position::at(pos));
            let mut sub = self.lex(arg_chars, depth + 1)?;
            if sub.len() != 1 {
                return Err(ParseError::ArgumentArityMismatch {
                    function: name,
                    what: "token per argument",
                    expected: 1,
                    found: sub.len(),
                    position,
                });
            }
            let Some(lexeme) = sub.pop() else {
                return Err(ParseError::MissingOperand { position });
            };
            let position = lexeme.position();
            let (token, _) = lexeme.into_parts();
            let operand = token.into_operand()
                .ok_or(ParseError::MissingOperand { position })?;
            args.push(operand);
        }

        let func = Function::new(&name, args, Position::at(start))?;
        Ok(Lexeme::new(Token::Function(func), start..end))
    }
}

/// Lexes a decimal literal at the cursor, with its imaginary marker if any.
///
/// `start` is where the lexeme begins (the `-` for a fused negative literal).
fn lex_number(scan: &mut Scan, start: usize, negative: bool) -> Result<Lexeme, ParseError> {
    let mut text = String::new();
    while let Some((_, ch)) = scan.peek() {
        if !(ch.is_ascii_digit() || ch == '.') {
            break;
        }
        text.push(ch);
        scan.bump();
    }

    let magnitude: f64 = text.parse().map_err(|_| ParseError::LexError {
        message: format!("malformed number literal '{text}'"),
        position: Position::at(start),
    })?;
    let value = if negative { -magnitude } else { magnitude };

    let imaginary = match (scan.peek_char_at(0), scan.peek_char_at(1)) {
        (Some(IMAGINARY_UNIT), _) => {
            scan.bump();
            true
        },
        (Some('*'), Some(IMAGINARY_UNIT)) => {
            scan.bump();
            scan.bump();
            true
        },
        _ => false,
    };

    let number = if imaginary {
        ComplexNumber::new(0.0, value)
    } else {
        ComplexNumber::new(value, 0.0)
    };
    Ok(Lexeme::new(Token::Number(number), start..scan.consumed_end()))
}

/// Inserts `*` between juxtaposed operands such as `2x`, `x(1)` or `(a)(b)`.
fn insert_implicit_multiplication(lexemes: Lexemes) -> Lexemes {
    let mut out = Lexemes::with_capacity(lexemes.len());
    for lexeme in lexemes {
        let juxtaposed = out.last()
            .is_some_and(|prev: &Lexeme| prev.token().ends_operand() && lexeme.token().starts_operand());
        if juxtaposed {
            let at = lexeme.span().start;
            out.push(Lexeme::new(Token::Operator(OperatorKind::Mul), at..at));
        }
        out.push(lexeme);
    }
    out
}
