//! # operators.rs
//!
//! The binary operator table: symbol, precedence and associativity of each
//! operator, and the complex operation it applies.
//!
//! The table is an immutable value passed by reference to the lexer (to
//! recognize operator characters) and to the RPN converter (to decide pop
//! order). Operators are compared through [`OperatorTable::should_pop`], never
//! through equality or ordering on the operators themselves.

use crate::complex::{ComplexNumber, PolarPow};

/// Precedence and associativity of one operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorAttr {
    /// The operator this entry describes.
    pub kind: OperatorKind,
    /// Source character.
    pub symbol: char,
    /// Higher binds tighter.
    pub precedence: u8,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)` when set.
    pub right_assoc: bool,
}

/// Lookup table from operator symbols to their attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorTable {
    entries: &'static [OperatorAttr],
}

#[doc(hidden)]
/// Internal macro to define all binary operators.
///
/// Entries must be listed in declaration order of the enum so that
/// `OperatorTable::attr` can index by discriminant.
macro_rules! binary_operators {
    ($($name:ident => {
        symbol: $symbol:expr,
        precedence: $prec:expr,
        right_assoc: $assoc:expr,
        apply: $apply:expr
    }),+ $(,)?) => {
        /// A binary operator in a mathematical expression.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum OperatorKind {
            $($name),+
        }

        impl OperatorKind {
            /// Every operator, in table order.
            pub const ALL: &'static [OperatorKind] = &[$(Self::$name),+];

            /// Source character of the operator.
            pub fn symbol(&self) -> char {
                match self {
                    $(Self::$name => $symbol,)+
                }
            }

            /// Applies the operator to two complex numbers.
            pub fn apply(&self, l: ComplexNumber, r: ComplexNumber) -> ComplexNumber {
                match self {
                    $(Self::$name => $apply(l, r),)+
                }
            }
        }

        impl OperatorTable {
            /// `^` (4, right), `*` `/` (3, left), `-` `+` (2, left).
            pub const STANDARD: OperatorTable = OperatorTable {
                entries: &[
                    $(OperatorAttr {
                        kind: OperatorKind::$name,
                        symbol: $symbol,
                        precedence: $prec,
                        right_assoc: $assoc,
                    },)+
                ],
            };
        }
    };
}

binary_operators! {
    Pow => { symbol: '^', precedence: 4, right_assoc: true,
             apply: |l: ComplexNumber, r: ComplexNumber| l.complex_pow(&r) },
    Mul => { symbol: '*', precedence: 3, right_assoc: false,
             apply: |l: ComplexNumber, r: ComplexNumber| l * r },
    Div => { symbol: '/', precedence: 3, right_assoc: false,
             apply: |l: ComplexNumber, r: ComplexNumber| l / r },
    Sub => { symbol: '-', precedence: 2, right_assoc: false,
             apply: |l: ComplexNumber, r: ComplexNumber| l - r },
    Add => { symbol: '+', precedence: 2, right_assoc: false,
             apply: |l: ComplexNumber, r: ComplexNumber| l + r },
}

impl OperatorTable {
    /// Returns the operator spelled by `symbol`, if any.
    pub fn lookup(&self, symbol: char) -> Option<OperatorKind> {
        self.entries
            .iter()
            .find(|attr| attr.symbol == symbol)
            .map(|attr| attr.kind)
    }

    /// Returns the attributes of `kind`.
    pub fn attr(&self, kind: OperatorKind) -> &OperatorAttr {
        &self.entries[kind as usize]
    }

    /// Returns the precedence of the operator spelled by `symbol`.
    pub fn precedence_of(&self, symbol: char) -> Option<u8> {
        self.lookup(symbol).map(|kind| self.attr(kind).precedence)
    }

    /// Whether `top`, sitting on the operator stack, must be emitted before
    /// `incoming` is pushed.
    ///
    /// Strictly higher precedence always pops. Equal precedence pops only when
    /// `top` is left-associative, which keeps left-to-right order for `-` and
    /// `/` chains and right grouping for `^`.
    pub fn should_pop(&self, top: OperatorKind, incoming: OperatorKind) -> bool {
        let top = self.attr(top);
        let incoming = self.attr(incoming);
        top.precedence > incoming.precedence
            || (top.precedence == incoming.precedence && !top.right_assoc)
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
