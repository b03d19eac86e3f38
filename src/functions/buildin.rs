//! # buildin.rs
//!
//! Standard mathematical functions for expression evaluation.
//!
//! This module defines the built-in functions available in expressions. Names
//! are matched case-insensitively through a compile-time map.

use crate::complex::{ComplexNumber, PolarPow};

use phf::Map;
use phf_macros::phf_map;

macro_rules! define_functions {
    ( $( $name:ident => { arity: $arity:expr, apply: $imp:expr } ), + $(,)? ) => {
        /// Enumeration of available standard functions.
        #[allow(non_camel_case_types)] // To use ident as string to compare them.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum FuncKind {
            $( $name ), +
        }

        impl FuncKind {
            /// Returns a list of available function names.
            pub(crate) fn available_names() -> &'static [&'static str]
            {
                &[ $( stringify!($name) ),+ ]
            }

            /// Lower-case name of the function.
            pub fn name(&self) -> &'static str
            {
                match self {
                    $( Self::$name => stringify!($name), )+
                }
            }

            /// Number of arguments the function takes.
            pub fn arity(&self) -> usize
            {
                match self {
                    $( Self::$name => $arity, )+
                }
            }

            /// Evaluates the function. `args` must hold exactly `arity()` values.
            pub fn apply(&self, args: &[ComplexNumber]) -> ComplexNumber
            {
                match self {
                    $( Self::$name => $imp(args), )+
                }
            }
        }
    };
}

define_functions!(
    sin  => { arity: 1, apply: |a: &[ComplexNumber]| a[0].sin() },
    cos  => { arity: 1, apply: |a: &[ComplexNumber]| a[0].cos() },
    tan  => { arity: 1, apply: |a: &[ComplexNumber]| a[0].tan() },
    sinh => { arity: 1, apply: |a: &[ComplexNumber]| a[0].sinh() },
    cosh => { arity: 1, apply: |a: &[ComplexNumber]| a[0].cosh() },
    exp  => { arity: 1, apply: |a: &[ComplexNumber]| a[0].exp() },
    ln   => { arity: 1, apply: |a: &[ComplexNumber]| a[0].ln() },
    sqrt => { arity: 1, apply: |a: &[ComplexNumber]| a[0].sqrt() },
    pow  => { arity: 2, apply: |a: &[ComplexNumber]| a[0].complex_pow(&a[1]) },
);

/// Map of functions by their lower-case name.
static FUNCTIONS: Map<&'static str, FuncKind> = phf_map! {
    "sin"  => FuncKind::sin,
    "cos"  => FuncKind::cos,
    "tan"  => FuncKind::tan,
    "sinh" => FuncKind::sinh,
    "cosh" => FuncKind::cosh,
    "exp"  => FuncKind::exp,
    "ln"   => FuncKind::ln,
    "sqrt" => FuncKind::sqrt,
    "pow"  => FuncKind::pow,
};

impl FuncKind {
    /// Resolves a function name, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Self>
    {
        FUNCTIONS.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

impl std::fmt::Display for FuncKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
