//! Top-level functions module.
//!
//! This module groups the named functions an expression can call:
//!
//! - `buildin`: the registry of built-in function kinds, their arity and the
//!   complex formula each one evaluates.
//! - `call`: a function call as it appears in a token, holding its reduced
//!   arguments and the constant-folded result when no argument depends on
//!   the free variable.
//!
//! The module also exposes `names()`, a static slice of the registered
//! function names, convenient for error messages or autocompletion.
pub(crate) mod buildin;
mod call;

pub use buildin::FuncKind;
pub use call::Function;

#[cfg(test)]
pub(crate) use call::COMPUTATIONS;

/// Return the available built-in function names.
pub fn names() -> &'static [&'static str]
{
    buildin::FuncKind::available_names()
}
