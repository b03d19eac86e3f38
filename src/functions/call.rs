//! # call.rs
//!
//! A function call as it appears in a token: the resolved kind, its arguments
//! reduced to operands, and the constant-folded result when the free variable
//! does not occur in any argument.

use crate::complex::{ComplexNumber, ZERO};
use crate::error::{ParseError, Position};
use crate::functions::buildin::FuncKind;
use crate::token::Operand;

use smallvec::SmallVec;

#[cfg(test)]
thread_local! {
    /// Number of times any function body ran on this thread.
    pub(crate) static COMPUTATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// A resolved function call.
///
/// Whether the call is *changing* is decided once, at construction: it is
/// changing iff the free variable occurs in one of its argument sub-trees.
/// A non-changing call is evaluated right away and the result is kept for the
/// lifetime of the call; [`Function::evaluate`] returns that value without
/// recomputing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    kind: FuncKind,
    args: Vec<Operand>,
    changing: bool,
    constant: Option<ComplexNumber>,
}

impl Function {
    /// Resolves `name` in the registry and binds `args` to it.
    ///
    /// # Errors
    ///
    /// * [`ParseError::UnknownFunction`] if `name` is not registered.
    /// * [`ParseError::ArgumentArityMismatch`] if the number of arguments does
    ///   not match the function's arity.
    pub fn new(name: &str, args: Vec<Operand>, position: Position) -> Result<Self, ParseError> {
        let kind = FuncKind::lookup(name).ok_or_else(|| ParseError::UnknownFunction {
            name: name.to_string(),
            position,
        })?;

        if args.len() != kind.arity() {
            return Err(ParseError::ArgumentArityMismatch {
                function: kind.name().to_string(),
                what: "arguments",
                expected: kind.arity(),
                found: args.len(),
                position,
            });
        }

        Ok(Self::with_kind(kind, args))
    }

    fn with_kind(kind: FuncKind, args: Vec<Operand>) -> Self {
        let changing = args.iter().any(Operand::contains_variable);
        let mut func = Self { kind, args, changing, constant: None };
        if !changing {
            // no argument reads the binding
            func.constant = Some(func.compute(ZERO));
        }
        func
    }

    /// Evaluates the call with `x` bound to the free variable.
    pub fn evaluate(&self, x: ComplexNumber) -> ComplexNumber {
        match self.constant {
            Some(value) => value,
            None => self.compute(x),
        }
    }

    fn compute(&self, x: ComplexNumber) -> ComplexNumber {
        #[cfg(test)]
        COMPUTATIONS.with(|count| count.set(count.get() + 1));

        let values: SmallVec<[ComplexNumber; 2]> = self.args.iter()
            .map(|arg| arg.evaluate(x))
            .collect();
        self.kind.apply(&values)
    }

    /// The function being called.
    pub fn kind(&self) -> FuncKind {
        self.kind
    }

    /// Arguments in source order.
    pub fn args(&self) -> &[Operand] {
        &self.args
    }

    /// Whether the free variable occurs in an argument.
    pub fn is_changing(&self) -> bool {
        self.changing
    }

    /// The folded result of a non-changing call.
    pub fn constant(&self) -> Option<ComplexNumber> {
        self.constant
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;

    fn computations() -> usize {
        COMPUTATIONS.with(|count| count.get())
    }

    #[test]
    fn test_unknown_function() {
        let err = Function::new("foo", vec![Operand::Variable], Position::at(2)).unwrap_err();
        assert_eq!(err, ParseError::UnknownFunction { name: "foo".into(), position: Position::at(2) });
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = Function::new("pow", vec![Operand::Variable], Position::at(0)).unwrap_err();
        assert!(matches!(err,
            ParseError::ArgumentArityMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_case_insensitive_name() {
        let func = Function::new("SIN", vec![Operand::Variable], Position::at(0)).unwrap();
        assert_eq!(func.kind(), FuncKind::sin);
    }

    #[test]
    fn test_constant_folding() {
        let before = computations();
        let func = Function::new("sin", vec![Operand::Number(Complex::new(5.0, 0.0))], Position::at(0)).unwrap();
        assert!(!func.is_changing());
        assert_eq!(computations(), before + 1);

        let cached = func.constant().unwrap();
        assert_abs_diff_eq!(cached.re, 5.0_f64.sin(), epsilon = 1.0e-12);

        let a = func.evaluate(Complex::new(0.0, 0.0));
        let b = func.evaluate(Complex::new(-3.0, 8.0));
        assert_eq!(a.re.to_bits(), b.re.to_bits());
        assert_eq!(a.im.to_bits(), b.im.to_bits());
        assert_eq!(computations(), before + 1);
    }

    #[test]
    fn test_changing_function() {
        let func = Function::new("cos", vec![Operand::Variable], Position::at(0)).unwrap();
        assert!(func.is_changing());
        assert_eq!(func.constant(), None);

        let before = computations();
        let z = Complex::new(0.3, 0.4);
        let result = func.evaluate(z);
        assert_abs_diff_eq!(result.re, z.cos().re, epsilon = 1.0e-12);
        assert_abs_diff_eq!(result.im, z.cos().im, epsilon = 1.0e-12);
        func.evaluate(z);
        assert_eq!(computations(), before + 2);
    }

    #[test]
    fn test_nested_changing_propagates() {
        let inner = Function::new("sin", vec![Operand::Variable], Position::at(4)).unwrap();
        let outer = Function::new("cos", vec![Operand::Function(inner)], Position::at(0)).unwrap();
        assert!(outer.is_changing());

        let inner = Function::new("sin", vec![Operand::Number(ZERO)], Position::at(4)).unwrap();
        let outer = Function::new("cos", vec![Operand::Function(inner)], Position::at(0)).unwrap();
        assert!(!outer.is_changing());
        assert_eq!(outer.constant(), Some(Complex::new(1.0, -0.0)));
    }

    #[test]
    fn test_display() {
        let func = Function::new("pow", vec![Operand::Variable, Operand::Number(Complex::new(2.0, 0.0))], Position::at(0)).unwrap();
        assert_eq!(func.to_string(), "pow(x, 2+0i)");
    }
}
