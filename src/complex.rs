//! # complex.rs
//!
//! Complex arithmetic used by the evaluator.
//!
//! The ring operations (`+ - * /`) come straight from [`num_complex::Complex`]:
//! componentwise addition and subtraction, `(a·c − b·d, a·d + b·c)` for the
//! product, and the conjugate-normalized quotient. A zero-modulus divisor is
//! not an error; the quotient simply carries infinite or NaN components.
//!
//! This module adds the polar-form power that the `^` operator is defined by.

use num_complex::Complex;

/// Complex value produced by literals, variable substitution and every
/// evaluation step.
pub type ComplexNumber = Complex<f64>;

/// `0 + 0i`.
pub const ZERO: ComplexNumber = Complex::new(0.0, 0.0);

/// `1 + 0i`.
pub const ONE: ComplexNumber = Complex::new(1.0, 0.0);

/// The imaginary unit `0 + 1i`.
pub const I: ComplexNumber = Complex::new(0.0, 1.0);

/// Polar-form exponentiation.
pub trait PolarPow: Sized {
    /// Four-quadrant argument of the value, in `(-π, π]`.
    fn argument(&self) -> f64;

    /// Raises the value to a real power: `(r^n·cos(nθ), r^n·sin(nθ))`.
    fn polar_pow(&self, n: f64) -> Self;

    /// Raises the value to a complex power, `exp(w·ln z)`.
    ///
    /// Falls back to [`polar_pow`](PolarPow::polar_pow) when the exponent has
    /// no imaginary part, so real exponents take the exact same path.
    fn complex_pow(&self, w: &Self) -> Self;
}

impl PolarPow for ComplexNumber {
    fn argument(&self) -> f64 {
        self.im.atan2(self.re)
    }

    fn polar_pow(&self, n: f64) -> Self {
        let r = self.norm().powf(n);
        let theta = self.argument() * n;
        Complex::new(r * theta.cos(), r * theta.sin())
    }

    fn complex_pow(&self, w: &Self) -> Self {
        if w.im == 0.0 {
            return self.polar_pow(w.re);
        }

        let ln = Complex::new(self.norm().ln(), self.argument());
        let exponent = w * ln;
        Complex::from_polar(exponent.re.exp(), exponent.im)
    }
}
