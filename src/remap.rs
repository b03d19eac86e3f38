//! # remap.rs
//!
//! Pixel distortion through an expression: every source pixel is mapped to a
//! complex input centered on the image midpoint, the expression is evaluated
//! there, and the result is read back as destination pixel coordinates.

use crate::complex::ComplexNumber;
use crate::expression::ExpressionTree;

use num_traits::ToPrimitive;

/// Complex input for the source pixel `(px, py)`: `(px - w/2) + i(py - h/2)`.
pub fn centered_input(px: usize, py: usize, width: usize, height: usize) -> ComplexNumber {
    ComplexNumber::new(
        px as f64 - width as f64 / 2.0,
        py as f64 - height as f64 / 2.0,
    )
}

/// Destination pixel for an evaluated value, undoing the centering of
/// [`centered_input`] and flooring to whole pixels.
///
/// Returns `None` when either component is not finite or the pixel falls
/// outside the `width` × `height` image.
pub fn destination(value: ComplexNumber, width: usize, height: usize) -> Option<(usize, usize)> {
    if !value.is_finite() {
        return None;
    }
    let x = (value.re + width as f64 / 2.0).floor().to_usize()?;
    let y = (value.im + height as f64 / 2.0).floor().to_usize()?;
    (x < width && y < height).then_some((x, y))
}

/// Destination linear index (`y * width + x`) for every source pixel, in
/// row-major order. The tree is evaluated `width × height` times and never
/// re-parsed.
///
/// # Example
/// ```rust
/// let tree = warpexpr::parse("x").unwrap();
/// let map = warpexpr::remap::remap_indices(&tree, 3, 2);
/// assert_eq!(map, (0..6).map(Some).collect::<Vec<_>>());
/// ```
pub fn remap_indices(tree: &ExpressionTree, width: usize, height: usize) -> Vec<Option<usize>> {
    let mut indices = Vec::with_capacity(width * height);
    for py in 0..height {
        for px in 0..width {
            let value = tree.evaluate(centered_input(px, py, width, height));
            indices.push(destination(value, width, height).map(|(x, y)| y * width + x));
        }
    }
    indices
}
