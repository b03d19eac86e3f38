//! # expression.rs
//!
//! The parsed, immutable form of an expression and its evaluator.

use crate::astnode::AstNode;
use crate::complex::{ComplexNumber, ZERO};

use smallvec::SmallVec;

/// Scratch buffer size that keeps typical expressions off the heap.
const INLINE_NODES: usize = 32;

/// A parsed expression over the single free variable `x`.
///
/// The tree is built once by [`parse`](crate::parse) or
/// [`Builder::build`](crate::Builder::build) and never changes afterwards, so
/// it can be evaluated any number of times, from any number of threads,
/// without re-parsing or locking.
///
/// # Example
/// ```rust
/// use num_complex::Complex;
///
/// let tree = warpexpr::parse("x^2 + 1").unwrap();
/// let z = tree.evaluate(Complex::new(0.0, 1.0));
/// assert!(z.norm() < 1.0e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    nodes: Vec<AstNode>,
}

impl ExpressionTree {
    /// Wraps a non-empty, breadth-first node arena.
    pub(crate) fn new(nodes: Vec<AstNode>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    /// Evaluates the expression with `x` bound to the free variable.
    ///
    /// Walks the arena from the last node back to the root, so every branch
    /// finds both children already computed. The walk is iterative and does
    /// not grow the call stack with nesting depth.
    pub fn evaluate(&self, x: ComplexNumber) -> ComplexNumber {
        let mut values: SmallVec<[ComplexNumber; INLINE_NODES]> = SmallVec::from_elem(ZERO, self.nodes.len());

        for (id, node) in self.nodes.iter().enumerate().rev() {
            values[id] = match node {
                AstNode::Leaf(operand) => operand.evaluate(x),
                AstNode::Branch { operator, left, right } => operator.apply(values[*left], values[*right]),
            };
        }

        values.first().copied().unwrap_or(ZERO)
    }

    /// Evaluates the expression at `re + i·im`.
    pub fn evaluate_parts(&self, re: f64, im: f64) -> ComplexNumber {
        self.evaluate(ComplexNumber::new(re, im))
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a parsed expression has at least one node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the result is the same for every `x`.
    pub fn is_constant(&self) -> bool {
        self.nodes.iter().all(|node| match node {
            AstNode::Leaf(operand) => !operand.contains_variable(),
            AstNode::Branch { .. } => true,
        })
    }

    /// Nodes in breadth-first order; index 0 is the root.
    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    /// The root node.
    pub fn root(&self) -> Option<&AstNode> {
        self.nodes.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::OperatorKind;
    use crate::token::Operand;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;

    fn number(re: f64, im: f64) -> AstNode {
        AstNode::Leaf(Operand::Number(Complex::new(re, im)))
    }

    #[test]
    fn test_single_leaf() {
        let tree = ExpressionTree::new(vec![AstNode::Leaf(Operand::Variable)]);
        let z = Complex::new(1.5, -0.5);
        assert_eq!(tree.evaluate(z), z);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(!tree.is_constant());
    }

    #[test]
    fn test_branch_operand_order() {
        // 8 / x
        let tree = ExpressionTree::new(vec![
            AstNode::Branch { operator: OperatorKind::Div, left: 1, right: 2 },
            number(8.0, 0.0),
            AstNode::Leaf(Operand::Variable),
        ]);
        let result = tree.evaluate_parts(2.0, 0.0);
        assert_abs_diff_eq!(result.re, 4.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(result.im, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn test_nested_branches() {
        // (x - 1) * (x + 1)
        let tree = ExpressionTree::new(vec![
            AstNode::Branch { operator: OperatorKind::Mul, left: 1, right: 2 },
            AstNode::Branch { operator: OperatorKind::Sub, left: 3, right: 4 },
            AstNode::Branch { operator: OperatorKind::Add, left: 5, right: 6 },
            AstNode::Leaf(Operand::Variable),
            number(1.0, 0.0),
            AstNode::Leaf(Operand::Variable),
            number(1.0, 0.0),
        ]);
        let z = Complex::new(0.5, 2.0);
        let result = tree.evaluate(z);
        let expected = z * z - 1.0;
        assert_abs_diff_eq!(result.re, expected.re, epsilon = 1.0e-12);
        assert_abs_diff_eq!(result.im, expected.im, epsilon = 1.0e-12);
    }

    #[test]
    fn test_is_constant() {
        let tree = ExpressionTree::new(vec![
            AstNode::Branch { operator: OperatorKind::Add, left: 1, right: 2 },
            number(2.0, 0.0),
            number(0.0, 3.0),
        ]);
        assert!(tree.is_constant());
        assert_eq!(tree.root(), tree.nodes().first());
    }

    #[test]
    fn test_deep_tree_exceeds_inline_buffer() {
        // x + (x + (x + ...)): branch k sits at 2k, its leaf at 2k+1
        let depth = 100;
        let mut nodes = Vec::new();
        for level in 0..depth {
            nodes.push(AstNode::Branch { operator: OperatorKind::Add, left: 2 * level + 1, right: 2 * level + 2 });
            nodes.push(AstNode::Leaf(Operand::Variable));
        }
        nodes.push(AstNode::Leaf(Operand::Variable));

        let tree = ExpressionTree::new(nodes);
        assert_eq!(tree.len(), 2 * depth + 1);
        let result = tree.evaluate_parts(1.0, 1.0);
        assert_abs_diff_eq!(result.re, (depth + 1) as f64, epsilon = 1.0e-9);
        assert_abs_diff_eq!(result.im, (depth + 1) as f64, epsilon = 1.0e-9);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExpressionTree>();
    }
}
