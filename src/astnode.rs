//! # astnode.rs
//!
//! Binary expression tree built from an RPN lexeme sequence.
//!
//! Nodes live in an arena and refer to their children by index. Every node is
//! either a leaf holding an [`Operand`] or a branch holding an operator and
//! exactly two children; a branch with one child, or an operator in a leaf,
//! cannot be represented.
//!
//! The finished arena is laid out breadth-first: the root sits at index 0 and
//! every child has a larger index than its parent. Evaluating the nodes from
//! the last index down to 0 therefore always finds both children of a branch
//! already computed.

use crate::error::{ParseError, Position};
use crate::lexer::Lexemes;
use crate::operators::OperatorKind;
use crate::token::{Operand, Token};

use std::collections::VecDeque;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

/// One node of an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Number, variable or function call.
    Leaf(Operand),

    /// Operator applied to two sub-trees.
    Branch {
        operator: OperatorKind,
        left: NodeId,
        right: NodeId,
    },
}

/// Folds an RPN sequence into an arena with a single build stack.
///
/// Operands become leaves. An operator pops two nodes: the first pop is the
/// right child and the second the left child, which keeps the operand order
/// the RPN sequence encodes. Returns the arena in creation order and the id of
/// the root.
///
/// # Errors
///
/// * `MissingOperand` when an operator finds fewer than two nodes to bind, or
///   the sequence is empty.
/// * `ExtraOperand` when more than one node is left over.
pub(crate) fn from_rpn(rpn: Lexemes) -> Result<(Vec<AstNode>, NodeId), ParseError> {
    let mut arena: Vec<AstNode> = Vec::with_capacity(rpn.len());
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for lexeme in rpn {
        let (token, span) = lexeme.into_parts();
        let position = Position::at(span.start);
        let node = match token {
            Token::Operator(operator) => {
                let (right, _) = stack.pop().ok_or(ParseError::MissingOperand { position })?;
                let (left, _) = stack.pop().ok_or(ParseError::MissingOperand { position })?;
                AstNode::Branch { operator, left, right }
            },
            Token::Parenthesis { .. } => return Err(ParseError::UnbalancedParentheses { position }),
            Token::Number(value) => AstNode::Leaf(Operand::Number(value)),
            Token::Variable => AstNode::Leaf(Operand::Variable),
            Token::Function(func) => AstNode::Leaf(Operand::Function(func)),
        };
        arena.push(node);
        stack.push((arena.len() - 1, span.start));
    }

    match stack.as_slice() {
        [] => Err(ParseError::MissingOperand { position: Position::UNKNOWN }),
        [(root, _)] => Ok((arena, *root)),
        [_, (_, start), ..] => Err(ParseError::ExtraOperand { position: Position::at(*start) }),
    }
}

/// Re-lays out the tree rooted at `root` in breadth-first order.
///
/// Nodes unreachable from `root` are dropped.
pub(crate) fn breadth_first(arena: Vec<AstNode>, root: NodeId) -> Vec<AstNode> {
    let mut slots: Vec<Option<AstNode>> = arena.into_iter().map(Some).collect();
    let mut nodes = Vec::with_capacity(slots.len());
    let mut queue = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        let Some(node) = slots.get_mut(id).and_then(Option::take) else {
            continue;
        };
        match node {
            AstNode::Leaf(operand) => nodes.push(AstNode::Leaf(operand)),
            AstNode::Branch { operator, left, right } => {
                // children land after every node already queued
                let next = nodes.len() + queue.len() + 1;
                queue.push_back(left);
                queue.push_back(right);
                nodes.push(AstNode::Branch { operator, left: next, right: next + 1 });
            },
        }
    }

    nodes
}
