use crate::parser::{ast::expr::Expr, token::op::{UnaryOp, UnaryOpKind}};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            UnaryOpKind::Neg => write!(f, "-{}", self.operand),
        }
    }
}
