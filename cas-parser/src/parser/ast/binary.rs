use crate::parser::{ast::expr::Expr, token::op::{BinOp, BinOpKind}};
use std::{fmt, ops::Range};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Mul if self.op.implicit => write!(f, "{}{}", self.lhs, self.rhs),
            BinOpKind::Exp => write!(f, "{}^{}", self.lhs, self.rhs),
            kind => write!(f, "{} {} {}", self.lhs, kind, self.rhs),
        }
    }
}
