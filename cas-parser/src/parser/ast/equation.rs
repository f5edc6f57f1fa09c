use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// An equation `lhs = rhs`, optionally naming the variable to solve for with a trailing `, var`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,

    /// The variable to solve for, if one was given.
    pub var: Option<LitSym>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;
        input.expect(&[TokenKind::Assign])
            .map_err(|_| input.error(kind::MissingEquals))?;
        let rhs = input.try_parse::<Expr>()?;

        let var = if input.peek_kind() == Some(TokenKind::Comma) {
            input.next_token()?;
            Some(input.try_parse::<LitSym>()?)
        } else {
            None
        };

        let end = var.as_ref().map_or(rhs.span().end, |var| var.span.end);
        Ok(Self {
            span: lhs.span().start..end,
            lhs,
            rhs,
            var,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)?;
        if let Some(var) = &self.var {
            write!(f, ", {}", var)?;
        }
        Ok(())
    }
}
