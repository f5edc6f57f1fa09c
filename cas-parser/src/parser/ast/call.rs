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

/// A function call, such as `sin(x)` or `root(x, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open = input.expect(&[TokenKind::OpenParen])?;

        let mut args = Vec::new();
        if input.peek_kind() != Some(TokenKind::CloseParen) {
            loop {
                args.push(input.try_parse::<Expr>()?);
                if input.peek_kind() == Some(TokenKind::Comma) {
                    input.next_token()?;
                } else {
                    break;
                }
            }
        }

        let close = input.expect(&[TokenKind::CloseParen])
            .map_err(|_| Error::new(vec![open.span.clone()], kind::UnclosedParenthesis))?;

        Ok(Self {
            span: name.span.start..close.span.end,
            paren_span: open.span.start..close.span.end,
            name,
            args,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
