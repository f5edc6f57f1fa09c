use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses an operand: a literal, a parenthesized expression, a function call, or a negated
    /// expression.
    fn parse_operand(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.peek().cloned() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Sub => {
                input.next_token()?;
                let op = UnaryOp { kind: UnaryOpKind::Neg, span: token.span.clone() };
                let operand = Self::parse_with_precedence(input, op.precedence())?;
                Ok(Expr::Unary(Unary {
                    span: token.span.start..operand.span().end,
                    operand: Box::new(operand),
                    op,
                }))
            },
            TokenKind::Add => {
                input.next_token()?;
                Self::parse_with_precedence(input, Precedence::Neg)
            },
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Expr::Paren),
            TokenKind::Name => match input.try_parse::<Call>() {
                Ok(call) => Ok(Expr::Call(call)),
                Err(_) => input.try_parse::<Literal>().map(Expr::Literal),
            },
            TokenKind::Int | TokenKind::Float => input.try_parse::<Literal>().map(Expr::Literal),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                    TokenKind::Sub,
                ],
                found,
            })),
        }
    }

    /// Parses an expression whose binary operators all bind at least as tightly as `min`.
    ///
    /// An operand directly following another operand (`2x`, `5exp(x)`, `3(x + 1)`) is joined to
    /// it with implicit multiplication.
    pub fn parse_with_precedence(input: &mut Parser, min: Precedence) -> Result<Self, Error> {
        let mut lhs = Self::parse_operand(input)?;

        loop {
            let Some(token) = input.peek().cloned() else {
                break;
            };

            let op = if let Some(kind) = BinOpKind::from_token(token.kind) {
                BinOp { kind, implicit: false, span: token.span.clone() }
            } else if token.kind.starts_operand() {
                let end = lhs.span().end;
                BinOp { kind: BinOpKind::Mul, implicit: true, span: end..end }
            } else {
                break;
            };

            if op.precedence() < min {
                break;
            }

            if !op.implicit {
                input.next_token()?;
            }

            let rhs = match op.associativity() {
                Associativity::Right => Self::parse_with_precedence(input, op.precedence())?,
                Associativity::Left => Self::parse_with_tighter(input, op.precedence())?,
            };

            lhs = Expr::Binary(Binary {
                span: lhs.span().start..rhs.span().end,
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Parses an expression whose binary operators all bind strictly tighter than `prec`.
    fn parse_with_tighter(input: &mut Parser, prec: Precedence) -> Result<Self, Error> {
        let next = match prec {
            Precedence::Any => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Neg,
            Precedence::Neg | Precedence::Exp => Precedence::Exp,
        };
        Self::parse_with_precedence(input, next)
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Self::parse_with_precedence(input, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
