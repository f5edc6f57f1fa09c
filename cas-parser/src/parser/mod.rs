pub mod ast;
pub mod error;
pub mod token;

use error::{kind, Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Operator precedence, from lowest to highest. Implicit multiplication shares the precedence of
/// explicit multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence. Used to start parsing a full expression.
    Any,

    /// Addition and subtraction.
    Term,

    /// Multiplication and division, explicit or implicit.
    Factor,

    /// Unary negation. Binds looser than exponentiation, so `-x^2` is `-(x^2)`.
    Neg,

    /// Exponentiation.
    Exp,
}

/// The associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Any type that can be parsed from a stream of tokens.
pub trait Parse: Sized {
    /// Parses a value of this type, advancing the stream past the consumed tokens.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// A high-level parser for equations and expressions. This is the type to use to parse an
/// arbitrary piece of input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there is none.
    pub fn span(&self) -> Range<usize> {
        self.peek().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next non-whitespace token without advancing the cursor.
    pub fn peek(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next non-whitespace token without advancing the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Consumes the next token if it has the given kind, returning it. Otherwise, the cursor is
    /// left unchanged and an [`UnexpectedToken`](kind::UnexpectedToken) error is returned.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let start = self.cursor;
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            self.cursor = start;
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected,
                found: token.kind,
            }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. If parsing fails, the cursor
    /// is restored to where it was before the attempt.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        T::parse(self).map_err(|err| {
            self.cursor = start;
            err
        })
    }

    /// Parses a value from the stream, then requires that only whitespace remains.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = self.try_parse::<T>()?;
        match self.peek() {
            Some(token) => Err(Error::new(
                vec![token.span.start..self.eof_span().end],
                kind::ExpectedEof,
            )),
            None => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use ast::{BinOpKind, Equation, Expr};

    fn parse_expr(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn precedence() {
        assert_eq!(parse_expr("1 + 2 * 3^4").to_string(), "1 + 2 * 3^4");
        match parse_expr("1 + 2 * 3^4") {
            Expr::Binary(bin) => assert_eq!(bin.op.kind, BinOpKind::Add),
            other => panic!("expected addition, found {:?}", other),
        }
    }

    #[test]
    fn negation_binds_looser_than_power() {
        match parse_expr("-x^2") {
            Expr::Unary(unary) => assert!(matches!(*unary.operand, Expr::Binary(_))),
            other => panic!("expected negation, found {:?}", other),
        }
    }

    #[test]
    fn power_is_right_associative() {
        match parse_expr("2^3^4") {
            Expr::Binary(bin) => {
                assert_eq!(bin.op.kind, BinOpKind::Exp);
                assert!(matches!(*bin.rhs, Expr::Binary(_)));
            },
            other => panic!("expected power, found {:?}", other),
        }
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse_expr("5exp(x^4-7)").to_string(), "5exp(x^4 - 7)");
        assert_eq!(parse_expr("2x^2").to_string(), "2x^2");
        assert_eq!(parse_expr("3 (x + 1)").to_string(), "3(x + 1)");
    }

    #[test]
    fn call_with_arguments() {
        match parse_expr("root(x, 3)") {
            Expr::Call(call) => {
                assert_eq!(call.name.name, "root");
                assert_eq!(call.args.len(), 2);
            },
            other => panic!("expected call, found {:?}", other),
        }
    }

    #[test]
    fn equation_with_variable() {
        let eq = Parser::new("sin(t) = 1/2, t").try_parse_full::<Equation>().unwrap();
        assert_eq!(eq.var.map(|var| var.name), Some("t".to_string()));
        assert_eq!(eq.lhs.to_string(), "sin(t)");
        assert_eq!(eq.rhs.to_string(), "1 / 2");
    }

    #[test]
    fn missing_equals() {
        assert!(Parser::new("x + 1").try_parse_full::<Equation>().is_err());
    }

    #[test]
    fn unclosed_paren() {
        assert!(Parser::new("(x + 1").try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn trailing_garbage() {
        assert!(Parser::new("x + 1 )").try_parse_full::<Expr>().is_err());
        assert!(Parser::new("x $").try_parse_full::<Expr>().is_err());
    }
}
