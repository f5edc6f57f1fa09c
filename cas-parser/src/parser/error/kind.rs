use ariadne::{Fmt, Report};
use cas_error::{basic_report, ErrorKind, EXPR};
use crate::tokenizer::TokenKind;
use std::ops::Range;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        basic_report(
            src_id,
            spans,
            "unexpected end of input",
            &[format!("you might need to add another {} here", "expression".fg(EXPR))],
            None,
        )
    }
}

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedEof;

impl ErrorKind for ExpectedEof {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        basic_report(
            src_id,
            spans,
            "expected end of input",
            &[format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
            None,
        )
    }
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

impl ErrorKind for UnexpectedToken {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        let expected = self.expected
            .iter()
            .map(|kind| format!("{:?}", kind))
            .collect::<Vec<_>>()
            .join(", ");
        basic_report(
            src_id,
            spans,
            "unexpected token",
            &[format!("expected one of: {}", expected)],
            Some(format!("found {:?}", self.found)),
        )
    }
}

/// A parenthesis was opened but never closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedParenthesis;

impl ErrorKind for UnclosedParenthesis {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        basic_report(
            src_id,
            spans,
            "missing closing parenthesis",
            &["this parenthesis is never closed".to_string()],
            Some(format!("add a {} to close it", ")".fg(EXPR))),
        )
    }
}

/// An equation was expected, but the input has no `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingEquals;

impl ErrorKind for MissingEquals {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        basic_report(
            src_id,
            spans,
            "expected an equation",
            &[format!("an {} sign is needed here", "=".fg(EXPR))],
            Some(format!("write the input as {}", "lhs = rhs".fg(EXPR))),
        )
    }
}
