use ariadne::{Fmt, Report, Source};
use cas_error::{basic_report, ErrorKind, EXPR};
use std::ops::Range;

/// The equation has no variable to solve for.
#[derive(Debug, Clone, PartialEq)]
pub struct NoVariable;

impl ErrorKind for NoVariable {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        basic_report(
            src_id,
            spans,
            "nothing to solve for",
            &["this equation does not contain a variable".to_string()],
            None,
        )
    }
}

/// The equation has more than one variable, none of them `x`, and none was named.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousVariable {
    /// The variables found in the equation.
    pub candidates: Vec<String>,
}

impl ErrorKind for AmbiguousVariable {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        let first = self.candidates.first().map(String::as_str).unwrap_or("y");
        basic_report(
            src_id,
            spans,
            "cannot tell which variable to solve for",
            &[format!("this equation contains {}", self.candidates.join(", ").fg(EXPR))],
            Some(format!("name the variable after a comma: `..., {}`", first.fg(EXPR))),
        )
    }
}

/// An error in one line of input, reported against that line.
#[derive(Debug)]
pub struct Error(pub cas_error::Error);

impl Error {
    /// Report the error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        let report = self.0.build_report("input");
        if let Err(err) = report.eprint(("input", Source::from(input))) {
            eprintln!("{}", err);
        }
    }
}

impl From<cas_error::Error> for Error {
    fn from(err: cas_error::Error) -> Self {
        Self(err)
    }
}
