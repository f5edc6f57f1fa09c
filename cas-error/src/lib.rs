//! Contains the common [`ErrorKind`] trait used by all user-facing errors of the solver, and the
//! [`Error`] type that pairs an [`ErrorKind`] with the regions of the input it refers to.
//!
//! Errors are rendered with [`ariadne`]. Most error kinds only need a message, one label per span
//! and an optional help line; [`basic_report`] builds exactly that.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)>;
}

/// Builds a report with the given message, one label per span (in order), and an optional help
/// line.
///
/// Empty label strings produce a highlighted span without text. If there are more labels than
/// spans, the extra labels are ignored.
pub fn basic_report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    labels: &[String],
    help: Option<String>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let offset = spans.first().map(|span| span.start).unwrap_or(0);
    let mut builder = Report::build(ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(
            labels
                .iter()
                .zip(spans)
                .map(|(label_str, span)| {
                    let label = Label::new((src_id, span.clone())).with_color(EXPR);
                    if label_str.is_empty() {
                        label
                    } else {
                        label.with_message(label_str)
                    }
                })
                .collect::<Vec<_>>(),
        );

    if let Some(help) = help {
        builder.set_help(help);
    }

    builder.finish()
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'a, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Prints the report of this error to stderr, using `input` as the highlighted source.
    ///
    /// [`Report`] has no `Display` implementation, so printing goes through its `eprint` method.
    /// Failing to write to stderr is not recoverable in any useful way, so it is ignored.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        let _ = self.build_report(src_id).eprint((src_id, Source::from(input)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Missing;

    impl ErrorKind for Missing {
        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<'a, (&'a str, Range<usize>)> {
            basic_report(src_id, spans, "missing thing", &["here".to_string()], Some("add it".to_string()))
        }
    }

    #[test]
    fn report_renders_message_and_help() {
        let input = "x + ";
        let err = Error::new(vec![4..4], Missing);
        let mut out = Vec::new();
        err.build_report("input").write(("input", Source::from(input)), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("missing thing"));
        assert!(text.contains("add it"));
    }
}
