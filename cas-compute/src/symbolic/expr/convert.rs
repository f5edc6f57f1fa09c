//! Conversion from the parser's AST into [`Expr`].

use ariadne::{Fmt, Report};
use cas_error::{basic_report, Error, ErrorKind, EXPR};
use cas_parser::parser::{
    ast::{BinOpKind, Call, Expr as AstExpr, Literal, UnaryOpKind},
    Parser,
};
use crate::primitive::rational_from_decimal;
use std::ops::Range;
use super::{Expr, Func};

/// Errors that can occur while converting an AST into an [`Expr`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The called function does not exist.
    UnknownFunction {
        name: String,
        suggestions: Vec<&'static str>,
    },

    /// A function was called with the wrong number of arguments.
    WrongArgumentCount {
        name: String,
        expected: usize,
        given: usize,
    },

    /// A number literal could not be read.
    InvalidNumber,
}

impl ErrorKind for ConvertError {
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> Report<'a, (&'a str, Range<usize>)> {
        match self {
            Self::UnknownFunction { name, suggestions } => basic_report(
                src_id,
                spans,
                format!("unknown function `{}`", name),
                &["this function does not exist".to_string()],
                (!suggestions.is_empty()).then(|| {
                    format!("did you mean: {}", suggestions.join(", ").fg(EXPR))
                }),
            ),
            Self::WrongArgumentCount { name, expected, given } => basic_report(
                src_id,
                spans,
                format!("wrong number of arguments to `{}`", name),
                &[format!("{} argument(s) given here", given)],
                Some(format!("`{}` takes {} argument(s)", name, expected)),
            ),
            Self::InvalidNumber => basic_report(
                src_id,
                spans,
                "invalid number",
                &["this number could not be read".to_string()],
                None,
            ),
        }
    }
}

/// Converts the arguments of a call, which must number exactly `N`.
fn take_args<const N: usize>(call: Call) -> Result<[Expr; N], Error> {
    let given = call.args.len();
    let args = call.args
        .into_iter()
        .map(Expr::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    args.try_into().map_err(|_| {
        Error::new(vec![call.paren_span], ConvertError::WrongArgumentCount {
            name: call.name.name,
            expected: N,
            given,
        })
    })
}

/// Converts a function call. `sqrt`, `cbrt` and `root` become powers.
fn convert_call(call: Call) -> Result<Expr, Error> {
    let name = call.name.name.clone();
    match name.as_str() {
        "sqrt" => {
            let [arg] = take_args(call)?;
            Ok(arg.root(2))
        },
        "cbrt" => {
            let [arg] = take_args(call)?;
            Ok(arg.root(3))
        },
        "root" => {
            let [radicand, degree] = take_args(call)?;
            Ok(radicand.pow(degree.recip()))
        },
        _ => {
            let Some(func) = Func::from_name(&name) else {
                return Err(Error::new(vec![call.name.span.clone()], ConvertError::UnknownFunction {
                    suggestions: Func::similar_names(&name),
                    name,
                }));
            };
            let [arg] = take_args(call)?;
            Ok(Expr::call(func, arg))
        },
    }
}

impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => rational_from_decimal(&num.value)
                .map(Expr::from)
                .ok_or_else(|| Error::new(vec![num.span], ConvertError::InvalidNumber)),
            // `e` is Euler's number; it's kept as `exp(1)` so exponential rules apply to `e^x`
            AstExpr::Literal(Literal::Symbol(sym)) if sym.name == "e" => {
                Ok(Expr::call(Func::Exp, Expr::num(1)))
            },
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(Expr::sym(&sym.name)),
            AstExpr::Paren(paren) => Expr::try_from(paren.into_innermost()),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Ok(-Expr::try_from(*unary.operand)?),
            },
            AstExpr::Binary(bin) => {
                let lhs = Expr::try_from(*bin.lhs)?;
                let rhs = Expr::try_from(*bin.rhs)?;
                Ok(match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Exp => lhs.pow(rhs),
                })
            },
        }
    }
}

/// Parses a string directly into an [`Expr`]. No simplification is done.
pub fn parse_expr(input: &str) -> Result<Expr, Error> {
    let ast = Parser::new(input).try_parse_full::<AstExpr>()?;
    Expr::try_from(ast)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flattens_sums_and_products() {
        let expr = parse_expr("x + (y + z)").unwrap();
        assert_eq!(expr, Expr::Add(vec![Expr::sym("x"), Expr::sym("y"), Expr::sym("z")]));

        let expr = parse_expr("2x*y").unwrap();
        assert_eq!(expr, Expr::Mul(vec![Expr::num(2), Expr::sym("x"), Expr::sym("y")]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - 3/4").unwrap();
        assert_eq!(expr, Expr::Add(vec![
            Expr::sym("x"),
            Expr::Mul(vec![Expr::num(-3), Expr::num((1, 4))]),
        ]));
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_expr("0.125").unwrap(), Expr::num((1, 8)));
    }

    #[test]
    fn roots_and_constants() {
        assert_eq!(parse_expr("sqrt(x)").unwrap(), Expr::sym("x").pow(Expr::num((1, 2))));
        assert_eq!(parse_expr("root(x, 4)").unwrap(), Expr::sym("x").pow(Expr::num((1, 4))));
        assert_eq!(parse_expr("e").unwrap(), Expr::call(Func::Exp, Expr::num(1)));
    }

    #[test]
    fn unknown_function() {
        let err = parse_expr("sinn(x)").unwrap_err();
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn wrong_argument_count() {
        assert!(parse_expr("sin(x, y)").is_err());
        assert!(parse_expr("root(x)").is_err());
    }
}
