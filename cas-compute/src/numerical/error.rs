use crate::symbolic::Func;
use std::fmt;

/// Errors that can occur while numerically evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression contains a symbol with no numeric value, such as a variable or an integer
    /// parameter.
    UnknownSymbol(String),

    /// A function was evaluated outside of its domain, such as `ln(-1)` or `tan(pi/2)`.
    Domain(Func),

    /// A division by zero occurred, including negative powers of zero.
    DivisionByZero,

    /// The result is not a real number, such as an even root of a negative number.
    NonReal,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::UnknownSymbol(name) => write!(f, "`{}` has no numeric value", name),
            EvalError::Domain(func) => write!(f, "argument is outside the domain of `{}`", func),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::NonReal => write!(f, "result is not a real number"),
        }
    }
}

impl std::error::Error for EvalError {}
