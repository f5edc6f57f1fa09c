//! Allocation of fresh parameter names.

use cas_compute::symbolic::Expr;

/// The kind of a fresh parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `K_1`, `K_2`, ...: ranges over the integers, and numbers the members of a periodic family
    /// of solutions.
    Integer,

    /// `X_1`, `X_2`, ...: ranges over the reals, and stands for a substituted subexpression.
    Placeholder,
}

impl ParamKind {
    fn prefix(self) -> &'static str {
        match self {
            ParamKind::Integer => "K_",
            ParamKind::Placeholder => "X_",
        }
    }
}

/// Returns the lowest-numbered parameter name of the given kind that does not occur in any of the
/// given expressions.
pub fn fresh_parameter(kind: ParamKind, exprs: &[&Expr]) -> String {
    let mut index = 1usize;
    loop {
        let name = format!("{}{}", kind.prefix(), index);
        if exprs.iter().all(|expr| !expr.contains(&name)) {
            return name;
        }
        index += 1;
    }
}
