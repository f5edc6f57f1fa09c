//! Exact solutions of equations in one real variable.
//!
//! [`solve`] finds the solutions of `f = g` as exact expressions. The solver combines several
//! strategies: moving terms and factors across the equation, inverting functions, finding the
//! roots of polynomials (rational roots, then closed forms up to degree 3, then substitutions for
//! higher degrees), substituting a repeated subexpression with a placeholder, and reducing
//! equations in `exp(x)` or in `sin(x)` and `cos(x)` to polynomial equations.
//!
//! ```
//! use cas_compute::symbolic::parse_expr;
//! use cas_solver::{solve, Budget};
//!
//! let f = parse_expr("x^3 + 3x^2 - 5x + 1").unwrap();
//! let set = solve(&f, &parse_expr("0").unwrap(), "x", &mut Budget::default());
//! assert_eq!(set.len(), Some(3));
//! ```
//!
//! # Solution sets
//!
//! The result is a [`SolutionSet`]: a finite set of solutions, [`SolutionSet::AllReals`] if the
//! equation holds for every value of the variable, or [`SolutionSet::NoSolutions`] if it provably
//! has no real solution. The solver is incomplete, so an empty finite set means only that no
//! solution was found.
//!
//! Periodic equations have infinitely many solutions. These are returned as families in a fresh
//! integer parameter `K_1`, `K_2`, ...; `sin(x) = 1/2` has the solutions `pi/6 + 2*pi*K_1` and
//! `5*pi/6 + 2*pi*K_1`.
//!
//! # Termination
//!
//! Every recursive step spends one unit of a [`Budget`]. Once the budget runs out, the solver
//! stops looking and returns what it has.

pub mod budget;
pub mod options;
pub mod param;
pub mod seq;
pub mod solution;

mod catalog;
mod ctxt;
mod dispatch;
mod poly;
mod special;
mod substitution;
mod validate;
mod zero;

pub use budget::Budget;
pub use options::SolveOptions;
pub use param::{fresh_parameter, ParamKind};
pub use seq::ExprSeq;
pub use solution::SolutionSet;

use cas_compute::symbolic::{simplify_with, Expr, SimplifyOptions};
use ctxt::Ctxt;
use log::info;

/// Simplifies each solution into the form shown to the user, with products of sums expanded.
fn present(set: SolutionSet) -> SolutionSet {
    let options = SimplifyOptions::default().with_expand(true);
    set.map(|expr| simplify_with(&expr, &options))
}

/// Solves `f = g` for `var` with the default [`SolveOptions`].
pub fn solve(f: &Expr, g: &Expr, var: &str, budget: &mut Budget) -> SolutionSet {
    solve_with(f, g, var, budget, &SolveOptions::default())
}

/// Solves `f = g` for `var`.
///
/// Every solution returned is checked by substituting it into the equation. Solutions that
/// contain a parameter or another symbol, and so cannot be evaluated, are kept.
pub fn solve_with(f: &Expr, g: &Expr, var: &str, budget: &mut Budget, options: &SolveOptions) -> SolutionSet {
    let start = budget.remaining();
    let mut ctxt = Ctxt::new(budget, options);
    let set = dispatch::solve(f, g, var, &mut ctxt)
        .retain(|root| validate::satisfies(f, g, var, root));
    info!("solved {} = {} for {}: {} ({} steps)", f, g, var, set, start - budget.remaining());
    present(set)
}

/// Solves `f = 0` for `var` with the default [`SolveOptions`].
pub fn solve_zero(f: &Expr, var: &str, budget: &mut Budget) -> SolutionSet {
    solve_zero_with(f, var, budget, &SolveOptions::default())
}

/// Solves `f = 0` for `var`.
pub fn solve_zero_with(f: &Expr, var: &str, budget: &mut Budget, options: &SolveOptions) -> SolutionSet {
    let start = budget.remaining();
    let mut ctxt = Ctxt::new(budget, options);
    let zero = Expr::num(0);
    let set = zero::solve_zero(f, var, &mut ctxt)
        .retain(|root| validate::satisfies(f, &zero, var, root));
    info!("solved {} = 0 for {}: {} ({} steps)", f, var, set, start - budget.remaining());
    present(set)
}
