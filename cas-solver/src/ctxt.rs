//! State threaded through every recursive call of the solver.

use cas_compute::symbolic::{equivalent_with, simplify_with, Expr, SimplifyOptions};
use log::debug;
use super::{budget::Budget, options::SolveOptions};

/// The budget and options of one solve request.
pub(crate) struct Ctxt<'a> {
    budget: &'a mut Budget,
    pub options: &'a SolveOptions,
}

impl<'a> Ctxt<'a> {
    pub fn new(budget: &'a mut Budget, options: &'a SolveOptions) -> Self {
        Self { budget, options }
    }

    /// Spends one unit of the budget. Returns false if the budget is exhausted.
    pub fn tick(&mut self) -> bool {
        let ok = self.budget.tick();
        if !ok {
            debug!("solve budget exhausted");
        }
        ok
    }

    /// Simplifies an expression the way the solver expects: common factors are pulled out of sums
    /// so that products can be split.
    pub fn simplify(&self, expr: &Expr) -> Expr {
        simplify_with(expr, &SimplifyOptions::solver())
    }

    /// Returns true if the two expressions are mathematically equal.
    pub fn equivalent(&self, lhs: &Expr, rhs: &Expr) -> bool {
        let options = SimplifyOptions::expanded().with_max_expand_power(self.options.max_expand_power);
        equivalent_with(lhs, rhs, &options)
    }
}
