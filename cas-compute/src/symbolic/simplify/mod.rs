//! Simplification of expressions to a canonical form.
//!
//! The simplifier works bottom-up. The children of a node are simplified first, then the rules in
//! [`rules`] are applied to the node itself until none of them apply. Whenever a rule rewrites a
//! node, the children of the new node are simplified again, since the rewrite may have produced
//! unsimplified subexpressions (for example, combining `x^2*x^3` produces the exponent `2+3`).
//!
//! Which rules are applied is controlled by [`SimplifyOptions`]. Some rules pull in opposite
//! directions (factoring and expanding, folding and expanding logarithms), so the options decide
//! which of the two is used; the expanding variant always wins.

pub mod fraction;
pub mod rules;
pub mod step;

use log::{trace, warn};
use super::expr::Expr;
use step::{Step, StepCollector};

/// The maximum number of rewrites applied to a single node before giving up.
const MAX_PASSES: usize = 64;

/// Selects the rewrite rules used by [`simplify_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Fold constants, flatten nested sums / products, and apply identities like `x^1 = x`.
    pub trivial: bool,

    /// Sort the terms of sums and the factors of products into a canonical order.
    pub canonical_ordering: bool,

    /// Pull factors shared by every term out of a sum, `ab + ac = a(b + c)`.
    pub factor_common_terms: bool,

    /// Distribute products over sums, and expand small integer powers of sums.
    pub expand: bool,

    /// The largest power of a sum expanded when [`SimplifyOptions::expand`] is set.
    pub max_expand_power: u32,

    /// Cancel factors shared by the numerator and denominator, `x^3/x = x^2`.
    pub reduce_quotients: bool,

    /// Combine sums of logarithms into one logarithm, `ln(2) + ln(3) = ln(6)`.
    pub fold_logarithms: bool,

    /// Split logarithms of products and powers, `ln(6) = ln(2) + ln(3)`.
    pub expand_logarithms: bool,

    /// Apply identities between functions, like `sin(x)^2 + cos(x)^2 = 1`.
    pub functional_relations: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            trivial: true,
            canonical_ordering: true,
            factor_common_terms: false,
            expand: false,
            max_expand_power: 8,
            reduce_quotients: true,
            fold_logarithms: false,
            expand_logarithms: false,
            functional_relations: true,
        }
    }
}

impl SimplifyOptions {
    /// The options used by the equation solver. Common factors are pulled out of sums, so that
    /// products can be split into separate equations.
    pub fn solver() -> Self {
        Self {
            factor_common_terms: true,
            ..Self::default()
        }
    }

    /// The options used to decide equivalence. Everything is expanded as far as possible.
    pub fn expanded() -> Self {
        Self {
            expand: true,
            expand_logarithms: true,
            ..Self::default()
        }
    }

    /// Sets whether products and powers of sums are expanded.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Sets the largest power of a sum that is expanded.
    pub fn with_max_expand_power(mut self, power: u32) -> Self {
        self.max_expand_power = power;
        self
    }

    /// Sets whether common factors are pulled out of sums.
    pub fn with_factor_common_terms(mut self, factor: bool) -> Self {
        self.factor_common_terms = factor;
        self
    }

    /// Sets whether common factors of numerators and denominators are cancelled.
    pub fn with_reduce_quotients(mut self, reduce: bool) -> Self {
        self.reduce_quotients = reduce;
        self
    }

    /// Sets whether sums of logarithms are folded into one logarithm.
    pub fn with_fold_logarithms(mut self, fold: bool) -> Self {
        self.fold_logarithms = fold;
        self
    }

    /// Sets whether logarithms of products and powers are split.
    pub fn with_expand_logarithms(mut self, expand: bool) -> Self {
        self.expand_logarithms = expand;
        self
    }

    /// Sets whether identities between functions are applied.
    pub fn with_functional_relations(mut self, apply: bool) -> Self {
        self.functional_relations = apply;
        self
    }
}

/// Simplifies the node and all of its children.
fn inner_simplify(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut current = expr.map_children(|child| inner_simplify(child, options, step_collector));

    for _ in 0..MAX_PASSES {
        match rules::all(&current, options, step_collector) {
            Some(next) => {
                trace!("{} => {}", current, next);
                current = next.map_children(|child| inner_simplify(child, options, step_collector));
            },
            None => return current,
        }
    }

    warn!("simplification of `{}` did not settle after {} passes", current, MAX_PASSES);
    current
}

/// Simplifies the given expression with the default options.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &SimplifyOptions::default())
}

/// Simplifies the given expression with the given options.
pub fn simplify_with(expr: &Expr, options: &SimplifyOptions) -> Expr {
    inner_simplify(expr, options, &mut ())
}

/// Simplifies the given expression with the given options, also returning the rewrites that were
/// applied, in order.
pub fn simplify_with_steps(expr: &Expr, options: &SimplifyOptions) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = inner_simplify(expr, options, &mut steps);
    (simplified, steps)
}

/// Returns true if the two expressions are mathematically equal.
///
/// The difference of the expressions is simplified with [`SimplifyOptions::expanded`]. The
/// expressions are equivalent if the difference is `0`, or if both are constants whose numeric
/// difference is zero. A `false` result does not prove that the expressions differ.
pub fn equivalent(lhs: &Expr, rhs: &Expr) -> bool {
    equivalent_with(lhs, rhs, &SimplifyOptions::expanded())
}

/// Like [`equivalent`], but simplifies the difference with the given options.
pub fn equivalent_with(lhs: &Expr, rhs: &Expr, options: &SimplifyOptions) -> bool {
    if lhs == rhs {
        return true;
    }

    let difference = simplify_with(&(lhs.clone() - rhs.clone()), options);
    if difference.is_number() {
        return difference.is_number_eq(0);
    }

    difference.is_constant() && difference.is_zero()
}
