//! Options that bound the work done by the solver.

/// Tuning knobs for [`solve_with`](crate::solve_with) and
/// [`solve_zero_with`](crate::solve_zero_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    /// Polynomials of a higher degree are not handed to the polynomial root engine.
    pub max_degree: usize,

    /// The rational root search is skipped if the leading or constant coefficient (after clearing
    /// denominators) is larger than this in magnitude.
    pub max_rational_root_magnitude: u64,

    /// The largest integer power of a sum expanded when comparing expressions for equivalence.
    pub max_expand_power: u32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_degree: 100,
            max_rational_root_magnitude: 1_000_000_000_000,
            max_expand_power: 8,
        }
    }
}

impl SolveOptions {
    /// Sets the largest polynomial degree handed to the polynomial root engine.
    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Sets the largest coefficient magnitude for which rational roots are searched.
    pub fn with_max_rational_root_magnitude(mut self, magnitude: u64) -> Self {
        self.max_rational_root_magnitude = magnitude;
        self
    }

    /// Sets the largest power of a sum expanded when comparing expressions.
    pub fn with_max_expand_power(mut self, power: u32) -> Self {
        self.max_expand_power = power;
        self
    }
}
