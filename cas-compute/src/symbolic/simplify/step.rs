//! Steps recorded while simplifying an expression.

use std::fmt;

/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when you don't
/// want to know the steps taken by an algorithm, which is the case for the equation solver.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// A single rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`, `a*(b*c) = a*b*c`
    Flatten,

    /// `2+3 = 5`
    AddNumbers,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `sin(x)^2+cos(x)^2 = 1`
    Pythagorean,

    /// `ln(a)+ln(b) = ln(ab)`
    FoldLogarithms,

    /// `ab+ac = a(b+c)`
    FactorCommon,

    /// `b+a = a+b`
    SortTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `2^(1/2)*3^(1/2) = 6^(1/2)`
    CombineRadicals,

    /// `2(a+b) = 2a+2b`
    DistributeNumber,

    /// `a(b+c) = ab+ac`
    Distribute,

    /// `b*a = a*b`
    SortFactors,

    /// `a^0 = 1`, `a^1 = a`, `1^a = 1`, `0^a = 0`
    PowerIdentity,

    /// `4^(3/2) = 8`, `20^(1/2) = 2*5^(1/2)`
    NumberPower,

    /// `(a^b)^c = a^(bc)`
    PowerOfPower,

    /// `(ab)^c = a^c*b^c`
    PowerOfProduct,

    /// `(a+b)^2 = a^2+2ab+b^2`
    ExpandPower,

    /// `exp(a)^b = exp(ab)`, `exp(ln(a)) = a`, `ln(1) = 0`
    Exponential,

    /// `sin(pi/6) = 1/2`
    Trigonometric,

    /// `sinh(0) = 0`, `cosh(0) = 1`
    Hyperbolic,

    /// `arcsin(1/2) = pi/6`
    InverseTrigonometric,

    /// `sin(-a) = -sin(a)`, `cos(-a) = cos(a)`
    Parity,

    /// `f(f^-1(a)) = a`
    Inverse,

    /// `abs(-3) = 3`, `sgn(-3) = -1`
    AbsSign,

    /// `ln(ab) = ln(a)+ln(b)`
    ExpandLogarithm,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Step::Flatten => "flatten nested sums and products",
            Step::AddNumbers => "add numbers",
            Step::CombineLikeTerms => "combine like terms",
            Step::Pythagorean => "apply the pythagorean identity",
            Step::FoldLogarithms => "combine logarithms",
            Step::FactorCommon => "factor out a common factor",
            Step::SortTerms => "reorder terms",
            Step::MultiplyZero => "multiply by zero",
            Step::MultiplyNumbers => "multiply numbers",
            Step::CombineLikeFactors => "combine like factors",
            Step::CombineRadicals => "combine radicals with the same index",
            Step::DistributeNumber => "distribute a number over a sum",
            Step::Distribute => "distribute a product over a sum",
            Step::SortFactors => "reorder factors",
            Step::PowerIdentity => "apply a power identity",
            Step::NumberPower => "evaluate a power of a number",
            Step::PowerOfPower => "multiply nested exponents",
            Step::PowerOfProduct => "raise each factor to the power",
            Step::ExpandPower => "expand a power of a sum",
            Step::Exponential => "simplify an exponential or logarithm",
            Step::Trigonometric => "evaluate a trigonometric function",
            Step::Hyperbolic => "evaluate a hyperbolic function",
            Step::InverseTrigonometric => "evaluate an inverse trigonometric function",
            Step::Parity => "use the parity of a function",
            Step::Inverse => "cancel a function with its inverse",
            Step::AbsSign => "evaluate an absolute value or sign",
            Step::ExpandLogarithm => "expand a logarithm",
        };
        write!(f, "{}", text)
    }
}
