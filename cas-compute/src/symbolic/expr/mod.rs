//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::ast::expr::Expr) type from `cas_parser` mirrors the input as
//! written. It's convenient for parsing, but not so much for algebraic manipulation.
//!
//! This module defines a separate [`Expr`] that **flattens** the tree into lists of terms and
//! factors. Subtraction is stored as addition of a term multiplied by `-1`, and division as
//! multiplication by a factor raised to the power of `-1`. Numbers are exact [`Rational`]s.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is hard in general: `x^2 + 2x + 1`
//! and `(x + 1)^2` are equal, but only after expansion. The [`PartialEq`] implementation for
//! [`Expr`] therefore implements **strict equality**, a cheap subset of mathematical equality:
//!
//! - Both expressions are the same kind of node.
//! - Numbers, symbols and functions must match exactly, with strictly equal arguments.
//! - Sums and products must have strictly equal terms / factors, in any order (as multisets).
//! - Powers must have strictly equal bases and exponents.
//!
//! Strict equality never reports false positives. Mathematical comparison is available through
//! [`equivalent`](crate::symbolic::equivalent), which simplifies first.

mod convert;
mod fmt;
mod func;
mod iter;
mod order;

pub use convert::{parse_expr, ConvertError};
pub use func::{Func, Parity};
pub use iter::ExprIter;

use crate::primitive::{int, rational};
use rug::{Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

/// The name of the symbol that represents π.
pub const PI_SYMBOL: &str = "pi";

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2` or `-3/4`.
    Number(Rational),

    /// A variable or named constant, such as `x`, `K_1` or `pi`.
    Symbol(String),

    /// A function applied to one argument, such as `sin(x)`.
    Call(Func, Box<Expr>),
}

/// A mathematical expression, flattened into sums of products.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

/// Returns true if both slices hold strictly equal expressions with the same multiplicities, in
/// any order.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|l| {
        match rhs.iter().enumerate().position(|(i, r)| !used[i] && l == r) {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Expr {
    /// Creates a number.
    pub fn num<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rational(n)))
    }

    /// Creates a symbol with the given name.
    pub fn sym(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_owned()))
    }

    /// The constant π.
    pub fn pi() -> Self {
        Self::sym(PI_SYMBOL)
    }

    /// Calls `func` on the given argument.
    pub fn call(func: Func, arg: Expr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Expr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the reciprocal of this expression. Numbers are inverted directly, and the exponent
    /// of a power with a numeric exponent is negated; everything else is raised to `-1`.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(n)) if n.cmp0().is_ne() => {
                Self::Primary(Primary::Number(n.recip()))
            },
            Self::Exp(base, exp) => match *exp {
                Self::Primary(Primary::Number(n)) => Self::Exp(base, Box::new(Self::num(-n))),
                exp => Self::Exp(base, Box::new(exp)).pow(Self::num(-1)),
            },
            expr => expr.pow(Self::num(-1)),
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::num((1, 2)))
    }

    /// Returns the `n`th root of this expression. No simplification is done.
    pub fn root(self, n: i32) -> Self {
        self.pow(Self::num((1, n)))
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is an integer, returns it.
    pub fn as_integer(&self) -> Option<Integer> {
        self.as_number()
            .filter(|n| *n.denom() == 1)
            .map(|n| n.numer().clone())
    }

    /// Returns true if the expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if the expression is the number `value`.
    pub fn is_number_eq(&self, value: i32) -> bool {
        self.as_number().map_or(false, |n| *n == value)
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a function call, returns the function and its argument.
    pub fn as_call(&self) -> Option<(Func, &Expr)> {
        match self {
            Self::Primary(Primary::Call(func, arg)) => Some((*func, arg)),
            _ => None,
        }
    }

    /// Returns the terms of a sum, or the expression itself as the only term.
    pub fn terms(&self) -> &[Expr] {
        match self {
            Self::Add(terms) => terms,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Returns the factors of a product, or the expression itself as the only factor.
    pub fn factors(&self) -> &[Expr] {
        match self {
            Self::Mul(factors) => factors,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Consumes the expression, returning its terms.
    pub fn into_terms(self) -> Vec<Expr> {
        match self {
            Self::Add(terms) => terms,
            expr => vec![expr],
        }
    }

    /// Consumes the expression, returning its factors.
    pub fn into_factors(self) -> Vec<Expr> {
        match self {
            Self::Mul(factors) => factors,
            expr => vec![expr],
        }
    }

    /// Splits the expression into its base and exponent. Anything that is not a power is its own
    /// base, raised to the power of `1`.
    pub fn as_base_exp(&self) -> (&Expr, Expr) {
        match self {
            Self::Exp(base, exp) => (base, (**exp).clone()),
            expr => (expr, Self::num(1)),
        }
    }

    /// Splits the expression into a numeric coefficient and the remaining factors.
    ///
    /// `3x^2` splits into `(3, x^2)`, a plain number `n` into `(n, 1)`, and anything without a
    /// numeric factor into `(1, expr)`.
    pub fn split_coefficient(&self) -> (Rational, Expr) {
        match self {
            Self::Primary(Primary::Number(n)) => (n.clone(), Self::num(1)),
            Self::Mul(factors) => {
                let mut coeff = rational(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.as_number() {
                        Some(n) => coeff *= n,
                        None => rest.push(factor.clone()),
                    }
                }
                (coeff, Self::Mul(rest).downgrade())
            },
            expr => (rational(1), expr.clone()),
        }
    }

    /// Returns true if the expression has a negative numeric coefficient, such as `-2x` or `-3`.
    pub fn has_negative_coefficient(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(n)) => n.cmp0().is_lt(),
            Self::Mul(factors) => factors
                .iter()
                .filter_map(Expr::as_number)
                .fold(rational(1), |acc, n| acc * n)
                .cmp0()
                .is_lt(),
            _ => false,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::num(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::num(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the symbol `name` occurs anywhere in the expression.
    pub fn contains(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns the names of all symbols in the expression, except for named constants.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(Expr::as_symbol)
            .filter(|sym| *sym != PI_SYMBOL)
            .map(str::to_owned)
            .collect()
    }

    /// Applies `f` to every direct child of this expression, rebuilding a node of the same kind.
    pub fn map_children(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Self::Primary(Primary::Call(func, arg)) => Self::call(*func, f(&**arg)),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(f).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(f).collect()),
            Self::Exp(base, exp) => Self::Exp(Box::new(f(&**base)), Box::new(f(&**exp))),
        }
    }

    /// Replaces every occurrence of the symbol `name` with `with`. No simplification is done.
    pub fn replace_variable(&self, name: &str, with: &Expr) -> Expr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => with.clone(),
            expr => expr.map_children(|child| child.replace_variable(name, with)),
        }
    }

    /// Replaces every subexpression strictly equal to `target` with `with`. No simplification is
    /// done.
    pub fn replace_subexpr(&self, target: &Expr, with: &Expr) -> Expr {
        if self == target {
            with.clone()
        } else {
            self.map_children(|child| child.replace_subexpr(target, with))
        }
    }
}

impl From<Rational> for Expr {
    fn from(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }
}

impl From<Integer> for Expr {
    fn from(n: Integer) -> Self {
        Self::Primary(Primary::Number(rational(n)))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::Primary(Primary::Number(rational(int(n))))
    }
}

/// Adds two expressions, flattening nested sums. No simplification is done.
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = self.into_terms();
        terms.extend(rhs.into_terms());
        Expr::Add(terms)
    }
}

/// Subtracts two expressions, as `self + (-rhs)`.
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

/// Multiplies two expressions, flattening nested products. No simplification is done.
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut factors = self.into_factors();
        factors.extend(rhs.into_factors());
        Expr::Mul(factors)
    }
}

/// Divides two expressions, as `self * rhs^-1`.
impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// Negates the expression. Numbers and numeric coefficients are negated in place; anything else is
/// multiplied by `-1`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::Primary(Primary::Number(-n)),
            Self::Mul(mut factors) => {
                match factors.iter().position(Expr::is_number) {
                    Some(i) => {
                        if let Self::Primary(Primary::Number(n)) = &mut factors[i] {
                            *n = -n.clone();
                        }
                    },
                    None => factors.insert(0, Self::num(-1)),
                }
                Self::Mul(factors)
            },
            expr => Self::Mul(vec![Self::num(-1), expr]),
        }
    }
}
