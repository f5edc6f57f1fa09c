//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`Expr`] nodes. It's similar
//! to the [`cas_parser::parser::ast::Expr`] nodes produced by [`cas_parser`], with the main
//! difference being that [`Expr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`cas_parser::parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! If you have a [`cas_parser::parser::ast::Expr`], you can convert it to an [`Expr`] using the
//! [`TryFrom`] trait, or parse a string directly with [`parse_expr`]. Conversion fails only for
//! calls to unknown functions, or calls with the wrong number of arguments.
//!
//! ```
//! use cas_compute::symbolic::{parse_expr, Expr};
//!
//! let expr = parse_expr("x + (y + z)").unwrap();
//! assert_eq!(expr, Expr::Add(vec![Expr::sym("x"), Expr::sym("y"), Expr::sym("z")]));
//! ```
//!
//! # Simplification
//!
//! Expressions are reduced to a canonical form with the [`simplify()`] function. Simplification is
//! done by applying a set of simplification rules to the expression in multiple passes, until no
//! rule applies. Each rule is a function that accepts an expression and returns [`Option<Expr>`];
//! if the rule is applicable to the expression, the rule is applied and the result is returned.
//!
//! Which rules run is chosen with [`SimplifyOptions`]. For example, the equation solver prefers
//! factored forms, while equivalence checking expands products of sums.
//!
//! ```
//! use cas_compute::symbolic::{parse_expr, simplify, Expr};
//!
//! let simplified = simplify(&parse_expr("x + x + x").unwrap());
//! assert_eq!(simplified, Expr::num(3) * Expr::sym("x"));
//! ```
//!
//! For more information, see the [`mod@simplify`] module.

pub mod derivative;
pub mod expr;
pub mod sign;
pub mod simplify;

pub use derivative::{derivative, DerivativeError};
pub use expr::{parse_expr, ConvertError, Expr, Func, Parity, Primary};
pub use simplify::{
    equivalent,
    equivalent_with,
    simplify,
    simplify_with,
    simplify_with_steps,
    step::{Step, StepCollector},
    SimplifyOptions,
};
