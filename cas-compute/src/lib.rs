//! The expression service used by the equation solver.
//!
//! This crate turns parsed input into exact symbolic expressions ([`symbolic::Expr`]) and
//! provides the operations the solver relies on: configurable simplification, semantic
//! comparison, sign predicates, symbolic differentiation, and high-precision numerical evaluation
//! ([`numerical`]).
//!
//! ```
//! use cas_compute::symbolic::{parse_expr, simplify};
//!
//! let expr = parse_expr("x + x + 2x").unwrap();
//! assert_eq!(simplify(&expr).to_string(), "4*x");
//! ```

pub mod consts;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
