//! Tokenizer and parser for the equations and expressions accepted by the solver.
//!
//! The grammar is small: real-valued expressions built from numbers, names, function calls,
//! `+ - * / ^` (with implicit multiplication, as in `5exp(x)` or `2x^2`), and equations of the form
//! `lhs = rhs`, optionally followed by `, var` to name the variable to solve for.
//!
//! ```
//! use cas_parser::parser::{ast::Equation, Parser};
//!
//! let eq = Parser::new("5exp(x^4 - 7) = 2, x").try_parse_full::<Equation>().unwrap();
//! assert_eq!(eq.to_string(), "5exp(x^4 - 7) = 2, x");
//! ```

pub mod parser;
pub mod tokenizer;
