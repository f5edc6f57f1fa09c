//! Errors produced while parsing. The [`Error`] type itself is shared with the rest of the
//! workspace through [`cas_error`]; this module only adds the parser's [`kind`]s.

pub mod kind;

pub use cas_error::{Error, ErrorKind};
