pub mod op;

pub use op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
