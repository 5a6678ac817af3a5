pub mod ast;
pub mod eval;
pub mod helpers;

pub use ast::{AccessKey, BinOp, Expr, Stmt, UnOp};
