pub mod ast;
pub mod test_utils;
pub mod ty;
pub mod value;

pub use ast::{BinaryOp, ComprehensionKind, Decl, Expr, NaryOp, SourceFile, Stmt, UnaryOp};
pub use ty::Type;
pub use value::Value;
