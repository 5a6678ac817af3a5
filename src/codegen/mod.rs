mod builder;
mod error;
pub mod ops;

pub use builder::{translate_decl, translate_expr, translate_file};
pub use error::CodegenError;
