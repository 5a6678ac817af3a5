//! JavaScript backend for the Shoal compiler.
//!
//! The front end hands this crate a typed [`shoal::SourceFile`]; the backend
//! rewrites it into a [`js::Stmt`] tree for the downstream printer, or fails
//! with a positioned [`codegen::CodegenError`] if the file uses a construct
//! with no JavaScript lowering.

pub mod codegen;
pub mod js;
pub mod range;
pub mod shoal;
