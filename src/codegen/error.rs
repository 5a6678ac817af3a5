use thiserror::Error;

use crate::range::{Range, Ranged};
use crate::shoal::BinaryOp;

/// A construct the backend cannot lower.
///
/// Translation is fail-fast: the first unsupported construct aborts the
/// whole unit and no partial output is produced. Every variant carries the
/// range of the offending node, not the start of the unit.
#[derive(Debug, Clone, Error)]
pub enum CodegenError {
    #[error("Cannot translate import declarations")]
    UnsupportedImport { range: Range },

    #[error("Cannot translate type declaration '{name}'")]
    UnsupportedTypeDecl { name: String, range: Range },

    #[error("Cannot translate a type used as an expression")]
    UnsupportedTypeConst { range: Range },

    #[error("Cannot translate {kind}")]
    UnsupportedExpr { kind: &'static str, range: Range },

    #[error("Cannot translate binary operator {op}")]
    UnsupportedBinaryOp { op: BinaryOp, range: Range },
}

impl CodegenError {
    /// Renders the diagnostic the driver prints for a failed unit.
    pub fn report(&self, path: &str) -> String {
        let position = self.range().start;
        format!(
            "error: {}\n  --> {} (line {}, col {})",
            self, path, position.line, position.column
        )
    }
}

impl Ranged for CodegenError {
    fn range(&self) -> Range {
        match self {
            CodegenError::UnsupportedImport { range }
            | CodegenError::UnsupportedTypeDecl { range, .. }
            | CodegenError::UnsupportedTypeConst { range }
            | CodegenError::UnsupportedExpr { range, .. }
            | CodegenError::UnsupportedBinaryOp { range, .. } => *range,
        }
    }
}
