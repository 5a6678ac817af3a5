use crate::js::{self, helpers};
use crate::range::Range;
use crate::shoal::{BinaryOp, Decl, Expr, SourceFile, UnaryOp};

use super::error::CodegenError;
use super::ops;

// Lowers the Shoal IR to the JavaScript AST in a single structural
// recursion. Operators resolve in two tiers: the direct tables in `ops`
// first, then synthesized fragments for the set vocabulary JavaScript
// lacks. The first unsupported construct aborts the unit.

/// Translates a whole source file. The returned `Base` statement holds one
/// statement per declaration, in declaration order.
pub fn translate_file(file: &SourceFile) -> Result<js::Stmt, CodegenError> {
    let statements = file
        .decls
        .iter()
        .map(translate_decl)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(js::Stmt::Base { statements })
}

/// Translates one top-level declaration.
pub fn translate_decl(decl: &Decl) -> Result<js::Stmt, CodegenError> {
    match decl {
        Decl::Import { range, .. } => Err(CodegenError::UnsupportedImport { range: *range }),
        Decl::Const { name, value, .. } => Ok(js::Stmt::Const {
            name: name.clone(),
            value: translate_expr(value)?,
        }),
        Decl::Type { name, range, .. } => Err(CodegenError::UnsupportedTypeDecl {
            name: name.clone(),
            range: *range,
        }),
        // Bodies and parameters are not lowered; functions emit a named stub.
        Decl::Fun { name, .. } => Ok(js::Stmt::Function { name: name.clone() }),
    }
}

/// Translates one expression tree.
pub fn translate_expr(expr: &Expr) -> Result<js::Expr, CodegenError> {
    match expr {
        // Local variables and module constants both collapse to a plain
        // name reference; the distinction carries no meaning in the target.
        Expr::Variable { name, .. } | Expr::NamedConst { name, .. } => Ok(js::Expr::Variable {
            name: name.clone(),
        }),
        Expr::Const { value, .. } => Ok(js::Expr::Literal {
            text: value.to_string(),
        }),
        Expr::TypeConst { range, .. } => {
            Err(CodegenError::UnsupportedTypeConst { range: *range })
        }
        Expr::Binary { op, lhs, rhs, range } => translate_binary(*op, lhs, rhs, *range),
        Expr::Unary { op, operand, .. } => translate_unary(*op, operand),
        Expr::ListAccess { src, index, .. } => Ok(js::Expr::Access {
            target: Box::new(translate_expr(src)?),
            key: js::AccessKey::Index(Box::new(translate_expr(index)?)),
        }),
        Expr::RecordAccess { src, field, .. } => Ok(js::Expr::Access {
            target: Box::new(translate_expr(src)?),
            key: js::AccessKey::Field(field.clone()),
        }),
        Expr::Invoke {
            receiver,
            name,
            args,
            ..
        } => {
            let callee = match receiver {
                Some(receiver) => js::Expr::Access {
                    target: Box::new(translate_expr(receiver)?),
                    key: js::AccessKey::Field(name.clone()),
                },
                None => js::Expr::Variable { name: name.clone() },
            };
            let args = args
                .iter()
                .map(translate_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(js::Expr::Invoke {
                callee: Box::new(callee),
                args,
            })
        }
        Expr::Nary { range, .. } => Err(CodegenError::UnsupportedExpr {
            kind: "n-ary operator expression",
            range: *range,
        }),
        Expr::Comprehension { range, .. } => Err(CodegenError::UnsupportedExpr {
            kind: "comprehension expression",
            range: *range,
        }),
        Expr::DictionaryGen { range, .. } => Err(CodegenError::UnsupportedExpr {
            kind: "dictionary constructor",
            range: *range,
        }),
        Expr::RecordGen { range, .. } => Err(CodegenError::UnsupportedExpr {
            kind: "record constructor",
            range: *range,
        }),
        Expr::TupleGen { range, .. } => Err(CodegenError::UnsupportedExpr {
            kind: "tuple constructor",
            range: *range,
        }),
    }
}

fn translate_binary(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    range: Range,
) -> Result<js::Expr, CodegenError> {
    // Both operands translate before the operator resolves, so an
    // unsupported operand reports ahead of an unsupported operator.
    let lhs = translate_expr(lhs)?;
    let rhs = translate_expr(rhs)?;

    if let Some(mapped) = ops::binary(op) {
        return Ok(js::Expr::Binary {
            op: mapped,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        });
    }

    match op {
        // Sequence concatenation. Duplicates survive, so this is union on
        // ordered sequences rather than true set union.
        BinaryOp::Union => Ok(js::Expr::Invoke {
            callee: Box::new(js::Expr::Access {
                target: Box::new(lhs),
                key: js::AccessKey::Field("concat".to_string()),
            }),
            args: vec![rhs],
        }),
        BinaryOp::Intersection => Ok(helpers::intersect(lhs, rhs)),
        BinaryOp::ElementOf => Ok(helpers::element_of(lhs, rhs)),
        BinaryOp::Subset => Ok(helpers::subset(lhs, rhs, false)),
        BinaryOp::SubsetEq => Ok(helpers::subset(lhs, rhs, true)),
        BinaryOp::ListRange | BinaryOp::TypeImplies => {
            Err(CodegenError::UnsupportedBinaryOp { op, range })
        }
        BinaryOp::And
        | BinaryOp::Or
        | BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Eq
        | BinaryOp::Neq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::TypeEq => {
            unreachable!("{} is resolved by the direct operator table", op)
        }
    }
}

fn translate_unary(op: UnaryOp, operand: &Expr) -> Result<js::Expr, CodegenError> {
    let operand = translate_expr(operand)?;

    if let Some(mapped) = ops::unary(op) {
        return Ok(js::Expr::Unary {
            op: mapped,
            operand: Box::new(operand),
        });
    }

    match op {
        // Length and cardinality are a property read, not a call.
        UnaryOp::LengthOf => Ok(js::Expr::Access {
            target: Box::new(operand),
            key: js::AccessKey::Field("length".to_string()),
        }),
        UnaryOp::Not | UnaryOp::Neg => {
            unreachable!("resolved by the direct operator table")
        }
    }
}
