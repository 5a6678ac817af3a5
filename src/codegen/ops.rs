use crate::js;
use crate::shoal::{BinaryOp, UnaryOp};

// Direct operator tables, the first tier of operator resolution. A miss
// means the operator either needs a synthesized fragment or has no
// JavaScript translation at all; that decision belongs to the builder.

/// Source operators with a 1:1 JavaScript operator.
///
/// Equality maps to the strict forms; equality operands are always equally
/// typed in the source, so no coercing comparison is ever wanted.
pub fn binary(op: BinaryOp) -> Option<js::BinOp> {
    match op {
        BinaryOp::And => Some(js::BinOp::And),
        BinaryOp::Or => Some(js::BinOp::Or),
        BinaryOp::Add => Some(js::BinOp::Add),
        BinaryOp::Sub => Some(js::BinOp::Sub),
        BinaryOp::Mul => Some(js::BinOp::Mul),
        BinaryOp::Div => Some(js::BinOp::Div),
        BinaryOp::Eq => Some(js::BinOp::StrictEq),
        BinaryOp::Neq => Some(js::BinOp::StrictNeq),
        BinaryOp::Lt => Some(js::BinOp::Lt),
        BinaryOp::LtEq => Some(js::BinOp::LtEq),
        BinaryOp::Gt => Some(js::BinOp::Gt),
        BinaryOp::GtEq => Some(js::BinOp::GtEq),
        BinaryOp::TypeEq => Some(js::BinOp::InstanceOf),
        BinaryOp::Union
        | BinaryOp::Intersection
        | BinaryOp::ElementOf
        | BinaryOp::Subset
        | BinaryOp::SubsetEq
        | BinaryOp::ListRange
        | BinaryOp::TypeImplies => None,
    }
}

pub fn unary(op: UnaryOp) -> Option<js::UnOp> {
    match op {
        UnaryOp::Not => Some(js::UnOp::Not),
        UnaryOp::Neg => Some(js::UnOp::Neg),
        UnaryOp::LengthOf => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_table() {
        let direct = [
            (BinaryOp::And, js::BinOp::And),
            (BinaryOp::Or, js::BinOp::Or),
            (BinaryOp::Add, js::BinOp::Add),
            (BinaryOp::Sub, js::BinOp::Sub),
            (BinaryOp::Mul, js::BinOp::Mul),
            (BinaryOp::Div, js::BinOp::Div),
            (BinaryOp::Eq, js::BinOp::StrictEq),
            (BinaryOp::Neq, js::BinOp::StrictNeq),
            (BinaryOp::Lt, js::BinOp::Lt),
            (BinaryOp::LtEq, js::BinOp::LtEq),
            (BinaryOp::Gt, js::BinOp::Gt),
            (BinaryOp::GtEq, js::BinOp::GtEq),
            (BinaryOp::TypeEq, js::BinOp::InstanceOf),
        ];
        for (op, expected) in direct {
            assert_eq!(binary(op), Some(expected), "{op:?}");
        }

        let fallthrough = [
            BinaryOp::Union,
            BinaryOp::Intersection,
            BinaryOp::ElementOf,
            BinaryOp::Subset,
            BinaryOp::SubsetEq,
            BinaryOp::ListRange,
            BinaryOp::TypeImplies,
        ];
        for op in fallthrough {
            assert_eq!(binary(op), None, "{op:?}");
        }
    }

    #[test]
    fn test_unary_table() {
        assert_eq!(unary(UnaryOp::Not), Some(js::UnOp::Not));
        assert_eq!(unary(UnaryOp::Neg), Some(js::UnOp::Neg));
        assert_eq!(unary(UnaryOp::LengthOf), None);
    }
}
