use std::fmt::{self, Display};

use pretty::BoxDoc;

use crate::range::{Range, Ranged};

use super::ty::Type;
use super::value::Value;

// This module contains the Shoal IR handed to the backend by the front end.
//
// The structure is:
// * SourceFile -> Decl -> Expr
//
// Nodes are produced once by the front end and are read-only from the
// backend's point of view; every node carries the source range the front
// end recorded for it.

/// One fully parsed, fully typed Shoal source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Source file identifier used in diagnostics (e.g. sets.shoal)
    pub path: String,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    /// An import of another module, e.g. import shoal.collections
    Import { path: Vec<String>, range: Range },

    /// A named constant, e.g. const LIMIT = 10
    Const {
        name: String,
        value: Expr,
        range: Range,
    },

    /// A structural type declaration, e.g. type Point = {int x, int y}
    Type {
        name: String,
        ty: Type,
        range: Range,
    },

    /// A function declaration.
    ///
    /// The front end hands over the full signature and body; this backend
    /// lowers only the name (body lowering is not implemented).
    Fun {
        name: String,
        params: Vec<(String, Type)>,
        ret: Type,
        body: Vec<Stmt>,
        range: Range,
    },
}

impl Decl {
    pub fn range(&self) -> Range {
        match self {
            Decl::Import { range, .. }
            | Decl::Const { range, .. }
            | Decl::Type { range, .. }
            | Decl::Fun { range, .. } => *range,
        }
    }
}

impl Ranged for Decl {
    fn range(&self) -> Range {
        self.range()
    }
}

/// A function-body statement.
///
/// Bodies ride along in the IR because the front end produces them, but no
/// statement is ever lowered by this backend; function declarations emit a
/// named stub only.
#[derive(Debug, Clone)]
pub enum Stmt {
    Return {
        value: Option<Expr>,
        range: Range,
    },
    Assign {
        lhs: Expr,
        rhs: Expr,
        range: Range,
    },
}

/// A Shoal expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A local variable or parameter reference, e.g. xs
    Variable { name: String, range: Range },

    /// A reference to a module-level named constant, e.g. LIMIT
    NamedConst { name: String, range: Range },

    /// A literal constant, e.g. 5 or "sea"
    Const { value: Value, range: Range },

    /// A type used in expression position, e.g. the rhs of a type test
    TypeConst { ty: Type, range: Range },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        range: Range,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        range: Range,
    },

    /// Indexing into a list, e.g. xs[i]
    ListAccess {
        src: Box<Expr>,
        index: Box<Expr>,
        range: Range,
    },

    /// Selecting a record field, e.g. p.x
    RecordAccess {
        src: Box<Expr>,
        field: String,
        range: Range,
    },

    /// A direct or receiver call, e.g. f(x) or xs.map(f)
    Invoke {
        receiver: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
        range: Range,
    },

    // The remaining variants are produced by the front end but have no
    // JavaScript lowering; translating one is a hard failure.
    Nary {
        op: NaryOp,
        args: Vec<Expr>,
        range: Range,
    },

    Comprehension {
        kind: ComprehensionKind,
        binding: String,
        source: Box<Expr>,
        body: Box<Expr>,
        range: Range,
    },

    DictionaryGen {
        pairs: Vec<(Expr, Expr)>,
        range: Range,
    },

    RecordGen {
        fields: Vec<(String, Expr)>,
        range: Range,
    },

    TupleGen { items: Vec<Expr>, range: Range },
}

impl Expr {
    pub fn range(&self) -> Range {
        match self {
            Expr::Variable { range, .. }
            | Expr::NamedConst { range, .. }
            | Expr::Const { range, .. }
            | Expr::TypeConst { range, .. }
            | Expr::Binary { range, .. }
            | Expr::Unary { range, .. }
            | Expr::ListAccess { range, .. }
            | Expr::RecordAccess { range, .. }
            | Expr::Invoke { range, .. }
            | Expr::Nary { range, .. }
            | Expr::Comprehension { range, .. }
            | Expr::DictionaryGen { range, .. }
            | Expr::RecordGen { range, .. }
            | Expr::TupleGen { range, .. } => *range,
        }
    }
}

impl Ranged for Expr {
    fn range(&self) -> Range {
        self.range()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// Runtime type test, e.g. x is int
    TypeEq,
    Union,
    Intersection,
    ElementOf,
    Subset,
    SubsetEq,
    /// Sublist range, e.g. xs[1..n]; not lowered by this backend
    ListRange,
    /// Type-level implication; not lowered by this backend
    TypeImplies,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::TypeEq => "is",
            BinaryOp::Union => "∪",
            BinaryOp::Intersection => "∩",
            BinaryOp::ElementOf => "∈",
            BinaryOp::Subset => "⊂",
            BinaryOp::SubsetEq => "⊆",
            BinaryOp::ListRange => "..",
            BinaryOp::TypeImplies => "~>",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    /// Length of a list or cardinality of a set, written |xs|
    LengthOf,
}

/// Operators taking a variable number of operands; none are lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaryOp {
    SubList,
    ListGen,
    SetGen,
}

impl Display for NaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NaryOp::SubList => "sublist",
            NaryOp::ListGen => "listgen",
            NaryOp::SetGen => "setgen",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComprehensionKind {
    Set,
    List,
    /// Existential quantifier, e.g. some {x > 0 | x ∈ xs}
    Any,
    /// Universal quantifier, e.g. all {x > 0 | x ∈ xs}
    All,
}

impl<'a> SourceFile {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        BoxDoc::intersperse(
            self.decls.iter().map(|decl| decl.to_doc()),
            BoxDoc::hardline(),
        )
    }
}

impl Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(60))
    }
}

impl<'a> Decl {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Decl::Import { path, .. } => BoxDoc::text("import ").append(BoxDoc::intersperse(
                path.iter().map(|part| BoxDoc::text(part.as_str())),
                BoxDoc::text("."),
            )),
            Decl::Const { name, value, .. } => BoxDoc::text("const ")
                .append(BoxDoc::text(name.as_str()))
                .append(BoxDoc::text(" = "))
                .append(value.to_doc()),
            Decl::Type { name, ty, .. } => BoxDoc::text("type ")
                .append(BoxDoc::text(name.as_str()))
                .append(BoxDoc::text(" = "))
                .append(ty.to_doc()),
            Decl::Fun {
                name,
                params,
                ret,
                body,
                ..
            } => BoxDoc::text("fun ")
                .append(BoxDoc::text(name.as_str()))
                .append(BoxDoc::text("("))
                .append(BoxDoc::intersperse(
                    params.iter().map(|(param, ty)| {
                        ty.to_doc()
                            .append(BoxDoc::text(" "))
                            .append(BoxDoc::text(param.as_str()))
                    }),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text(") -> "))
                .append(ret.to_doc())
                .append(BoxDoc::text(" {"))
                .append(if body.is_empty() {
                    BoxDoc::nil()
                } else {
                    BoxDoc::line()
                        .append(BoxDoc::intersperse(
                            body.iter().map(|stmt| stmt.to_doc()),
                            BoxDoc::line(),
                        ))
                        .nest(2)
                        .append(BoxDoc::line())
                })
                .append(BoxDoc::text("}")),
        }
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(60))
    }
}

impl<'a> Stmt {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Stmt::Return { value: None, .. } => BoxDoc::text("return"),
            Stmt::Return {
                value: Some(value), ..
            } => BoxDoc::text("return ").append(value.to_doc()),
            Stmt::Assign { lhs, rhs, .. } => lhs
                .to_doc()
                .append(BoxDoc::text(" = "))
                .append(rhs.to_doc()),
        }
    }
}

impl<'a> Expr {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Expr::Variable { name, .. } | Expr::NamedConst { name, .. } => {
                BoxDoc::text(name.as_str())
            }
            Expr::Const { value, .. } => BoxDoc::text(value.to_string()),
            Expr::TypeConst { ty, .. } => ty.to_doc(),
            Expr::Binary { op, lhs, rhs, .. } => BoxDoc::nil()
                .append(BoxDoc::text("("))
                .append(lhs.to_doc())
                .append(BoxDoc::text(format!(" {} ", op)))
                .append(rhs.to_doc())
                .append(BoxDoc::text(")")),
            Expr::Unary {
                op: UnaryOp::LengthOf,
                operand,
                ..
            } => BoxDoc::nil()
                .append(BoxDoc::text("|"))
                .append(operand.to_doc())
                .append(BoxDoc::text("|")),
            Expr::Unary { op, operand, .. } => BoxDoc::nil()
                .append(BoxDoc::text("("))
                .append(BoxDoc::text(match op {
                    UnaryOp::Not => "!",
                    UnaryOp::Neg => "-",
                    UnaryOp::LengthOf => unreachable!(),
                }))
                .append(operand.to_doc())
                .append(BoxDoc::text(")")),
            Expr::ListAccess { src, index, .. } => src
                .to_doc()
                .append(BoxDoc::text("["))
                .append(index.to_doc())
                .append(BoxDoc::text("]")),
            Expr::RecordAccess { src, field, .. } => src
                .to_doc()
                .append(BoxDoc::text("."))
                .append(BoxDoc::text(field.as_str())),
            Expr::Invoke {
                receiver,
                name,
                args,
                ..
            } => {
                let callee = match receiver {
                    Some(receiver) => receiver
                        .to_doc()
                        .append(BoxDoc::text("."))
                        .append(BoxDoc::text(name.as_str())),
                    None => BoxDoc::text(name.as_str()),
                };
                callee
                    .append(BoxDoc::text("("))
                    .append(BoxDoc::intersperse(
                        args.iter().map(|arg| arg.to_doc()),
                        BoxDoc::text(", "),
                    ))
                    .append(BoxDoc::text(")"))
            }
            Expr::Nary { op, args, .. } => BoxDoc::text(op.to_string())
                .append(BoxDoc::text("("))
                .append(BoxDoc::intersperse(
                    args.iter().map(|arg| arg.to_doc()),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text(")")),
            Expr::Comprehension {
                kind,
                binding,
                source,
                body,
                ..
            } => {
                let (open, close) = match kind {
                    ComprehensionKind::Set => ("{", "}"),
                    ComprehensionKind::List => ("[", "]"),
                    ComprehensionKind::Any => ("some {", "}"),
                    ComprehensionKind::All => ("all {", "}"),
                };
                BoxDoc::text(open)
                    .append(body.to_doc())
                    .append(BoxDoc::text(" | "))
                    .append(BoxDoc::text(binding.as_str()))
                    .append(BoxDoc::text(" ∈ "))
                    .append(source.to_doc())
                    .append(BoxDoc::text(close))
            }
            Expr::DictionaryGen { pairs, .. } => BoxDoc::text("{")
                .append(BoxDoc::intersperse(
                    pairs.iter().map(|(key, value)| {
                        key.to_doc()
                            .append(BoxDoc::text(" => "))
                            .append(value.to_doc())
                    }),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text("}")),
            Expr::RecordGen { fields, .. } => BoxDoc::text("{")
                .append(BoxDoc::intersperse(
                    fields.iter().map(|(field, value)| {
                        BoxDoc::text(field.as_str())
                            .append(BoxDoc::text(": "))
                            .append(value.to_doc())
                    }),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text("}")),
            Expr::TupleGen { items, .. } => BoxDoc::text("(")
                .append(BoxDoc::intersperse(
                    items.iter().map(|item| item.to_doc()),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text(")")),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(60))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::AstBuilder;
    use super::*;

    #[test]
    fn test_expr_rendering() {
        let t = AstBuilder::new();
        let expr = t.binary(
            BinaryOp::Union,
            t.var("xs"),
            t.binary(BinaryOp::Intersection, t.var("ys"), t.var("zs")),
        );
        assert_eq!(expr.to_string(), "(xs ∪ (ys ∩ zs))");
    }

    #[test]
    fn test_access_rendering() {
        let t = AstBuilder::new();
        let expr = t.list_access(t.record_access(t.var("p"), "points"), t.int(0));
        assert_eq!(expr.to_string(), "p.points[0]");
    }

    #[test]
    fn test_invoke_rendering() {
        let t = AstBuilder::new();
        assert_eq!(
            t.invoke(None, "max", vec![t.var("a"), t.var("b")]).to_string(),
            "max(a, b)"
        );
        assert_eq!(
            t.invoke(Some(t.var("xs")), "reverse", vec![]).to_string(),
            "xs.reverse()"
        );
    }

    #[test]
    fn test_lengthof_rendering() {
        let t = AstBuilder::new();
        let expr = t.unary(UnaryOp::LengthOf, t.var("xs"));
        assert_eq!(expr.to_string(), "|xs|");
    }

    #[test]
    fn test_decl_rendering() {
        let t = AstBuilder::new();
        let file = SourceFile {
            path: "geometry.shoal".to_string(),
            decls: vec![
                t.const_decl("ORIGIN", t.int(0)),
                t.fun_decl(
                    "dist",
                    vec![("p", Type::Named("Point".to_string()))],
                    Type::Real,
                    vec![],
                ),
            ],
        };
        assert_eq!(
            file.to_string(),
            "const ORIGIN = 0\nfun dist(Point p) -> real {}"
        );
    }

    #[test]
    fn test_fun_body_rendering() {
        let t = AstBuilder::new();
        let file = t.file(
            "acc.shoal",
            vec![
                t.fun_decl(
                    "accumulate",
                    vec![("x", Type::Int)],
                    Type::Int,
                    vec![
                        t.assign(
                            t.var("total"),
                            t.binary(BinaryOp::Add, t.var("total"), t.var("x")),
                        ),
                        t.ret(Some(t.var("total"))),
                    ],
                ),
                t.fun_decl("reset", vec![], Type::Bool, vec![t.ret(None)]),
            ],
        );
        assert_eq!(
            file.to_string(),
            "fun accumulate(int x) -> int {\n  total = (total + x)\n  return total\n}\nfun reset() -> bool {\n  return\n}"
        );
    }

    #[test]
    fn test_expr_range_is_its_own() {
        let t = AstBuilder::new();
        let lhs = t.var("a");
        let lhs_range = lhs.range();
        let expr = t.binary(BinaryOp::Add, lhs, t.var("b"));
        assert!(expr.range().start <= lhs_range.start);
        assert!(expr.range().end > lhs_range.end);
    }
}
