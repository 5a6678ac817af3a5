use std::fmt::{self, Display};

use pretty::BoxDoc;

// The JavaScript AST the backend emits.
//
// This is the contract with the downstream printer: trees are plain data,
// carry no source ranges, and render deterministically. Rendering is used
// by snapshot tests and debugging output; the production printer lives
// outside this crate.

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A whole compilation unit: the lowered statements in source order.
    Base { statements: Vec<Stmt> },

    /// A constant binding, e.g. const LIMIT = 10;
    Const { name: String, value: Expr },

    /// A named function stub, e.g. function dist() {}
    Function { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable { name: String },

    /// A literal in its final textual form, e.g. 5, "sea" or [1, 2].
    ///
    /// The text is emitted verbatim by the renderer; producers are
    /// responsible for quoting and escaping.
    Literal { text: String },

    /// A property or index access, e.g. xs.length or xs[0].
    Access { target: Box<Expr>, key: AccessKey },

    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Unary { op: UnOp, operand: Box<Expr> },

    /// A call, e.g. xs.includes(y). The callee is usually an Access.
    Invoke { callee: Box<Expr>, args: Vec<Expr> },

    /// An expression-bodied arrow function, e.g. ($elem) => xs.includes($elem).
    ///
    /// Arrows exist so that collection combinators can be expressed without
    /// statement syntax in expression position.
    Arrow {
        params: Vec<String>,
        body: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessKey {
    Field(String),
    Index(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    StrictEq,
    StrictNeq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    InstanceOf,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::StrictEq => "===",
            BinOp::StrictNeq => "!==",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::InstanceOf => "instanceof",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            UnOp::Not => "!",
            UnOp::Neg => "-",
        };
        f.write_str(symbol)
    }
}

impl<'a> Stmt {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Stmt::Base { statements } => BoxDoc::intersperse(
                statements.iter().map(|stmt| stmt.to_doc()),
                BoxDoc::hardline(),
            ),
            Stmt::Const { name, value } => BoxDoc::text("const ")
                .append(BoxDoc::text(name.as_str()))
                .append(BoxDoc::text(" = "))
                .append(value.to_doc())
                .append(BoxDoc::text(";")),
            Stmt::Function { name } => BoxDoc::text("function ")
                .append(BoxDoc::text(name.as_str()))
                .append(BoxDoc::text("() {}")),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(80))
    }
}

impl<'a> Expr {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Expr::Variable { name } => BoxDoc::text(name.as_str()),
            Expr::Literal { text } => BoxDoc::text(text.as_str()),
            Expr::Access { target, key } => match key {
                AccessKey::Field(field) => target
                    .to_doc()
                    .append(BoxDoc::text("."))
                    .append(BoxDoc::text(field.as_str())),
                AccessKey::Index(index) => target
                    .to_doc()
                    .append(BoxDoc::text("["))
                    .append(index.to_doc())
                    .append(BoxDoc::text("]")),
            },
            Expr::Binary { op, lhs, rhs } => BoxDoc::nil()
                .append(BoxDoc::text("("))
                .append(lhs.to_doc())
                .append(BoxDoc::text(format!(" {} ", op)))
                .append(rhs.to_doc())
                .append(BoxDoc::text(")")),
            Expr::Unary { op, operand } => BoxDoc::nil()
                .append(BoxDoc::text(op.to_string()))
                .append(BoxDoc::text("("))
                .append(operand.to_doc())
                .append(BoxDoc::text(")")),
            Expr::Invoke { callee, args } => callee
                .to_doc()
                .append(BoxDoc::text("("))
                .append(BoxDoc::intersperse(
                    args.iter().map(|arg| arg.to_doc()),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text(")")),
            Expr::Arrow { params, body } => BoxDoc::nil()
                .append(BoxDoc::text("("))
                .append(BoxDoc::intersperse(
                    params.iter().map(|param| BoxDoc::text(param.as_str())),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text(") => "))
                .append(body.to_doc()),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(80))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Variable {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_binary_rendering_parenthesizes() {
        let expr = Expr::Binary {
            op: BinOp::And,
            lhs: Box::new(Expr::Binary {
                op: BinOp::StrictEq,
                lhs: Box::new(var("x")),
                rhs: Box::new(Expr::Literal {
                    text: "1".to_string(),
                }),
            }),
            rhs: Box::new(var("ok")),
        };
        assert_eq!(expr.to_string(), "((x === 1) && ok)");
    }

    #[test]
    fn test_unary_rendering() {
        let expr = Expr::Unary {
            op: UnOp::Not,
            operand: Box::new(var("done")),
        };
        assert_eq!(expr.to_string(), "!(done)");
    }

    #[test]
    fn test_access_and_invoke_rendering() {
        let expr = Expr::Invoke {
            callee: Box::new(Expr::Access {
                target: Box::new(var("xs")),
                key: AccessKey::Field("includes".to_string()),
            }),
            args: vec![Expr::Literal {
                text: "2".to_string(),
            }],
        };
        assert_eq!(expr.to_string(), "xs.includes(2)");

        let indexed = Expr::Access {
            target: Box::new(var("xs")),
            key: AccessKey::Index(Box::new(Expr::Literal {
                text: "0".to_string(),
            })),
        };
        assert_eq!(indexed.to_string(), "xs[0]");
    }

    #[test]
    fn test_arrow_rendering() {
        let expr = Expr::Arrow {
            params: vec!["$elem".to_string()],
            body: Box::new(Expr::Invoke {
                callee: Box::new(Expr::Access {
                    target: Box::new(var("ys")),
                    key: AccessKey::Field("includes".to_string()),
                }),
                args: vec![var("$elem")],
            }),
        };
        assert_eq!(expr.to_string(), "($elem) => ys.includes($elem)");
    }

    #[test]
    fn test_statement_rendering() {
        let unit = Stmt::Base {
            statements: vec![
                Stmt::Const {
                    name: "LIMIT".to_string(),
                    value: Expr::Literal {
                        text: "10".to_string(),
                    },
                },
                Stmt::Function {
                    name: "dist".to_string(),
                },
            ],
        };
        assert_eq!(unit.to_string(), "const LIMIT = 10;\nfunction dist() {}");
    }
}
