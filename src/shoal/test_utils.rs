use std::cell::RefCell;

use crate::range::{Position, Range};

use super::ast::{BinaryOp, ComprehensionKind, Decl, Expr, NaryOp, SourceFile, Stmt, UnaryOp};
use super::ty::Type;
use super::value::Value;

/// Builds Shoal IR fragments for tests.
///
/// Every node gets a fresh synthetic range, laid out left to right on a
/// single line; composite nodes span their children. Ranges are therefore
/// distinct per leaf and positionally consistent, which is what the
/// diagnostics tests rely on.
pub struct AstBuilder {
    next_column: RefCell<usize>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self {
            next_column: RefCell::new(1),
        }
    }

    fn next_range(&self, width: usize) -> Range {
        let width = width.max(1);
        let start = *self.next_column.borrow();
        *self.next_column.borrow_mut() = start + width + 1;
        Position::new(1, start).to(Position::new(1, start + width))
    }

    fn span_all(&self, ranges: impl IntoIterator<Item = Range>, width: usize) -> Range {
        let mut ranges = ranges.into_iter();
        match ranges.next() {
            Some(first) => ranges.fold(first, |acc, range| acc.spanning(range)),
            None => self.next_range(width),
        }
    }

    // Expression builders
    pub fn var(&self, name: &str) -> Expr {
        Expr::Variable {
            name: name.to_string(),
            range: self.next_range(name.len()),
        }
    }

    pub fn named_const(&self, name: &str) -> Expr {
        Expr::NamedConst {
            name: name.to_string(),
            range: self.next_range(name.len()),
        }
    }

    pub fn value(&self, value: Value) -> Expr {
        let width = value.to_string().chars().count();
        Expr::Const {
            value,
            range: self.next_range(width),
        }
    }

    pub fn bool(&self, b: bool) -> Expr {
        self.value(Value::Bool(b))
    }

    pub fn int(&self, n: i64) -> Expr {
        self.value(Value::Int(n))
    }

    pub fn real(&self, n: f64) -> Expr {
        self.value(Value::Real(n))
    }

    pub fn str(&self, s: &str) -> Expr {
        self.value(Value::Str(s.to_string()))
    }

    pub fn list(&self, items: Vec<Value>) -> Expr {
        self.value(Value::List(items))
    }

    pub fn set(&self, items: Vec<Value>) -> Expr {
        self.value(Value::Set(items))
    }

    pub fn type_const(&self, ty: Type) -> Expr {
        let width = ty.to_string().chars().count();
        Expr::TypeConst {
            ty,
            range: self.next_range(width),
        }
    }

    pub fn binary(&self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let range = lhs.range().spanning(rhs.range());
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            range,
        }
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        let range = operand.range();
        Expr::Unary {
            op,
            operand: Box::new(operand),
            range,
        }
    }

    pub fn list_access(&self, src: Expr, index: Expr) -> Expr {
        let range = src.range().spanning(index.range());
        Expr::ListAccess {
            src: Box::new(src),
            index: Box::new(index),
            range,
        }
    }

    pub fn record_access(&self, src: Expr, field: &str) -> Expr {
        let range = src.range();
        Expr::RecordAccess {
            src: Box::new(src),
            field: field.to_string(),
            range,
        }
    }

    pub fn invoke(&self, receiver: Option<Expr>, name: &str, args: Vec<Expr>) -> Expr {
        let child_ranges = receiver
            .iter()
            .map(|recv| recv.range())
            .chain(args.iter().map(|arg| arg.range()));
        let range = self.span_all(child_ranges.collect::<Vec<_>>(), name.len() + 2);
        Expr::Invoke {
            receiver: receiver.map(Box::new),
            name: name.to_string(),
            args,
            range,
        }
    }

    pub fn nary(&self, op: NaryOp, args: Vec<Expr>) -> Expr {
        let range = self.span_all(args.iter().map(|arg| arg.range()).collect::<Vec<_>>(), 4);
        Expr::Nary { op, args, range }
    }

    pub fn comprehension(
        &self,
        kind: ComprehensionKind,
        binding: &str,
        source: Expr,
        body: Expr,
    ) -> Expr {
        let range = source.range().spanning(body.range());
        Expr::Comprehension {
            kind,
            binding: binding.to_string(),
            source: Box::new(source),
            body: Box::new(body),
            range,
        }
    }

    pub fn dictionary_gen(&self, pairs: Vec<(Expr, Expr)>) -> Expr {
        let child_ranges = pairs
            .iter()
            .flat_map(|(key, value)| [key.range(), value.range()])
            .collect::<Vec<_>>();
        let range = self.span_all(child_ranges, 2);
        Expr::DictionaryGen { pairs, range }
    }

    pub fn record_gen(&self, fields: Vec<(&str, Expr)>) -> Expr {
        let child_ranges = fields
            .iter()
            .map(|(_, value)| value.range())
            .collect::<Vec<_>>();
        let range = self.span_all(child_ranges, 2);
        Expr::RecordGen {
            fields: fields
                .into_iter()
                .map(|(field, value)| (field.to_string(), value))
                .collect(),
            range,
        }
    }

    pub fn tuple_gen(&self, items: Vec<Expr>) -> Expr {
        let range = self.span_all(items.iter().map(|item| item.range()).collect::<Vec<_>>(), 2);
        Expr::TupleGen { items, range }
    }

    // Statement builders
    pub fn ret(&self, value: Option<Expr>) -> Stmt {
        let range = match &value {
            Some(value) => value.range(),
            None => self.next_range(6),
        };
        Stmt::Return { value, range }
    }

    pub fn assign(&self, lhs: Expr, rhs: Expr) -> Stmt {
        let range = lhs.range().spanning(rhs.range());
        Stmt::Assign { lhs, rhs, range }
    }

    // Declaration builders
    pub fn import_decl(&self, path: Vec<&str>) -> Decl {
        let width = "import ".len() + path.iter().map(|part| part.len() + 1).sum::<usize>();
        Decl::Import {
            path: path.into_iter().map(|part| part.to_string()).collect(),
            range: self.next_range(width),
        }
    }

    pub fn const_decl(&self, name: &str, value: Expr) -> Decl {
        let range = value.range();
        Decl::Const {
            name: name.to_string(),
            value,
            range,
        }
    }

    pub fn type_decl(&self, name: &str, ty: Type) -> Decl {
        let width = "type ".len() + name.len() + 3 + ty.to_string().chars().count();
        Decl::Type {
            name: name.to_string(),
            ty,
            range: self.next_range(width),
        }
    }

    pub fn fun_decl(
        &self,
        name: &str,
        params: Vec<(&str, Type)>,
        ret: Type,
        body: Vec<Stmt>,
    ) -> Decl {
        Decl::Fun {
            name: name.to_string(),
            params: params
                .into_iter()
                .map(|(param, ty)| (param.to_string(), ty))
                .collect(),
            ret,
            body,
            range: self.next_range(name.len() + 10),
        }
    }

    pub fn file(&self, path: &str, decls: Vec<Decl>) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            decls,
        }
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}
