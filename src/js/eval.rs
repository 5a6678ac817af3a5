use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;

use super::ast::{AccessKey, BinOp, Expr, UnOp};

// An evaluator for the JavaScript subset the backend emits.
//
// The point is semantic verification: tests run generated fragments against
// concrete values instead of asserting on tree shapes. Anything outside the
// emitted subset (instanceof, unknown methods, truthiness coercion) is an
// evaluation error, not a panic.

/// Runtime value for the evaluation of generated JavaScript.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Value>),
    Record(HashMap<String, Value>),
    /// An arrow function together with the bindings it closed over.
    Closure {
        params: Vec<String>,
        body: Expr,
        env: Vec<(String, Value)>,
    },
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }
}

/// Stack-based environment, innermost binding wins on lookup.
pub struct Env {
    stack: Vec<(String, Value)>,
}

impl Env {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, name: &str, value: Value) {
        self.stack.push((name.to_string(), value));
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.stack
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

pub fn evaluate(expr: &Expr, env: &Env) -> Result<Value> {
    match expr {
        Expr::Variable { name } => env
            .lookup(name)
            .cloned()
            .ok_or_else(|| anyhow!("undefined variable: {}", name)),
        Expr::Literal { text } => parse_literal(text),
        Expr::Access { target, key } => evaluate_access(target, key, env),
        Expr::Binary { op, lhs, rhs } => evaluate_binary(*op, lhs, rhs, env),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, env)?;
            match op {
                UnOp::Not => Ok(Value::Bool(!condition(value)?)),
                UnOp::Neg => match value {
                    Value::Num(n) => Ok(Value::Num(-n)),
                    other => Err(anyhow!("cannot negate {:?}", other)),
                },
            }
        }
        Expr::Invoke { callee, args } => evaluate_invoke(callee, args, env),
        Expr::Arrow { params, body } => Ok(Value::Closure {
            params: params.clone(),
            body: (**body).clone(),
            env: env.stack.clone(),
        }),
    }
}

fn evaluate_access(target: &Expr, key: &AccessKey, env: &Env) -> Result<Value> {
    let value = evaluate(target, env)?;
    match key {
        AccessKey::Field(field) => match (&value, field.as_str()) {
            (Value::Array(items), "length") => Ok(Value::Num(items.len() as f64)),
            (Value::Str(s), "length") => Ok(Value::Num(s.chars().count() as f64)),
            (Value::Record(fields), _) => fields
                .get(field)
                .cloned()
                .ok_or_else(|| anyhow!("no field {} on record", field)),
            _ => Err(anyhow!("cannot read property {} of {:?}", field, value)),
        },
        AccessKey::Index(index) => {
            let items = match value {
                Value::Array(items) => items,
                other => bail!("cannot index into {:?}", other),
            };
            let idx = evaluate(index, env)?
                .as_num()
                .ok_or_else(|| anyhow!("index must be a number"))?;
            if idx < 0.0 || idx.fract() != 0.0 {
                bail!("invalid index: {}", idx);
            }
            items
                .get(idx as usize)
                .cloned()
                .ok_or_else(|| anyhow!("index {} out of bounds", idx))
        }
    }
}

fn evaluate_binary(op: BinOp, lhs: &Expr, rhs: &Expr, env: &Env) -> Result<Value> {
    // && and || must not evaluate the right operand when the left decides
    match op {
        BinOp::And => {
            return if condition(evaluate(lhs, env)?)? {
                Ok(Value::Bool(condition(evaluate(rhs, env)?)?))
            } else {
                Ok(Value::Bool(false))
            };
        }
        BinOp::Or => {
            return if condition(evaluate(lhs, env)?)? {
                Ok(Value::Bool(true))
            } else {
                Ok(Value::Bool(condition(evaluate(rhs, env)?)?))
            };
        }
        BinOp::InstanceOf => bail!("instanceof is outside the evaluated subset"),
        _ => {}
    }

    let left = evaluate(lhs, env)?;
    let right = evaluate(rhs, env)?;
    match op {
        BinOp::Add => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            _ => Err(anyhow!("+ requires two numbers or two strings")),
        },
        BinOp::Sub => numeric(op, &left, &right).map(|(a, b)| Value::Num(a - b)),
        BinOp::Mul => numeric(op, &left, &right).map(|(a, b)| Value::Num(a * b)),
        BinOp::Div => numeric(op, &left, &right).map(|(a, b)| Value::Num(a / b)),
        BinOp::StrictEq => Ok(Value::Bool(strict_equals(&left, &right))),
        BinOp::StrictNeq => Ok(Value::Bool(!strict_equals(&left, &right))),
        BinOp::Lt => numeric(op, &left, &right).map(|(a, b)| Value::Bool(a < b)),
        BinOp::LtEq => numeric(op, &left, &right).map(|(a, b)| Value::Bool(a <= b)),
        BinOp::Gt => numeric(op, &left, &right).map(|(a, b)| Value::Bool(a > b)),
        BinOp::GtEq => numeric(op, &left, &right).map(|(a, b)| Value::Bool(a >= b)),
        BinOp::And | BinOp::Or | BinOp::InstanceOf => {
            unreachable!("handled before operand evaluation")
        }
    }
}

fn numeric(op: BinOp, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Num(a), Value::Num(b)) => Ok((*a, *b)),
        _ => Err(anyhow!("{} requires two numbers", op)),
    }
}

/// Strict equality. Arrays, records and closures compare by reference in
/// JavaScript, so two separately built ones are never equal here.
fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Num(a), Value::Num(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}

fn condition(value: Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| anyhow!("expected a boolean condition, got {:?}", value))
}

fn evaluate_invoke(callee: &Expr, args: &[Expr], env: &Env) -> Result<Value> {
    if let Expr::Access {
        target,
        key: AccessKey::Field(method),
    } = callee
    {
        let receiver = evaluate(target, env)?;
        return match receiver {
            Value::Array(items) => evaluate_array_method(&items, method, args, env),
            other => Err(anyhow!("cannot call method {} on {:?}", method, other)),
        };
    }

    let callee = evaluate(callee, env)?;
    let args = args
        .iter()
        .map(|arg| evaluate(arg, env))
        .collect::<Result<Vec<_>>>()?;
    apply(&callee, args)
}

fn evaluate_array_method(
    items: &[Value],
    method: &str,
    args: &[Expr],
    env: &Env,
) -> Result<Value> {
    match method {
        "includes" => {
            let needle = single_arg(method, args, env)?;
            Ok(Value::Bool(
                items.iter().any(|item| strict_equals(item, &needle)),
            ))
        }
        "concat" => {
            let tail = single_arg(method, args, env)?;
            match tail {
                Value::Array(tail) => {
                    Ok(Value::Array(items.iter().cloned().chain(tail).collect()))
                }
                other => Err(anyhow!("concat expects an array, got {:?}", other)),
            }
        }
        "filter" => {
            let predicate = single_arg(method, args, env)?;
            let mut kept = Vec::new();
            for item in items {
                if condition(apply(&predicate, vec![item.clone()])?)? {
                    kept.push(item.clone());
                }
            }
            Ok(Value::Array(kept))
        }
        "every" => {
            let predicate = single_arg(method, args, env)?;
            for item in items {
                if !condition(apply(&predicate, vec![item.clone()])?)? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        _ => Err(anyhow!("unknown array method: {}", method)),
    }
}

fn single_arg(method: &str, args: &[Expr], env: &Env) -> Result<Value> {
    match args {
        [arg] => evaluate(arg, env),
        _ => Err(anyhow!("{} takes exactly one argument", method)),
    }
}

fn apply(callee: &Value, args: Vec<Value>) -> Result<Value> {
    let Value::Closure { params, body, env } = callee else {
        return Err(anyhow!("{:?} is not callable", callee));
    };
    if params.len() != args.len() {
        bail!("expected {} arguments, got {}", params.len(), args.len());
    }
    let mut inner = Env { stack: env.clone() };
    for (param, arg) in params.iter().zip(args) {
        inner.push(param, arg);
    }
    evaluate(body, &inner)
}

fn parse_literal(text: &str) -> Result<Value> {
    let mut parser = LiteralParser { text, pos: 0 };
    let value = parser.parse_value()?;
    parser.skip_spaces();
    if parser.pos != text.len() {
        bail!("trailing characters in literal: {}", text);
    }
    Ok(value)
}

/// Parses the canonical literal text the backend emits: numbers, booleans,
/// double-quoted strings and bracketed arrays thereof.
struct LiteralParser<'a> {
    text: &'a str,
    pos: usize,
}

impl LiteralParser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.bump();
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_spaces();
        match self.peek() {
            Some('"') => self.parse_string(),
            Some('[') => self.parse_array(),
            Some('t') | Some('f') => self.parse_bool(),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number(),
            _ => bail!("unsupported literal: {}", self.text),
        }
    }

    fn parse_string(&mut self) -> Result<Value> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Value::Str(out)),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('"' | '\\')) => out.push(c),
                    _ => bail!("bad escape in literal: {}", self.text),
                },
                Some(c) => out.push(c),
                None => bail!("unterminated string literal: {}", self.text),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.bump();
        let mut items = Vec::new();
        self.skip_spaces();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_spaces();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::Array(items)),
                _ => bail!("malformed array literal: {}", self.text),
            }
        }
    }

    fn parse_bool(&mut self) -> Result<Value> {
        if self.text[self.pos..].starts_with("true") {
            self.pos += 4;
            Ok(Value::Bool(true))
        } else if self.text[self.pos..].starts_with("false") {
            self.pos += 5;
            Ok(Value::Bool(false))
        } else {
            bail!("unsupported literal: {}", self.text)
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        self.text[start..self.pos]
            .parse::<f64>()
            .map(Value::Num)
            .map_err(|_| anyhow!("malformed number in literal: {}", self.text))
    }
}
