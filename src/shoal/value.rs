use std::fmt;

use itertools::Itertools as _;

/// A Shoal constant value, as carried by `Expr::Const`.
///
/// `Display` is the value's canonical textual representation. For `Bool`,
/// `Int`, `Real` and `Str` the canonical form is also valid JavaScript
/// literal syntax, which is what lets constant translation pass the text
/// through verbatim. The composite forms render Shoal syntax (`[..]` for
/// lists, `{..}` for sets); a set's canonical text is NOT a valid JavaScript
/// literal, and the backend does not re-validate it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<Value>),
    Set(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::List(elems) => {
                write!(f, "[{}]", elems.iter().map(|e| e.to_string()).join(", "))
            }
            Value::Set(elems) => {
                write!(f, "{{{}}}", elems.iter().map(|e| e.to_string()).join(", "))
            }
        }
    }
}

/// Escape a string for a double-quoted literal.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_canonical_text() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "\"hi\"");
    }

    #[test]
    fn test_string_escaping() {
        let value = Value::Str("line\n\"quoted\"\\".to_string());
        assert_eq!(value.to_string(), "\"line\\n\\\"quoted\\\"\\\\\"");
    }

    #[test]
    fn test_composite_rendering() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.to_string(), "[1, 2]");
        // Set syntax is Shoal's, not JavaScript's; see the type-level note.
        let set = Value::Set(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(set.to_string(), "{1, 2}");
    }
}
