use core::fmt;

use pretty::BoxDoc;

/// A structural Shoal type.
///
/// The backend never inspects types for translation decisions (the output
/// language is untyped); they appear only inside `type` declarations, type
/// constants and parameter lists, all of which surface in diagnostics and
/// debug rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    Int,
    Real,
    Str,
    List(Box<Type>),
    Set(Box<Type>),
    Record(Vec<(String, Type)>),
    Named(String),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(60))
    }
}

impl<'a> Type {
    pub fn to_doc(&'a self) -> BoxDoc<'a> {
        match self {
            Type::Bool => BoxDoc::text("bool"),
            Type::Int => BoxDoc::text("int"),
            Type::Real => BoxDoc::text("real"),
            Type::Str => BoxDoc::text("string"),
            Type::List(elem) => BoxDoc::nil()
                .append(BoxDoc::text("["))
                .append(elem.to_doc())
                .append(BoxDoc::text("]")),
            Type::Set(elem) => BoxDoc::nil()
                .append(BoxDoc::text("{"))
                .append(elem.to_doc())
                .append(BoxDoc::text("}")),
            Type::Record(fields) => BoxDoc::nil()
                .append(BoxDoc::text("{"))
                .append(BoxDoc::intersperse(
                    fields.iter().map(|(name, ty)| {
                        ty.to_doc()
                            .append(BoxDoc::text(" "))
                            .append(BoxDoc::text(name.as_str()))
                    }),
                    BoxDoc::text(", "),
                ))
                .append(BoxDoc::text("}")),
            Type::Named(name) => BoxDoc::text(name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_rendering() {
        assert_eq!(Type::Bool.to_string(), "bool");
        assert_eq!(Type::Str.to_string(), "string");
    }

    #[test]
    fn test_compound_rendering() {
        assert_eq!(Type::List(Box::new(Type::Int)).to_string(), "[int]");
        assert_eq!(Type::Set(Box::new(Type::Real)).to_string(), "{real}");
        assert_eq!(
            Type::Record(vec![
                ("x".to_string(), Type::Int),
                ("y".to_string(), Type::Int),
            ])
            .to_string(),
            "{int x, int y}"
        );
        assert_eq!(Type::Named("Point".to_string()).to_string(), "Point");
    }
}
