use super::ast::{AccessKey, BinOp, Expr};

// Set-operation fragments for constructs JavaScript has no operator for.
//
// Each function is a pure combinator over already-translated operand
// expressions; none of them inspect or re-translate their inputs. The
// fragments model sets as duplicate-free arrays.
//
// Arrow parameters use the reserved name `$elem`. `$` is not a valid
// identifier character in the source language, so a translated operand can
// never contain a variable of that name and the arrows capture nothing
// they should not.

pub const ELEM_PARAM: &str = "$elem";

fn elem_var() -> Expr {
    Expr::Variable {
        name: ELEM_PARAM.to_string(),
    }
}

fn field(target: Expr, name: &str) -> Expr {
    Expr::Access {
        target: Box::new(target),
        key: AccessKey::Field(name.to_string()),
    }
}

fn method(target: Expr, name: &str, args: Vec<Expr>) -> Expr {
    Expr::Invoke {
        callee: Box::new(field(target, name)),
        args,
    }
}

fn elem_arrow(body: Expr) -> Expr {
    Expr::Arrow {
        params: vec![ELEM_PARAM.to_string()],
        body: Box::new(body),
    }
}

/// Membership test: rhs.includes(lhs)
pub fn element_of(lhs: Expr, rhs: Expr) -> Expr {
    method(rhs, "includes", vec![lhs])
}

/// Set intersection: lhs.filter(($elem) => rhs.includes($elem))
pub fn intersect(lhs: Expr, rhs: Expr) -> Expr {
    method(
        lhs,
        "filter",
        vec![elem_arrow(method(rhs, "includes", vec![elem_var()]))],
    )
}

/// Subset test: lhs.every(($elem) => rhs.includes($elem))
///
/// The inclusive form accepts equal operands. The strict form additionally
/// requires the left side to be smaller, so a set never counts as a strict
/// subset of itself.
pub fn subset(lhs: Expr, rhs: Expr, inclusive: bool) -> Expr {
    let inclusion = method(
        lhs.clone(),
        "every",
        vec![elem_arrow(method(rhs.clone(), "includes", vec![elem_var()]))],
    );
    if inclusive {
        inclusion
    } else {
        Expr::Binary {
            op: BinOp::And,
            lhs: Box::new(inclusion),
            rhs: Box::new(Expr::Binary {
                op: BinOp::Lt,
                lhs: Box::new(field(lhs, "length")),
                rhs: Box::new(field(rhs, "length")),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::eval::{Env, Value, evaluate};
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Variable {
            name: name.to_string(),
        }
    }

    fn nums(ns: &[f64]) -> Value {
        Value::Array(ns.iter().map(|n| Value::Num(*n)).collect())
    }

    fn set_env() -> Env {
        let mut env = Env::new();
        env.push("small", nums(&[1.0, 2.0]));
        env.push("big", nums(&[1.0, 2.0, 3.0]));
        env.push("other", nums(&[2.0, 4.0]));
        env
    }

    #[test]
    fn test_element_of_shape() {
        let expr = element_of(var("x"), var("xs"));
        assert_eq!(expr.to_string(), "xs.includes(x)");
    }

    #[test]
    fn test_intersect_shape() {
        let expr = intersect(var("xs"), var("ys"));
        assert_eq!(
            expr.to_string(),
            "xs.filter(($elem) => ys.includes($elem))"
        );
    }

    #[test]
    fn test_subset_shapes() {
        assert_eq!(
            subset(var("xs"), var("ys"), true).to_string(),
            "xs.every(($elem) => ys.includes($elem))"
        );
        assert_eq!(
            subset(var("xs"), var("ys"), false).to_string(),
            "(xs.every(($elem) => ys.includes($elem)) && (xs.length < ys.length))"
        );
    }

    #[test]
    fn test_element_of_semantics() {
        let env = set_env();
        let hit = evaluate(
            &element_of(
                Expr::Literal {
                    text: "2".to_string(),
                },
                var("small"),
            ),
            &env,
        )
        .unwrap();
        assert_eq!(hit, Value::Bool(true));

        let miss = evaluate(
            &element_of(
                Expr::Literal {
                    text: "5".to_string(),
                },
                var("small"),
            ),
            &env,
        )
        .unwrap();
        assert_eq!(miss, Value::Bool(false));
    }

    #[test]
    fn test_intersect_semantics() {
        let env = set_env();
        let result = evaluate(&intersect(var("big"), var("other")), &env).unwrap();
        assert_eq!(result, nums(&[2.0]));
    }

    #[test]
    fn test_subset_forms_differ_only_at_equal_operands() {
        let env = set_env();

        // small ⊆ big and small ⊂ big
        for inclusive in [false, true] {
            let result = evaluate(&subset(var("small"), var("big"), inclusive), &env).unwrap();
            assert_eq!(result, Value::Bool(true), "inclusive={inclusive}");
        }

        // small ⊆ small holds, small ⊂ small does not
        let lax = evaluate(&subset(var("small"), var("small"), true), &env).unwrap();
        assert_eq!(lax, Value::Bool(true));
        let strict = evaluate(&subset(var("small"), var("small"), false), &env).unwrap();
        assert_eq!(strict, Value::Bool(false));

        // overlap without inclusion fails both ways
        for inclusive in [false, true] {
            let result = evaluate(&subset(var("other"), var("big"), inclusive), &env).unwrap();
            assert_eq!(result, Value::Bool(false), "inclusive={inclusive}");
        }
    }

    #[test]
    fn test_nested_fragments_shadow_the_element_parameter() {
        // big ∩ (big ∩ other): the inner fragment's $elem shadows the outer
        // one inside its own arrow body only.
        let env = set_env();
        let expr = intersect(var("big"), intersect(var("big"), var("other")));
        let result = evaluate(&expr, &env).unwrap();
        assert_eq!(result, nums(&[2.0]));
    }
}
