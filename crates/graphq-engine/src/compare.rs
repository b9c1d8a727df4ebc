//! The shared comparison semantics used by `Where` conditions and edge
//! conditions on a traversal (§4.3.2, §4.3.4).

use graphq_ast::ComparisonOp;
use graphq_common::types::Value;

/// Applies `op` to an actual (resolved field) value against an expected
/// (literal) value, following the operator table in §4.3.4. A missing
/// `actual` behaves like [`Value::Null`] for every operator except the
/// string/membership operators, which require a concrete value and so are
/// `false`.
#[must_use]
pub fn apply_comparison(actual: Option<&Value>, op: ComparisonOp, expected: Option<&Value>) -> bool {
    match op {
        ComparisonOp::IsNull => actual.is_none_or(Value::is_null),
        ComparisonOp::IsNotNull => !actual.is_none_or(Value::is_null),
        ComparisonOp::Eq => values_equal(actual, expected),
        ComparisonOp::Neq => !values_equal(actual, expected),
        ComparisonOp::Gt | ComparisonOp::Gte | ComparisonOp::Lt | ComparisonOp::Lte => {
            let (Some(a), Some(b)) = (
                actual.and_then(Value::as_numeric),
                expected.and_then(Value::as_numeric),
            ) else {
                return false;
            };
            match op {
                ComparisonOp::Gt => a > b,
                ComparisonOp::Gte => a >= b,
                ComparisonOp::Lt => a < b,
                ComparisonOp::Lte => a <= b,
                _ => unreachable!(),
            }
        }
        ComparisonOp::In | ComparisonOp::NotIn => {
            let Some(Value::List(items)) = expected else {
                return false;
            };
            let is_member = actual.is_some_and(|a| items.iter().any(|item| item == a));
            if op == ComparisonOp::In { is_member } else { !is_member }
        }
        ComparisonOp::Contains | ComparisonOp::StartsWith | ComparisonOp::EndsWith => {
            let (Some(a), Some(b)) = (actual.and_then(Value::as_str), expected.and_then(Value::as_str))
            else {
                return false;
            };
            match op {
                ComparisonOp::Contains => a.contains(b),
                ComparisonOp::StartsWith => a.starts_with(b),
                ComparisonOp::EndsWith => a.ends_with(b),
                _ => unreachable!(),
            }
        }
    }
}

/// Strict scalar equality (§4.3.4: "strict equality on scalars"), treating
/// an absent field the same as an explicit [`Value::Null`].
fn values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    let normalize = |v: Option<&Value>| match v {
        None | Some(Value::Null) => None,
        Some(other) => Some(other),
    };
    match (normalize(a), normalize(b)) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_equals_explicit_null() {
        assert!(apply_comparison(None, ComparisonOp::Eq, Some(&Value::Null)));
    }

    #[test]
    fn gt_rejects_non_numeric_operands() {
        assert!(!apply_comparison(
            Some(&Value::String("5".into())),
            ComparisonOp::Gt,
            Some(&Value::Int(1))
        ));
    }

    #[test]
    fn gt_coerces_int_and_float() {
        assert!(apply_comparison(Some(&Value::Int(5)), ComparisonOp::Gt, Some(&Value::Float(3.0))));
    }

    #[test]
    fn not_in_is_true_for_absent_value() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert!(apply_comparison(None, ComparisonOp::NotIn, Some(&list)));
    }
}
