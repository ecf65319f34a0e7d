use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by grouping keys and deterministic
/// output ordering.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched or non-orderable variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Ordering comparator for predicate evaluation and sort keys: strict
/// same-variant comparison first, then numeric widening across
/// int/uint/float. `None` when the pair is not comparable.
#[must_use]
pub fn order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    if let Some(ordering) = strict_order_cmp(left, right) {
        return Some(ordering);
    }

    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Some(a.total_cmp(&b)),
        _ => None,
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_rank_first() {
        assert_eq!(canonical_cmp(&Value::Null, &Value::Int(-100)), Ordering::Less);
        assert_eq!(
            canonical_cmp(&Value::text("a"), &Value::Uint(9)),
            Ordering::Greater
        );
    }

    #[test]
    fn canonical_order_compares_lists_elementwise_then_by_length() {
        let short = Value::List(vec![Value::Int(1)]);
        let long = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(canonical_cmp(&short, &long), Ordering::Less);
        assert_eq!(canonical_cmp(&long, &long.clone()), Ordering::Equal);
    }

    #[test]
    fn strict_order_rejects_mixed_variants() {
        assert_eq!(strict_order_cmp(&Value::Int(1), &Value::Uint(1)), None);
        assert_eq!(strict_order_cmp(&Value::Null, &Value::Null), None);
        assert_eq!(
            strict_order_cmp(&Value::text("a"), &Value::text("b")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn order_cmp_widens_numeric_variants() {
        assert_eq!(order_cmp(&Value::Int(1), &Value::Uint(2)), Some(Ordering::Less));
        assert_eq!(
            order_cmp(&Value::Uint(3), &Value::from(3.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(order_cmp(&Value::Int(1), &Value::text("1")), None);
    }
}
