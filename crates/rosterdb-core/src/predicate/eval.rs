use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate},
    traits::FieldValues,
    value::{Value, order_cmp},
};
use std::cmp::Ordering;

/// Evaluate a predicate against one record's named field values.
///
/// Null semantics collapse SQL's three-valued logic to a boolean: any
/// comparison touching a null field value is false, including `Ne` (an
/// absent value does not "differ", it is absent). Only `IsNull` /
/// `IsNotNull` observe nullness directly.
#[must_use]
pub fn eval(predicate: &Predicate, record: &dyn FieldValues) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,
        Predicate::And(children) => children.iter().all(|child| eval(child, record)),
        Predicate::Or(children) => children.iter().any(|child| eval(child, record)),
        Predicate::Not(child) => !eval(child, record),
        Predicate::Compare(compare) => eval_compare(compare, record),
        Predicate::IsNull { field } => record.field_value(field).is_null(),
        Predicate::IsNotNull { field } => !record.field_value(field).is_null(),
    }
}

fn eval_compare(compare: &ComparePredicate, record: &dyn FieldValues) -> bool {
    let actual = record.field_value(&compare.field);

    match compare.op {
        CompareOp::In => eval_membership(&actual, &compare.value, true),
        CompareOp::NotIn => eval_membership(&actual, &compare.value, false),
        CompareOp::Contains | CompareOp::StartsWith => {
            eval_text(compare.op, &actual, &compare.value)
        }
        CompareOp::Eq | CompareOp::Ne | CompareOp::Lt | CompareOp::Lte | CompareOp::Gt
        | CompareOp::Gte => eval_ordering(compare.op, &actual, &compare.value),
    }
}

fn eval_ordering(op: CompareOp, actual: &Value, expected: &Value) -> bool {
    if actual.is_null() || expected.is_null() {
        return false;
    }

    let Some(ordering) = order_cmp(actual, expected) else {
        return false;
    };

    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
        CompareOp::In | CompareOp::NotIn | CompareOp::Contains | CompareOp::StartsWith => false,
    }
}

fn eval_membership(actual: &Value, candidates: &Value, positive: bool) -> bool {
    if actual.is_null() {
        return false;
    }

    let Value::List(candidates) = candidates else {
        return false;
    };

    let found = candidates
        .iter()
        .any(|candidate| order_cmp(actual, candidate) == Some(Ordering::Equal));

    found == positive
}

fn eval_text(op: CompareOp, actual: &Value, expected: &Value) -> bool {
    let (Value::Text(actual), Value::Text(expected)) = (actual, expected) else {
        return false;
    };

    match op {
        CompareOp::Contains => actual.contains(expected.as_str()),
        CompareOp::StartsWith => actual.starts_with(expected.as_str()),
        _ => false,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::collections::BTreeMap;

    struct TestRecord(BTreeMap<&'static str, Value>);

    impl FieldValues for TestRecord {
        fn field_value(&self, field: &str) -> Value {
            self.0.get(field).cloned().unwrap_or(Value::Null)
        }
    }

    fn record(username: Option<&str>, age: i64) -> TestRecord {
        let mut fields = BTreeMap::new();
        fields.insert("username", Value::from(username));
        fields.insert("age", Value::Int(age));
        TestRecord(fields)
    }

    #[test]
    fn match_all_and_match_none() {
        let row = record(Some("member1"), 10);
        assert!(eval(&Predicate::True, &row));
        assert!(!eval(&Predicate::False, &row));
    }

    #[test]
    fn comparisons_respect_operator() {
        let row = record(Some("member1"), 10);
        assert!(eval(&Predicate::eq("age", 10i64), &row));
        assert!(eval(&Predicate::lt("age", 28i64), &row));
        assert!(eval(&Predicate::gte("age", 10i64), &row));
        assert!(!eval(&Predicate::gt("age", 10i64), &row));
        assert!(eval(&Predicate::ne("age", 11i64), &row));
    }

    #[test]
    fn null_fields_never_compare() {
        let row = record(None, 10);
        assert!(!eval(&Predicate::eq("username", "member1"), &row));
        assert!(!eval(&Predicate::ne("username", "member1"), &row));
        assert!(eval(&Predicate::is_null("username"), &row));
        assert!(!eval(&Predicate::is_not_null("username"), &row));
    }

    #[test]
    fn membership_and_text_operators() {
        let row = record(Some("member1"), 10);
        assert!(eval(
            &Predicate::in_("age", vec![Value::Int(10), Value::Int(20)]),
            &row
        ));
        assert!(eval(
            &Predicate::not_in("age", vec![Value::Int(30), Value::Int(40)]),
            &row
        ));
        assert!(eval(&Predicate::starts_with("username", "member"), &row));
        assert!(eval(&Predicate::contains("username", "ber1"), &row));
        assert!(!eval(&Predicate::contains("age", "1"), &row));
    }

    #[test]
    fn connectives_compose() {
        let row = record(Some("member1"), 10);
        let both = Predicate::eq("username", "member1") & Predicate::eq("age", 10i64);
        assert!(eval(&both, &row));

        let either = Predicate::eq("age", 99i64) | Predicate::eq("age", 10i64);
        assert!(eval(&either, &row));

        assert!(!eval(&Predicate::not(both), &row));
    }
}
