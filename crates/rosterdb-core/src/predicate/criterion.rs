use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// AbsentPolicy
///
/// Decides when an optional criterion counts as "not provided" and must be
/// skipped instead of filtering. The choice between the two readings of
/// `age = 0` (a real filter vs. an unset form field) is the caller's, made
/// explicitly at every lowering site; there is deliberately no `Default`
/// impl.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AbsentPolicy {
    /// Only a missing value is absent. `age = 0` filters for zero;
    /// `username = ""` filters for the empty string.
    NullOnly,
    /// A missing value, an empty string, or a zero integer is absent.
    NullOrDefault,
}

impl AbsentPolicy {
    #[must_use]
    pub fn is_absent(self, value: &Value) -> bool {
        match self {
            Self::NullOnly => value.is_null(),
            Self::NullOrDefault => match value {
                Value::Null => true,
                Value::Text(text) => text.is_empty(),
                Value::Int(v) => *v == 0,
                Value::Uint(v) => *v == 0,
                Value::Bool(_) | Value::Float(_) | Value::List(_) => false,
            },
        }
    }

    /// Lower one optional criterion into a condition, or `None` when the
    /// criterion is absent under this policy. The result composes with
    /// [`Predicate::all`] / [`Predicate::any`] without null checks at the
    /// call site.
    #[must_use]
    pub fn criterion(
        self,
        field: impl Into<String>,
        op: CompareOp,
        value: Option<impl Into<Value>>,
    ) -> Option<Predicate> {
        let value = value?.into();
        if self.is_absent(&value) {
            return None;
        }

        Some(Predicate::Compare(ComparePredicate::new(field, op, value)))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_absent_under_both_policies() {
        for policy in [AbsentPolicy::NullOnly, AbsentPolicy::NullOrDefault] {
            assert_eq!(
                policy.criterion("age", CompareOp::Eq, None::<i64>),
                None,
                "{policy:?}"
            );
        }
    }

    #[test]
    fn zero_age_is_a_policy_choice_not_a_default() {
        assert_eq!(
            AbsentPolicy::NullOrDefault.criterion("age", CompareOp::Eq, Some(0i64)),
            None
        );
        assert_eq!(
            AbsentPolicy::NullOnly.criterion("age", CompareOp::Eq, Some(0i64)),
            Some(Predicate::eq("age", 0i64))
        );
    }

    #[test]
    fn empty_string_follows_the_same_split() {
        assert_eq!(
            AbsentPolicy::NullOrDefault.criterion("username", CompareOp::Eq, Some("")),
            None
        );
        assert_eq!(
            AbsentPolicy::NullOnly.criterion("username", CompareOp::Eq, Some("")),
            Some(Predicate::eq("username", ""))
        );
    }

    #[test]
    fn present_values_lower_to_conditions() {
        assert_eq!(
            AbsentPolicy::NullOrDefault.criterion("username", CompareOp::Eq, Some("member1")),
            Some(Predicate::eq("username", "member1"))
        );
        assert_eq!(
            AbsentPolicy::NullOrDefault.criterion("age", CompareOp::Gt, Some(20i64)),
            Some(Predicate::gt("age", 20i64))
        );
    }
}
