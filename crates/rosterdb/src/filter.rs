use rosterdb_core::predicate::{AbsentPolicy, CompareOp, Predicate};
use serde::{Deserialize, Serialize};

///
/// MemberFilter
///
/// Caller-assembled optional criteria for member searches. Never
/// persisted; lowered into a predicate per request with an explicit
/// [`AbsentPolicy`], so "age 0" vs "no age filter" is always the caller's
/// stated choice.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberFilter {
    pub username: Option<String>,
    pub age: Option<i64>,
}

impl MemberFilter {
    /// Lower the criteria into one condition. Absent criteria are skipped;
    /// all-absent criteria yield a match-all condition.
    #[must_use]
    pub fn predicate(&self, policy: AbsentPolicy) -> Predicate {
        Predicate::all([
            username_eq(policy, self.username.as_deref()),
            age_eq(policy, self.age),
        ])
    }
}

/// Single-criterion condition for username equality, or `None` when the
/// criterion is absent. Reusable and composable via [`Predicate::all`].
#[must_use]
pub fn username_eq(policy: AbsentPolicy, username: Option<&str>) -> Option<Predicate> {
    policy.criterion("username", CompareOp::Eq, username)
}

/// Single-criterion condition for age equality.
#[must_use]
pub fn age_eq(policy: AbsentPolicy, age: Option<i64>) -> Option<Predicate> {
    policy.criterion("age", CompareOp::Eq, age)
}

/// Single-criterion condition for an age lower bound (inclusive).
#[must_use]
pub fn age_gte(policy: AbsentPolicy, age: Option<i64>) -> Option<Predicate> {
    policy.criterion("age", CompareOp::Gte, age)
}

///
/// TESTS
///
