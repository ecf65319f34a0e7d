use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of filter conditions. This layer
/// contains no type validation or execution semantics; interpretation
/// happens in later passes:
///
/// - normalization
/// - validation (schema-aware, at plan time)
/// - evaluation
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    StartsWith,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

///
/// Predicate
///
/// `True` is the explicit "no condition" marker: the conjunction of zero
/// real conditions selects every row, never errors.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull { field: String },
    IsNotNull { field: String },
}

impl Predicate {
    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(predicate: Self) -> Self {
        Self::Not(Box::new(predicate))
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lt, value))
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lte, value))
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gt, value))
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gte, value))
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::In, Value::List(values)))
    }

    #[must_use]
    pub fn not_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::NotIn,
            Value::List(values),
        ))
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::Contains,
            Value::Text(value.into()),
        ))
    }

    #[must_use]
    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::StartsWith,
            Value::Text(value.into()),
        ))
    }

    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNotNull {
            field: field.into(),
        }
    }

    /// Null-skipping conjunction: absent entries are discarded; zero
    /// surviving conditions yield `True` (select all rows).
    #[must_use]
    pub fn all(conditions: impl IntoIterator<Item = Option<Self>>) -> Self {
        let conditions: Vec<Self> = conditions.into_iter().flatten().collect();

        match conditions.len() {
            0 => Self::True,
            1 => conditions.into_iter().next().unwrap_or(Self::True),
            _ => Self::And(conditions),
        }
    }

    /// Null-skipping disjunction: absent entries are discarded; zero
    /// surviving conditions yield `False` (select no rows).
    #[must_use]
    pub fn any(conditions: impl IntoIterator<Item = Option<Self>>) -> Self {
        let conditions: Vec<Self> = conditions.into_iter().flatten().collect();

        match conditions.len() {
            0 => Self::False,
            1 => conditions.into_iter().next().unwrap_or(Self::False),
            _ => Self::Or(conditions),
        }
    }

    /// Walk every field reference in this predicate, for validation.
    pub(crate) fn for_each_field(&self, visit: &mut impl FnMut(FieldUse<'_>)) {
        match self {
            Self::True | Self::False => {}
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.for_each_field(visit);
                }
            }
            Self::Not(child) => child.for_each_field(visit),
            Self::Compare(compare) => visit(FieldUse::Compare(compare)),
            Self::IsNull { field } | Self::IsNotNull { field } => {
                visit(FieldUse::Nullness(field));
            }
        }
    }
}

///
/// FieldUse
///
/// One field reference inside a predicate, as seen by plan validation.
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum FieldUse<'a> {
    Compare(&'a ComparePredicate),
    Nullness(&'a str),
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}

///
/// TESTS
///
