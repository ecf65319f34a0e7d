use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// Direction
///
/// Sort direction for one order key. Null placement is a separate axis;
/// see [`NullOrder`].
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// NullOrder
///
/// Where null values land in the final output for one order key,
/// independent of the key's direction: `Last` means last whether the key
/// is ascending or descending.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NullOrder {
    First,
    Last,
}

///
/// OrderKey
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderKey {
    pub field: String,
    pub direction: Direction,
    pub nulls: NullOrder,
}

impl OrderKey {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: Direction, nulls: NullOrder) -> Self {
        Self {
            field: field.into(),
            direction,
            nulls,
        }
    }
}

///
/// OrderSpec
///
/// Multi-key ordering. Keys apply strictly in the order given; no implicit
/// tie-break key is ever appended, so rows equal under every key keep
/// their scan order (the sort is stable).
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub keys: Vec<OrderKey>,
}

///
/// PageSpec
///
/// Offset/limit window. Both are independent non-negative integers; an
/// offset beyond the result set yields an empty page, not an error.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub offset: u32,
    pub limit: Option<u32>,
}

impl PageSpec {
    #[must_use]
    pub const fn new(offset: u32, limit: Option<u32>) -> Self {
        Self { offset, limit }
    }
}

///
/// GroupSpec
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GroupSpec {
    pub fields: Vec<String>,
}

///
/// AggregateKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateKind {
    /// All kinds except `Count` must name a target field.
    #[must_use]
    pub const fn requires_field(self) -> bool {
        !matches!(self, Self::Count)
    }
}

///
/// AggregateSpec
///
/// One aggregate selector. `Count` without a field counts rows; every
/// other kind folds the named field, skipping null values.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregateSpec {
    pub kind: AggregateKind,
    pub field: Option<String>,
}

impl AggregateSpec {
    #[must_use]
    pub const fn count() -> Self {
        Self {
            kind: AggregateKind::Count,
            field: None,
        }
    }

    #[must_use]
    pub fn sum(field: impl Into<String>) -> Self {
        Self {
            kind: AggregateKind::Sum,
            field: Some(field.into()),
        }
    }

    #[must_use]
    pub fn avg(field: impl Into<String>) -> Self {
        Self {
            kind: AggregateKind::Avg,
            field: Some(field.into()),
        }
    }

    #[must_use]
    pub fn min(field: impl Into<String>) -> Self {
        Self {
            kind: AggregateKind::Min,
            field: Some(field.into()),
        }
    }

    #[must_use]
    pub fn max(field: impl Into<String>) -> Self {
        Self {
            kind: AggregateKind::Max,
            field: Some(field.into()),
        }
    }
}

///
/// Change
///
/// One field change carried by a bulk update description.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Change {
    Set { field: String, value: Value },
    Increment { field: String, delta: i64 },
}

impl Change {
    #[must_use]
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn increment(field: impl Into<String>, delta: i64) -> Self {
        Self::Increment {
            field: field.into(),
            delta,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Set { field, .. } | Self::Increment { field, .. } => field,
        }
    }
}
