use crate::{
    executor::ExecuteError,
    predicate::{Predicate, normalize},
    projection::ProjectError,
    query::{
        plan::QueryPlan,
        spec::{AggregateSpec, Direction, GroupSpec, NullOrder, OrderKey, OrderSpec, PageSpec},
        validate,
        validate::PlanError,
    },
    traits::EntityKind,
};
use std::marker::PhantomData;
use thiserror::Error as ThisError;

///
/// Query
///
/// Typed, declarative query intent for one entity type.
///
/// The intent is:
/// - schema-agnostic at construction
/// - normalized and validated only during planning
/// - reusable: planning borrows the intent
///

#[derive(Clone, Debug)]
pub struct Query<E: EntityKind> {
    predicate: Option<Predicate>,
    order: Option<OrderSpec>,
    page: PageSpec,
    select: Option<Vec<String>>,
    group: Option<GroupSpec>,
    aggregates: Vec<AggregateSpec>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> Query<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
            order: None,
            page: PageSpec::new(0, None),
            select: None,
            group: None,
            aggregates: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Add a condition, implicitly AND-ing with any existing condition.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(existing & predicate),
            None => Some(predicate),
        };
        self
    }

    /// Append one order key with explicit direction and null placement.
    #[must_use]
    pub fn order_by(
        mut self,
        field: impl Into<String>,
        direction: Direction,
        nulls: NullOrder,
    ) -> Self {
        self.order
            .get_or_insert_with(OrderSpec::default)
            .keys
            .push(OrderKey::new(field, direction, nulls));
        self
    }

    /// Append an ascending key, nulls first.
    #[must_use]
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Direction::Asc, NullOrder::First)
    }

    /// Append a descending key, nulls first.
    #[must_use]
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Direction::Desc, NullOrder::First)
    }

    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.page.offset = offset;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }

    /// Project only the named columns, in the given order.
    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Append one grouping key.
    #[must_use]
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group
            .get_or_insert_with(GroupSpec::default)
            .fields
            .push(field.into());
        self
    }

    /// Append one aggregate selector.
    #[must_use]
    pub fn aggregate(mut self, spec: AggregateSpec) -> Self {
        self.aggregates.push(spec);
        self
    }

    /// Validate this intent into an executor-ready plan.
    ///
    /// All malformed-spec reporting happens here, never at execution time.
    pub fn plan(&self) -> Result<QueryPlan<E>, PlanError> {
        let predicate = self
            .predicate
            .as_ref()
            .map_or(Predicate::True, normalize);

        validate::validate_predicate::<E>(&predicate)?;

        if let Some(order) = &self.order {
            validate::validate_order::<E>(order)?;
        }

        let select = match &self.select {
            None => None,
            Some(columns) => {
                if columns.is_empty() {
                    return Err(PlanError::EmptySelection);
                }
                let mut resolved = Vec::with_capacity(columns.len());
                for column in columns {
                    resolved.push(*validate::require_field::<E>(column)?);
                }
                Some(resolved)
            }
        };

        if let Some(group) = &self.group {
            validate::validate_group::<E>(group)?;
            if self.aggregates.is_empty() {
                return Err(PlanError::GroupWithoutAggregate);
            }
        }

        for aggregate in &self.aggregates {
            validate::validate_aggregate::<E>(aggregate)?;
        }

        if !self.aggregates.is_empty() {
            if select.is_some() {
                return Err(PlanError::AggregateWithSelection);
            }
            if self.order.is_some() || self.page != PageSpec::new(0, None) {
                return Err(PlanError::AggregateWithWindow);
            }
        }

        let page = if self.page == PageSpec::new(0, None) {
            None
        } else {
            Some(self.page)
        };

        Ok(QueryPlan {
            predicate,
            order: self.order.clone(),
            page,
            select,
            group: self.group.clone(),
            aggregates: self.aggregates.clone(),
            _marker: PhantomData,
        })
    }
}

///
/// QueryError
///
/// Session-surface error: construction-time plan defects, execution
/// failures, or projection failures.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("{0}")]
    Execute(#[from] ExecuteError),

    #[error("{0}")]
    Project(#[from] ProjectError),
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        traits::{FieldDef, FieldValues},
        value::{Value, ValueKind},
    };

    #[derive(Clone)]
    struct Sample;

    impl EntityKind for Sample {
        const PATH: &'static str = "test::sample";
        const FIELDS: &'static [FieldDef] = &[
            FieldDef::required("id", ValueKind::Uint),
            FieldDef::nullable("username", ValueKind::Text),
            FieldDef::required("age", ValueKind::Int),
        ];
    }

    impl FieldValues for Sample {
        fn field_value(&self, _field: &str) -> Value {
            Value::Null
        }
    }

    #[test]
    fn empty_intent_plans_to_match_all() {
        let plan = Query::<Sample>::new().plan().expect("plan");
        assert_eq!(plan.predicate, Predicate::True);
        assert!(plan.order.is_none());
        assert!(plan.page.is_none());
    }

    #[test]
    fn filters_merge_with_and() {
        let plan = Query::<Sample>::new()
            .filter(Predicate::eq("username", "member1"))
            .filter(Predicate::eq("age", 10i64))
            .plan()
            .expect("plan");

        let Predicate::And(children) = plan.predicate else {
            panic!("expected conjunction");
        };
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn unknown_fields_fail_at_plan_time() {
        let result = Query::<Sample>::new()
            .filter(Predicate::eq("nickname", "x"))
            .plan();
        assert!(matches!(result, Err(PlanError::UnknownField { .. })));

        let result = Query::<Sample>::new().asc("nickname").plan();
        assert!(matches!(result, Err(PlanError::UnknownField { .. })));
    }

    #[test]
    fn literal_kind_is_checked() {
        let result = Query::<Sample>::new()
            .filter(Predicate::eq("age", "ten"))
            .plan();
        assert!(matches!(result, Err(PlanError::LiteralKindMismatch { .. })));
    }

    #[test]
    fn null_literals_are_rejected_with_guidance() {
        let result = Query::<Sample>::new()
            .filter(Predicate::eq("username", Value::Null))
            .plan();
        assert!(matches!(result, Err(PlanError::NullLiteral { .. })));
    }

    #[test]
    fn grouping_requires_an_aggregate() {
        let result = Query::<Sample>::new().group_by("username").plan();
        assert!(matches!(result, Err(PlanError::GroupWithoutAggregate)));
    }

    #[test]
    fn aggregates_reject_windows_and_selection() {
        let result = Query::<Sample>::new()
            .aggregate(AggregateSpec::count())
            .limit(2)
            .plan();
        assert!(matches!(result, Err(PlanError::AggregateWithWindow)));

        let result = Query::<Sample>::new()
            .aggregate(AggregateSpec::count())
            .select(["age"])
            .plan();
        assert!(matches!(result, Err(PlanError::AggregateWithSelection)));
    }

    #[test]
    fn sum_of_text_is_rejected() {
        let result = Query::<Sample>::new()
            .aggregate(AggregateSpec::sum("username"))
            .plan();
        assert!(matches!(
            result,
            Err(PlanError::AggregateNeedsNumericField { .. })
        ));
    }
}
