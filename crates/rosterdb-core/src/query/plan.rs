use crate::{
    predicate::Predicate,
    query::spec::{AggregateSpec, Change, GroupSpec, OrderSpec, PageSpec},
    traits::{EntityKind, FieldDef},
};
use std::marker::PhantomData;

///
/// QueryPlan
///
/// Validated, executor-ready read description. Built only by
/// `Query::plan`, so every field reference, literal kind, and spec shape
/// has already been checked against the entity schema.
///

#[derive(Clone, Debug)]
pub struct QueryPlan<E: EntityKind> {
    pub predicate: Predicate,
    pub order: Option<OrderSpec>,
    pub page: Option<PageSpec>,
    pub select: Option<Vec<FieldDef>>,
    pub group: Option<GroupSpec>,
    pub aggregates: Vec<AggregateSpec>,
    pub(crate) _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> QueryPlan<E> {
    /// The columns a row projection of this plan produces: the selection,
    /// or the full entity schema when nothing was selected.
    #[must_use]
    pub fn row_columns(&self) -> Vec<FieldDef> {
        self.select
            .clone()
            .unwrap_or_else(|| E::FIELDS.to_vec())
    }
}

///
/// MutationPlan
///
/// Validated bulk update/delete description. Executing one returns only an
/// affected-row count; it never touches previously loaded entity copies.
/// Callers holding snapshots fetched before the mutation must discard or
/// re-fetch them, or they will observe stale values.
///

#[derive(Clone, Debug)]
pub struct MutationPlan<E: EntityKind> {
    pub predicate: Predicate,
    pub op: MutationOp,
    pub(crate) _marker: PhantomData<fn() -> E>,
}

///
/// MutationOp
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MutationOp {
    Update(Vec<Change>),
    Delete,
}
