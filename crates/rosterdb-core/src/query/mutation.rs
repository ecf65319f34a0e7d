use crate::{
    predicate::{Predicate, normalize},
    query::{
        plan::{MutationOp, MutationPlan},
        spec::Change,
        validate,
        validate::PlanError,
    },
    traits::EntityKind,
    value::Value,
};
use std::marker::PhantomData;

///
/// UpdateQuery
///
/// Bulk update intent: a predicate plus a list of field changes, executed
/// directly against the store. The result is an affected-row count only.
///
/// Consistency caveat: entity copies fetched before the update are NOT
/// refreshed. Any cached object graph must be discarded or re-fetched
/// after executing, or reads from it will observe pre-mutation values.
///

#[derive(Clone, Debug)]
pub struct UpdateQuery<E: EntityKind> {
    predicate: Option<Predicate>,
    changes: Vec<Change>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> Default for UpdateQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> UpdateQuery<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
            changes: Vec::new(),
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

    /// Set the named field on every matching row.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.changes.push(Change::set(field, value));
        self
    }

    /// Add `delta` to the named integer field on every matching row.
    #[must_use]
    pub fn increment(mut self, field: impl Into<String>, delta: i64) -> Self {
        self.changes.push(Change::increment(field, delta));
        self
    }

    /// Validate this intent into an executable mutation plan.
    pub fn plan(&self) -> Result<MutationPlan<E>, PlanError> {
        let predicate = self
            .predicate
            .as_ref()
            .map_or(Predicate::True, normalize);

        validate::validate_predicate::<E>(&predicate)?;
        validate::validate_changes::<E>(&self.changes)?;

        Ok(MutationPlan {
            predicate,
            op: MutationOp::Update(self.changes.clone()),
            _marker: PhantomData,
        })
    }
}

///
/// DeleteQuery
///
/// Bulk delete intent. Same predicate machinery and the same stale-snapshot
/// caveat as [`UpdateQuery`].
///

#[derive(Clone, Debug)]
pub struct DeleteQuery<E: EntityKind> {
    predicate: Option<Predicate>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> Default for DeleteQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> DeleteQuery<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
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

    /// Validate this intent into an executable mutation plan.
    pub fn plan(&self) -> Result<MutationPlan<E>, PlanError> {
        let predicate = self
            .predicate
            .as_ref()
            .map_or(Predicate::True, normalize);

        validate::validate_predicate::<E>(&predicate)?;

        Ok(MutationPlan {
            predicate,
            op: MutationOp::Delete,
            _marker: PhantomData,
        })
    }
}

///
/// TESTS
///
