use crate::{
    error::InternalError,
    query::MutationPlan,
    traits::EntityValue,
};
use thiserror::Error as ThisError;

///
/// StoragePort
///
/// The record-store boundary the executor runs against. The engine places
/// no requirement on the implementation beyond "rows out, affected-count
/// out": no transactions, no ordering guarantees, no caching.
///

pub trait StoragePort<E: EntityValue> {
    /// Scan every stored record, in the store's own stable order.
    fn scan(&self) -> Vec<E>;

    /// Apply a bulk mutation and return the number of rows it touched,
    /// evaluated against store state at execution time.
    fn apply(&mut self, plan: &MutationPlan<E>) -> Result<u64, ExecuteError>;
}

///
/// ExecuteError
///
/// Runtime execution failure. Spec defects never appear here; they are
/// construction-time `PlanError`s.
///

#[derive(Debug, ThisError)]
pub enum ExecuteError {
    #[error("expected at most one row for {entity}, found {found}")]
    NonUnique { entity: &'static str, found: usize },

    #[error(transparent)]
    Internal(#[from] InternalError),
}
