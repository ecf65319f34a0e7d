use crate::{
    executor::storage_port::{ExecuteError, StoragePort},
    obs::{self, ExecKind, MetricsEvent},
    predicate::eval,
    query::{Change, MutationOp, MutationPlan},
    traits::{EntityValue, FieldValues},
    value::Value,
};

/// Execute a bulk mutation against the store and return the affected-row
/// count, evaluated at execution time.
///
/// Nothing here consults or repairs caller-held snapshots; see
/// [`MutationPlan`] for the staleness caveat.
pub fn execute<E, P>(port: &mut P, plan: &MutationPlan<E>) -> Result<u64, ExecuteError>
where
    E: EntityValue,
    P: StoragePort<E>,
{
    let kind = match plan.op {
        MutationOp::Update(_) => ExecKind::Update,
        MutationOp::Delete => ExecKind::Delete,
    };

    obs::emit(MetricsEvent::ExecStart {
        kind,
        entity_path: E::PATH,
    });

    let affected = port.apply(plan)?;

    obs::emit(MetricsEvent::ExecFinish {
        kind,
        entity_path: E::PATH,
        rows_touched: affected,
    });

    Ok(affected)
}

/// Whether one record matches a mutation plan's predicate. Store
/// implementations use this so predicate semantics stay in one place.
#[must_use]
pub fn matches<E: EntityValue>(plan: &MutationPlan<E>, record: &impl FieldValues) -> bool {
    eval(&plan.predicate, record)
}

/// Apply one change to a field's current value. Plan validation has
/// already confirmed kinds, nullability, and writability.
#[must_use]
pub fn apply_change(change: &Change, current: &Value) -> Value {
    match change {
        Change::Set { value, .. } => value.clone(),
        Change::Increment { delta, .. } => match current {
            Value::Int(v) => Value::Int(v.saturating_add(*delta)),
            Value::Uint(v) => Value::Uint(v.saturating_add_signed(*delta)),
            // A null integer field stays null under increment.
            _ => current.clone(),
        },
    }
}

///
/// TESTS
///
