use crate::{
    error::InternalError,
    executor::storage_port::{ExecuteError, StoragePort},
    obs::{self, ExecKind, MetricsEvent},
    predicate::eval,
    query::{AggregateKind, AggregateSpec, QueryPlan},
    traits::{EntityValue, FieldValues},
    value::{Value, canonical_cmp, order_cmp},
};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// AggregateRow
///
/// One aggregate output tuple: the group key values (empty when the plan
/// has no grouping) followed by one output value per aggregate selector.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateRow {
    pub keys: Vec<Value>,
    pub values: Vec<Value>,
}

/// Execute an aggregate plan. Without grouping, exactly one tuple covers
/// the whole filtered result set; with grouping, one tuple per distinct
/// key combination, in canonical key order.
pub fn execute<E, P>(port: &P, plan: &QueryPlan<E>) -> Result<Vec<AggregateRow>, ExecuteError>
where
    E: EntityValue,
    P: StoragePort<E>,
{
    if plan.aggregates.is_empty() {
        return Err(InternalError::executor_invariant(
            "plan without aggregate selectors routed to the aggregate executor",
        )
        .into());
    }

    obs::emit(MetricsEvent::ExecStart {
        kind: ExecKind::Aggregate,
        entity_path: E::PATH,
    });

    let scanned = port.scan();
    obs::emit(MetricsEvent::RowsScanned {
        entity_path: E::PATH,
        rows_scanned: scanned.len() as u64,
    });

    let matched: Vec<E> = scanned
        .into_iter()
        .filter(|record| eval(&plan.predicate, record))
        .collect();

    let output = match &plan.group {
        None => vec![AggregateRow {
            keys: Vec::new(),
            values: fold_all(&plan.aggregates, &matched),
        }],
        Some(group) => {
            let mut partitions: BTreeMap<GroupKey, Vec<&E>> = BTreeMap::new();
            for record in &matched {
                let key = GroupKey(
                    group
                        .fields
                        .iter()
                        .map(|field| record.field_value(field))
                        .collect(),
                );
                partitions.entry(key).or_default().push(record);
            }

            partitions
                .into_iter()
                .map(|(key, members)| AggregateRow {
                    keys: key.0,
                    values: fold_all_refs(&plan.aggregates, &members),
                })
                .collect()
        }
    };

    obs::emit(MetricsEvent::ExecFinish {
        kind: ExecKind::Aggregate,
        entity_path: E::PATH,
        rows_touched: matched.len() as u64,
    });

    Ok(output)
}

///
/// GroupKey
///
/// Grouping key ordered by the canonical value comparator so partition
/// output order is deterministic.
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct GroupKey(Vec<Value>);

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (left, right) in self.0.iter().zip(other.0.iter()) {
            let cmp = canonical_cmp(left, right);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn fold_all<R: FieldValues>(specs: &[AggregateSpec], records: &[R]) -> Vec<Value> {
    specs.iter().map(|spec| fold(spec, records.iter())).collect()
}

fn fold_all_refs<R: FieldValues>(specs: &[AggregateSpec], records: &[&R]) -> Vec<Value> {
    specs
        .iter()
        .map(|spec| fold(spec, records.iter().copied()))
        .collect()
}

/// Fold one aggregate over a window of records.
///
/// Empty-window contracts: `Count` is zero; `Sum`, `Avg`, `Min`, and `Max`
/// are `Null`, so "no rows" stays distinguishable from "rows folding to
/// zero". Null field values are skipped by every field-scoped fold.
fn fold<'a, R: FieldValues + 'a>(
    spec: &AggregateSpec,
    records: impl Iterator<Item = &'a R>,
) -> Value {
    let Some(field) = &spec.field else {
        // Count over rows is the only field-less aggregate.
        return Value::Uint(records.count() as u64);
    };

    let values: Vec<Value> = records
        .map(|record| record.field_value(field))
        .filter(|value| !value.is_null())
        .collect();

    match spec.kind {
        AggregateKind::Count => Value::Uint(values.len() as u64),
        AggregateKind::Sum => fold_sum(&values),
        AggregateKind::Avg => fold_avg(&values),
        AggregateKind::Min => fold_extremum(values, Ordering::Less),
        AggregateKind::Max => fold_extremum(values, Ordering::Greater),
    }
}

fn fold_sum(values: &[Value]) -> Value {
    if values.is_empty() {
        return Value::Null;
    }

    if values.iter().all(|value| matches!(value, Value::Int(_))) {
        let mut total = 0i64;
        for value in values {
            if let Value::Int(v) = value {
                total = total.saturating_add(*v);
            }
        }
        return Value::Int(total);
    }

    if values.iter().all(|value| matches!(value, Value::Uint(_))) {
        let mut total = 0u64;
        for value in values {
            if let Value::Uint(v) = value {
                total = total.saturating_add(*v);
            }
        }
        return Value::Uint(total);
    }

    let total: f64 = values.iter().filter_map(Value::as_f64).sum();
    Value::from(total)
}

fn fold_avg(values: &[Value]) -> Value {
    let numeric: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
    if numeric.is_empty() {
        return Value::Null;
    }

    let total: f64 = numeric.iter().sum();
    Value::from(total / numeric.len() as f64)
}

fn fold_extremum(values: Vec<Value>, keep: Ordering) -> Value {
    let mut values = values.into_iter();
    let Some(mut best) = values.next() else {
        return Value::Null;
    };

    for candidate in values {
        let ordering =
            order_cmp(&candidate, &best).unwrap_or_else(|| canonical_cmp(&candidate, &best));
        if ordering == keep {
            best = candidate;
        }
    }

    best
}

///
/// TESTS
///
