use crate::{
    error::InternalError,
    executor::storage_port::{ExecuteError, StoragePort},
    obs::{self, ExecKind, MetricsEvent},
    predicate::eval,
    projection::{Row, RowSet, RowShape},
    query::{Direction, NullOrder, OrderSpec, PageSpec, QueryPlan},
    traits::{EntityValue, FieldValues},
    value::{canonical_cmp, order_cmp},
};
use std::cmp::Ordering;

/// Execute a read plan: filter, order, page.
pub fn execute<E, P>(port: &P, plan: &QueryPlan<E>) -> Result<Vec<E>, ExecuteError>
where
    E: EntityValue,
    P: StoragePort<E>,
{
    if !plan.aggregates.is_empty() {
        return Err(InternalError::executor_invariant(
            "aggregate plan routed to the load executor",
        )
        .into());
    }

    obs::emit(MetricsEvent::ExecStart {
        kind: ExecKind::Load,
        entity_path: E::PATH,
    });

    let scanned = port.scan();
    obs::emit(MetricsEvent::RowsScanned {
        entity_path: E::PATH,
        rows_scanned: scanned.len() as u64,
    });

    let mut matched: Vec<E> = scanned
        .into_iter()
        .filter(|record| eval(&plan.predicate, record))
        .collect();

    if let Some(order) = &plan.order {
        sort_records(&mut matched, order);
    }

    let matched = page_window(matched, plan.page.as_ref());

    obs::emit(MetricsEvent::ExecFinish {
        kind: ExecKind::Load,
        entity_path: E::PATH,
        rows_touched: matched.len() as u64,
    });

    Ok(matched)
}

/// Execute a read plan and project the result into flat rows using the
/// plan's selection (or the full schema when nothing was selected).
pub fn execute_rows<E, P>(port: &P, plan: &QueryPlan<E>) -> Result<RowSet, ExecuteError>
where
    E: EntityValue,
    P: StoragePort<E>,
{
    let records = execute(port, plan)?;
    let shape = RowShape::new(plan.row_columns());

    let rows = records
        .iter()
        .map(|record| {
            Row::new(
                shape
                    .columns()
                    .iter()
                    .map(|column| record.field_value(column.name))
                    .collect(),
            )
        })
        .collect();

    Ok(RowSet { shape, rows })
}

/// Stable multi-key sort. Keys apply in spec order; rows equal under every
/// key keep their scan order.
fn sort_records<R: FieldValues>(records: &mut [R], order: &OrderSpec) {
    records.sort_by(|left, right| compare_records(left, right, order));
}

pub(crate) fn compare_records<R: FieldValues>(left: &R, right: &R, order: &OrderSpec) -> Ordering {
    for key in &order.keys {
        let left_value = left.field_value(&key.field);
        let right_value = right.field_value(&key.field);

        let ordering = match (left_value.is_null(), right_value.is_null()) {
            (true, true) => Ordering::Equal,
            // Null placement is independent of direction: it decides the
            // final position, so it is applied outside the reversal below.
            (true, false) => match key.nulls {
                NullOrder::First => Ordering::Less,
                NullOrder::Last => Ordering::Greater,
            },
            (false, true) => match key.nulls {
                NullOrder::First => Ordering::Greater,
                NullOrder::Last => Ordering::Less,
            },
            (false, false) => {
                let ordering = order_cmp(&left_value, &right_value)
                    .unwrap_or_else(|| canonical_cmp(&left_value, &right_value));
                match key.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

fn page_window<R>(records: Vec<R>, page: Option<&PageSpec>) -> Vec<R> {
    let Some(page) = page else {
        return records;
    };

    records
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit.map_or(usize::MAX, |limit| limit as usize))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Direction, OrderKey};
    use crate::value::Value;

    struct TestRecord {
        username: Option<&'static str>,
        age: i64,
    }

    impl FieldValues for TestRecord {
        fn field_value(&self, field: &str) -> Value {
            match field {
                "username" => Value::from(self.username),
                "age" => Value::Int(self.age),
                _ => Value::Null,
            }
        }
    }

    fn order(keys: Vec<OrderKey>) -> OrderSpec {
        OrderSpec { keys }
    }

    #[test]
    fn nulls_last_lands_last_even_when_ascending() {
        let mut records = vec![
            TestRecord { username: None, age: 100 },
            TestRecord { username: Some("member5"), age: 100 },
            TestRecord { username: Some("member6"), age: 100 },
        ];

        sort_records(
            &mut records,
            &order(vec![
                OrderKey::new("age", Direction::Desc, NullOrder::First),
                OrderKey::new("username", Direction::Asc, NullOrder::Last),
            ]),
        );

        let usernames: Vec<_> = records.iter().map(|r| r.username).collect();
        assert_eq!(usernames, vec![Some("member5"), Some("member6"), None]);
    }

    #[test]
    fn nulls_first_lands_first_even_when_descending() {
        let mut records = vec![
            TestRecord { username: Some("b"), age: 1 },
            TestRecord { username: None, age: 2 },
            TestRecord { username: Some("a"), age: 3 },
        ];

        sort_records(
            &mut records,
            &order(vec![OrderKey::new(
                "username",
                Direction::Desc,
                NullOrder::First,
            )]),
        );

        let usernames: Vec<_> = records.iter().map(|r| r.username).collect();
        assert_eq!(usernames, vec![None, Some("b"), Some("a")]);
    }

    #[test]
    fn ties_preserve_scan_order_without_implicit_keys() {
        let mut records = vec![
            TestRecord { username: Some("first"), age: 10 },
            TestRecord { username: Some("second"), age: 10 },
        ];

        sort_records(
            &mut records,
            &order(vec![OrderKey::new("age", Direction::Asc, NullOrder::First)]),
        );

        let usernames: Vec<_> = records.iter().map(|r| r.username).collect();
        assert_eq!(usernames, vec![Some("first"), Some("second")]);
    }

    #[test]
    fn window_clamps_to_result_size() {
        let records: Vec<i32> = vec![1, 2, 3, 4];
        let page = PageSpec::new(2, Some(2));
        assert_eq!(page_window(records.clone(), Some(&page)), vec![3, 4]);

        let beyond = PageSpec::new(10, Some(2));
        assert_eq!(page_window(records.clone(), Some(&beyond)), Vec::<i32>::new());

        let no_limit = PageSpec::new(1, None);
        assert_eq!(page_window(records, Some(&no_limit)), vec![2, 3, 4]);
    }
}
