mod common;

use common::seeded_session;
use rosterdb::prelude::*;
use rosterdb_core::{
    obs::{self, MetricsEvent, MetricsSink},
    projection::{ProjectError, project_fields, project_new, project_setters},
};
use std::cell::RefCell;

#[test]
fn all_three_strategies_agree_when_names_line_up() {
    let session = seeded_session();
    let rows = session
        .rows(
            &Query::new()
                .select(["username", "age"])
                .order_by("age", Direction::Asc, NullOrder::First),
        )
        .expect("rows should execute");

    let by_field: Vec<MemberDto> = project_fields(&rows).into_items();
    let by_setter: Vec<MemberDto> = project_setters(&rows).into_items();
    let by_constructor: Vec<MemberDto> = project_new(&rows).expect("constructor projection");

    assert_eq!(by_field, by_setter);
    assert_eq!(by_setter, by_constructor);
    assert_eq!(by_constructor.len(), 4);
    assert_eq!(by_constructor[0].username.as_deref(), Some("member1"));
    assert_eq!(by_constructor[3].age, 40);
}

#[test]
fn name_mismatch_drops_observably_for_named_strategies() {
    let session = seeded_session();
    let rows = session
        .rows(&Query::new().select(["username", "age"]))
        .expect("rows should execute");

    // UserDto has `name`, not `username`: the column drops, mapping
    // continues, and the drop is visible on the report.
    let report = project_fields::<UserDto>(&rows);
    assert!(!report.is_clean());
    assert_eq!(report.dropped(), &["username"]);
    assert!(report.items().iter().all(|dto| dto.name.is_none()));
    assert_eq!(report.items()[0].age, 10);
}

#[test]
fn dropped_columns_reach_the_metrics_sink() {
    #[derive(Default)]
    struct Capture(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for Capture {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    let session = seeded_session();
    let rows = session
        .rows(&Query::new().select(["username", "age"]))
        .expect("rows should execute");

    let capture = Capture::default();
    obs::with_sink(&capture, || {
        let _report = project_setters::<UserDto>(&rows);
    });

    let drops = capture
        .0
        .borrow()
        .iter()
        .filter(|event| matches!(event, MetricsEvent::ProjectionFieldDropped { column, .. } if *column == "username"))
        .count();
    assert_eq!(drops, 4, "one drop event per row for the unmatched column");
}

#[test]
fn constructor_strategy_ignores_names_and_matches_by_position() {
    let session = seeded_session();
    let rows = session
        .rows(
            &Query::new()
                .select(["username", "age"])
                .order_by("age", Direction::Asc, NullOrder::First),
        )
        .expect("rows should execute");

    // Positional match: the `username` column feeds UserDto's `name`.
    let users: Vec<UserDto> = project_new(&rows).expect("constructor projection");
    assert_eq!(users[0].name.as_deref(), Some("member1"));
}

#[test]
fn constructor_arity_mismatch_fails_before_any_row() {
    let session = seeded_session();
    let rows = session
        .rows(&Query::new().select(["age"]))
        .expect("rows should execute");
    assert_eq!(rows.rows.len(), 4, "rows exist, yet none must be mapped");

    let result: Result<Vec<MemberDto>, _> = project_new(&rows);
    assert!(matches!(result, Err(ProjectError::ShapeArity { .. })));
}

#[test]
fn constructor_kind_mismatch_fails_before_any_row() {
    let session = seeded_session();

    // Reversed selection: position 0 carries the int age where the target
    // expects nullable text.
    let rows = session
        .rows(&Query::new().select(["age", "username"]))
        .expect("rows should execute");

    let result: Result<Vec<MemberDto>, _> = project_new(&rows);
    assert!(matches!(
        result,
        Err(ProjectError::ShapeKind { position: 0, .. })
    ));
}

#[test]
fn full_schema_rows_carry_every_declared_column() {
    let session = seeded_session();
    let rows = session.rows(&Query::new()).expect("rows should execute");

    let names: Vec<&str> = rows
        .shape
        .columns()
        .iter()
        .map(|column| column.name)
        .collect();
    assert_eq!(names, vec!["id", "username", "age", "team_name"]);
}
