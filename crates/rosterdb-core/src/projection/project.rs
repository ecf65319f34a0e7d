use crate::{
    obs::{self, MetricsEvent},
    projection::{
        row::{RowSet, RowShape},
        target::{FieldWrite, FromRow, PropertyWrite},
    },
    value::ValueKind,
};
use std::any::type_name;
use thiserror::Error as ThisError;

///
/// ProjectError
///
/// Constructor-strategy failures. Shape mismatches fail the whole mapping
/// call before any row is processed; nothing is ever partially
/// constructed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProjectError {
    #[error("{target} expects {expected} columns, row shape has {found}")]
    ShapeArity {
        target: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "{target} column {position} ('{column}') expects {expected}, row shape provides {found}"
    )]
    ShapeKind {
        target: &'static str,
        position: usize,
        column: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("{target} column {position} ('{column}') requires a value, row shape may be null")]
    ShapeNullability {
        target: &'static str,
        position: usize,
        column: &'static str,
    },

    #[error("extraction at position {position} expected {expected}")]
    Extract { position: usize, expected: ValueKind },
}

///
/// ProjectReport
///
/// Output of the field-direct and property-set strategies. Dropped columns
/// are recoverable by contract (mapping continued without them), but the
/// drop is observable here and on the metrics sink rather than vanishing.
///

#[derive(Debug)]
#[must_use = "dropped columns are only observable through the report"]
pub struct ProjectReport<T> {
    items: Vec<T>,
    dropped: Vec<&'static str>,
}

impl<T> ProjectReport<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Accept the drops and keep the mapped items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Column names that failed to map on at least one row.
    #[must_use]
    pub fn dropped(&self) -> &[&'static str] {
        &self.dropped
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Map rows by writing directly into the target's fields by column name.
pub fn project_fields<T: FieldWrite>(set: &RowSet) -> ProjectReport<T> {
    project_named(set, T::write_field)
}

/// Map rows through the target's setters by column name.
pub fn project_setters<T: PropertyWrite>(set: &RowSet) -> ProjectReport<T> {
    project_named(set, T::write_property)
}

fn project_named<T: Default>(
    set: &RowSet,
    mut write: impl FnMut(&mut T, &str, &crate::value::Value) -> bool,
) -> ProjectReport<T> {
    let mut dropped: Vec<&'static str> = Vec::new();
    let mut items = Vec::with_capacity(set.rows.len());

    for row in &set.rows {
        let mut item = T::default();
        for (column, value) in set.shape.columns().iter().zip(row.iter()) {
            if write(&mut item, column.name, value) {
                continue;
            }

            obs::emit(MetricsEvent::ProjectionFieldDropped {
                target: type_name::<T>(),
                column: column.name,
            });
            if !dropped.contains(&column.name) {
                dropped.push(column.name);
            }
        }
        items.push(item);
    }

    ProjectReport { items, dropped }
}

/// Map rows through the target's typed constructor.
///
/// Shape compatibility (arity, per-position kind, nullability) is
/// validated against `T::COLUMNS` before row 1 of N; a mismatch fails the
/// whole call. Matching is positional: column names never participate.
pub fn project_new<T: FromRow>(set: &RowSet) -> Result<Vec<T>, ProjectError> {
    validate_shape::<T>(&set.shape)?;

    set.rows.iter().map(T::from_row).collect()
}

fn validate_shape<T: FromRow>(shape: &RowShape) -> Result<(), ProjectError> {
    let target = type_name::<T>();

    if T::COLUMNS.len() != shape.len() {
        return Err(ProjectError::ShapeArity {
            target,
            expected: T::COLUMNS.len(),
            found: shape.len(),
        });
    }

    for (position, (expected, provided)) in
        T::COLUMNS.iter().zip(shape.columns().iter()).enumerate()
    {
        if expected.kind != provided.kind {
            return Err(ProjectError::ShapeKind {
                target,
                position,
                column: expected.name,
                expected: expected.kind,
                found: provided.kind,
            });
        }

        if provided.nullable && !expected.nullable {
            return Err(ProjectError::ShapeNullability {
                target,
                position,
                column: expected.name,
            });
        }
    }

    Ok(())
}

///
/// TESTS
///
