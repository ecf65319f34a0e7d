use crate::{
    projection::{ProjectError, Row},
    traits::FieldValue,
    value::{Value, ValueKind},
};

///
/// Column
///
/// One expected input column of a constructor-strategy target: value kind
/// plus nullability. The name is carried for diagnostics only;
/// constructor matching is positional, never by name.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ValueKind,
    pub nullable: bool,
}

impl Column {
    #[must_use]
    pub const fn required(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }

    /// Derive the column contract from the target's Rust field type, so
    /// the declared shape cannot drift from the extraction code.
    #[must_use]
    pub const fn for_field<T: FieldValue>(name: &'static str) -> Self {
        Self {
            name,
            kind: T::KIND,
            nullable: T::NULLABLE,
        }
    }
}

///
/// FromRow
///
/// Constructor-strategy target: positional, typed construction from one
/// row. Arity and per-position kinds are declared in `COLUMNS` and checked
/// against the row shape before any row is mapped; the extraction code
/// itself is ordinary typed Rust, so a wrong field type fails at compile
/// time.
///

pub trait FromRow: Sized {
    const COLUMNS: &'static [Column];

    fn from_row(row: &Row) -> Result<Self, ProjectError>;
}

///
/// FieldWrite
///
/// Field-direct target: values are written straight into fields by name,
/// bypassing any normalization the shape's setters perform. Returns
/// `false` when no field matches the column name and value kind; the
/// caller records the drop.
///

pub trait FieldWrite: Default {
    fn write_field(&mut self, column: &str, value: &Value) -> bool;
}

///
/// PropertyWrite
///
/// Property-set target: like [`FieldWrite`], but assignment goes through
/// the shape's setters, which may normalize or validate. Same drop
/// contract.
///

pub trait PropertyWrite: Default {
    fn write_property(&mut self, column: &str, value: &Value) -> bool;
}
