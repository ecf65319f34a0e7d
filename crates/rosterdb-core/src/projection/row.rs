use crate::{
    projection::ProjectError,
    traits::{FieldDef, FieldValue},
    value::Value,
};
use derive_more::{Deref, IntoIterator};

///
/// Row
///
/// One flat result row: ordered values, positionally aligned with a
/// [`RowShape`].
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn value(&self, position: usize) -> Option<&Value> {
        self.0.get(position)
    }

    /// Typed positional extraction, used by constructor-strategy mappers.
    pub fn get<T: FieldValue>(&self, position: usize) -> Result<T, ProjectError> {
        let value = self.value(position).ok_or(ProjectError::Extract {
            position,
            expected: T::KIND,
        })?;

        T::from_value(value).ok_or(ProjectError::Extract {
            position,
            expected: T::KIND,
        })
    }
}

///
/// RowShape
///
/// The ordered column layout shared by every row of one result set.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowShape {
    columns: Vec<FieldDef>,
}

impl RowShape {
    #[must_use]
    pub const fn new(columns: Vec<FieldDef>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[FieldDef] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

///
/// RowSet
///

#[derive(Clone, Debug)]
pub struct RowSet {
    pub shape: RowShape,
    pub rows: Vec<Row>,
}
