use crate::value::{Float64, Value, ValueKind};

///
/// FieldDef
///
/// One declared entity field: name, value kind, nullability, and whether
/// bulk mutations may write it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: ValueKind,
    pub nullable: bool,
    pub readonly: bool,
}

impl FieldDef {
    #[must_use]
    pub const fn required(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            readonly: false,
        }
    }

    #[must_use]
    pub const fn nullable(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            readonly: false,
        }
    }

    /// An identity column: required, queryable, never writable.
    #[must_use]
    pub const fn key(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            readonly: true,
        }
    }

    /// A field resolved at scan time (e.g. a reference lowered to a display
    /// column). Computed fields are queryable but never writable.
    #[must_use]
    pub const fn computed(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            readonly: true,
        }
    }
}

// ============================================================================
// ENTITY CONTRACTS
// ============================================================================

///
/// EntityKind
///
/// Type-level entity contract: a stable path for diagnostics and the
/// declared field schema that predicates, order specs, group keys, and
/// mutations are validated against at plan time.
///

pub trait EntityKind: 'static {
    const PATH: &'static str;
    const FIELDS: &'static [FieldDef];

    #[must_use]
    fn field(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

///
/// FieldValues
///
/// Instance-level named field access used by predicate evaluation, sort
/// key extraction, and row building. Unknown names yield `Value::Null`;
/// plan validation keeps unknown names from reaching execution.
///

pub trait FieldValues {
    fn field_value(&self, field: &str) -> Value;
}

/// A concrete, queryable entity record.
pub trait EntityValue: EntityKind + FieldValues + Clone {}

// ============================================================================
// SCALAR CONVERSIONS
// ============================================================================

///
/// FieldValue
///
/// Scalar ⇄ `Value` conversion for primitive field types. `Option<T>`
/// maps absence to `Value::Null` in both directions.
///

pub trait FieldValue: Sized {
    const KIND: ValueKind;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for u64 {
    const KIND: ValueKind = ValueKind::Uint;

    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(Float64::new(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v.get()),
            _ => None,
        }
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

///
/// TESTS
///
