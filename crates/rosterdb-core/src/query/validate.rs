use crate::{
    predicate::{CompareOp, ComparePredicate, FieldUse, Predicate},
    query::spec::{AggregateKind, AggregateSpec, Change, GroupSpec, OrderSpec},
    traits::{EntityKind, FieldDef},
    value::{Value, ValueKind},
};
use thiserror::Error as ThisError;

///
/// PlanError
///
/// Construction-time query/mutation defects. Every variant is raised by
/// `plan()` before anything reaches execution; malformed specs never
/// execute.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    #[error("unknown field '{field}' on {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("literal for '{field}' has kind {found}, field expects {expected}")]
    LiteralKindMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("comparison against null for '{field}'; use an is-null condition instead")]
    NullLiteral { field: String },

    #[error("operator {op:?} requires a text field, '{field}' is {found}")]
    TextOperatorOnNonText {
        field: String,
        op: CompareOp,
        found: ValueKind,
    },

    #[error("membership operator for '{field}' requires a list literal")]
    MembershipWithoutList { field: String },

    #[error("order spec has no keys")]
    EmptyOrderSpec,

    #[error("field '{field}' is not orderable")]
    UnorderableField { field: String },

    #[error("selection has no columns")]
    EmptySelection,

    #[error("group spec has no keys")]
    EmptyGroupSpec,

    #[error("grouping requires at least one aggregate selector")]
    GroupWithoutAggregate,

    #[error("aggregate {kind:?} requires a target field")]
    AggregateNeedsField { kind: AggregateKind },

    #[error("aggregate {kind:?} over '{field}' requires a numeric field, found {found}")]
    AggregateNeedsNumericField {
        kind: AggregateKind,
        field: String,
        found: ValueKind,
    },

    #[error("aggregate queries cannot also select plain columns")]
    AggregateWithSelection,

    #[error("aggregate queries cannot carry ordering or pagination")]
    AggregateWithWindow,

    #[error("update carries no changes")]
    EmptyChangeSet,

    #[error("field '{field}' is read-only")]
    ReadOnlyField { field: String },

    #[error("field '{field}' is not nullable and cannot be set to null")]
    NullIntoRequiredField { field: String },

    #[error("increment of '{field}' requires an integer field, found {found}")]
    IncrementNonInteger { field: String, found: ValueKind },
}

/// Look up a declared field or fail.
pub(crate) fn require_field<E: EntityKind>(field: &str) -> Result<&'static FieldDef, PlanError> {
    E::field(field).ok_or_else(|| PlanError::UnknownField {
        entity: E::PATH,
        field: field.to_string(),
    })
}

/// Validate every field reference and literal inside a predicate.
pub(crate) fn validate_predicate<E: EntityKind>(predicate: &Predicate) -> Result<(), PlanError> {
    let mut result = Ok(());

    predicate.for_each_field(&mut |field_use| {
        if result.is_err() {
            return;
        }
        result = match field_use {
            FieldUse::Compare(compare) => validate_compare::<E>(compare),
            FieldUse::Nullness(field) => require_field::<E>(field).map(|_| ()),
        };
    });

    result
}

fn validate_compare<E: EntityKind>(compare: &ComparePredicate) -> Result<(), PlanError> {
    let field = require_field::<E>(&compare.field)?;

    match compare.op {
        CompareOp::In | CompareOp::NotIn => {
            let Value::List(candidates) = &compare.value else {
                return Err(PlanError::MembershipWithoutList {
                    field: compare.field.clone(),
                });
            };
            for candidate in candidates {
                validate_literal(field, &compare.field, candidate)?;
            }
            Ok(())
        }
        CompareOp::Contains | CompareOp::StartsWith => {
            if field.kind == ValueKind::Text {
                Ok(())
            } else {
                Err(PlanError::TextOperatorOnNonText {
                    field: compare.field.clone(),
                    op: compare.op,
                    found: field.kind,
                })
            }
        }
        CompareOp::Eq | CompareOp::Ne | CompareOp::Lt | CompareOp::Lte | CompareOp::Gt
        | CompareOp::Gte => validate_literal(field, &compare.field, &compare.value),
    }
}

fn validate_literal(field: &FieldDef, name: &str, literal: &Value) -> Result<(), PlanError> {
    if literal.is_null() {
        return Err(PlanError::NullLiteral {
            field: name.to_string(),
        });
    }

    let found = literal.kind();
    if found == field.kind || (found.is_numeric() && field.kind.is_numeric()) {
        return Ok(());
    }

    Err(PlanError::LiteralKindMismatch {
        field: name.to_string(),
        expected: field.kind,
        found,
    })
}

pub(crate) fn validate_order<E: EntityKind>(order: &OrderSpec) -> Result<(), PlanError> {
    if order.keys.is_empty() {
        return Err(PlanError::EmptyOrderSpec);
    }

    for key in &order.keys {
        let field = require_field::<E>(&key.field)?;
        if !field.kind.is_orderable() {
            return Err(PlanError::UnorderableField {
                field: key.field.clone(),
            });
        }
    }

    Ok(())
}

pub(crate) fn validate_group<E: EntityKind>(group: &GroupSpec) -> Result<(), PlanError> {
    if group.fields.is_empty() {
        return Err(PlanError::EmptyGroupSpec);
    }

    for field in &group.fields {
        require_field::<E>(field)?;
    }

    Ok(())
}

pub(crate) fn validate_aggregate<E: EntityKind>(spec: &AggregateSpec) -> Result<(), PlanError> {
    let Some(field_name) = &spec.field else {
        if spec.kind.requires_field() {
            return Err(PlanError::AggregateNeedsField { kind: spec.kind });
        }
        return Ok(());
    };

    let field = require_field::<E>(field_name)?;

    match spec.kind {
        AggregateKind::Sum | AggregateKind::Avg => {
            if field.kind.is_numeric() {
                Ok(())
            } else {
                Err(PlanError::AggregateNeedsNumericField {
                    kind: spec.kind,
                    field: field_name.clone(),
                    found: field.kind,
                })
            }
        }
        AggregateKind::Min | AggregateKind::Max => {
            if field.kind.is_orderable() {
                Ok(())
            } else {
                Err(PlanError::UnorderableField {
                    field: field_name.clone(),
                })
            }
        }
        AggregateKind::Count => Ok(()),
    }
}

pub(crate) fn validate_changes<E: EntityKind>(changes: &[Change]) -> Result<(), PlanError> {
    if changes.is_empty() {
        return Err(PlanError::EmptyChangeSet);
    }

    for change in changes {
        let field = require_field::<E>(change.field())?;
        if field.readonly {
            return Err(PlanError::ReadOnlyField {
                field: change.field().to_string(),
            });
        }

        match change {
            Change::Set { value, .. } => {
                if value.is_null() {
                    if !field.nullable {
                        return Err(PlanError::NullIntoRequiredField {
                            field: change.field().to_string(),
                        });
                    }
                } else {
                    let found = value.kind();
                    if found != field.kind && !(found.is_numeric() && field.kind.is_numeric()) {
                        return Err(PlanError::LiteralKindMismatch {
                            field: change.field().to_string(),
                            expected: field.kind,
                            found,
                        });
                    }
                }
            }
            Change::Increment { .. } => {
                if !matches!(field.kind, ValueKind::Int | ValueKind::Uint) {
                    return Err(PlanError::IncrementNonInteger {
                        field: change.field().to_string(),
                        found: field.kind,
                    });
                }
            }
        }
    }

    Ok(())
}
