//! Core runtime for RosterDB: the canonical value model, predicate algebra,
//! validated query plans, executors, projection strategies, and the
//! vocabulary exported via the `prelude`.

pub mod error;
pub mod executor;
pub mod obs;
pub mod predicate;
pub mod projection;
pub mod query;
pub mod traits;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        predicate::{AbsentPolicy, CompareOp, Predicate},
        query::{
            AggregateKind, AggregateSpec, DeleteQuery, Direction, NullOrder, Query, UpdateQuery,
        },
        traits::{EntityKind, EntityValue, FieldDef, FieldValue, FieldValues},
        value::{Value, ValueKind},
    };
}
