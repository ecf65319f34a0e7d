mod intent;
mod mutation;
mod plan;
mod spec;
mod validate;

pub use intent::{Query, QueryError};
pub use mutation::{DeleteQuery, UpdateQuery};
pub use plan::{MutationOp, MutationPlan, QueryPlan};
pub use spec::{
    AggregateKind, AggregateSpec, Change, Direction, GroupSpec, NullOrder, OrderKey, OrderSpec,
    PageSpec,
};
pub use validate::PlanError;
