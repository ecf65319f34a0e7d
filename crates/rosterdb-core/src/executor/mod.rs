//! Module: executor
//! Responsibility: pure execution of validated plans over storage-port rows.
//! Does not own: plan construction/validation or projection typing.
//! Boundary: the only engine layer that talks to a `StoragePort`.

pub mod aggregate;
pub mod load;
pub mod mutation;

mod storage_port;

pub use aggregate::AggregateRow;
pub use storage_port::{ExecuteError, StoragePort};
