//! Observability: runtime telemetry for query execution and projection.
//!
//! Engine modules report through the sink boundary only; the global
//! counters are an implementation detail behind it.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::{EventReport, metrics_report, metrics_reset_all};
pub use sink::{ExecKind, MetricsEvent, MetricsSink, with_sink};

pub(crate) use sink::emit;
