//! Metrics sink boundary.
//!
//! Engine logic MUST NOT depend on `obs::metrics` directly. All
//! instrumentation flows through `MetricsEvent` and `MetricsSink`; this
//! module is the only bridge between execution logic and the global
//! metrics state.

use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Load,
    Aggregate,
    Update,
    Delete,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity_path: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity_path: &'static str,
        rows_touched: u64,
    },
    RowsScanned {
        entity_path: &'static str,
        rows_scanned: u64,
    },
    ProjectionFieldDropped {
        target: &'static str,
        column: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// Route one event to the active sink (test override or global counters).
pub(crate) fn emit(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|slot| *slot.borrow());

    match sink {
        // Valid for the duration of `with_sink`, which restores the
        // previous slot before the reference can dangle.
        Some(sink) => unsafe { (*sink).record(event) },
        None => metrics::record(event),
    }
}

/// Run `f` with every metrics event routed to `sink` on this thread.
pub fn with_sink<R>(sink: &dyn MetricsSink, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<*const dyn MetricsSink>);

    impl Drop for Restore {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|slot| *slot.borrow_mut() = self.0);
        }
    }

    // SAFETY: erase the reference lifetime to store it as a raw pointer. The
    // `Restore` guard below clears the slot before `sink` can dangle, so the
    // pointer is never dereferenced outside `f`'s borrow of `sink`.
    let sink_ptr: *const dyn MetricsSink = unsafe { std::mem::transmute(sink) };
    let previous = SINK_OVERRIDE.with(|slot| slot.borrow_mut().replace(sink_ptr));
    let _restore = Restore(previous);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for Capture {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    #[test]
    fn override_captures_and_restores() {
        let capture = Capture::default();

        with_sink(&capture, || {
            emit(MetricsEvent::RowsScanned {
                entity_path: "test::sample",
                rows_scanned: 3,
            });
        });

        assert_eq!(capture.0.borrow().len(), 1);

        // Outside the scope, events fall through to the global counters.
        metrics::metrics_reset_all();
        emit(MetricsEvent::RowsScanned {
            entity_path: "test::sample",
            rows_scanned: 2,
        });
        assert_eq!(capture.0.borrow().len(), 1);
        assert_eq!(metrics::metrics_report().rows_scanned, 2);
        metrics::metrics_reset_all();
    }
}
