use crate::obs::sink::{ExecKind, MetricsEvent};
use std::cell::RefCell;

thread_local! {
    static COUNTERS: RefCell<EventReport> = const { RefCell::new(EventReport::new()) };
}

///
/// EventReport
///
/// Point-in-time snapshot of the per-thread execution counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EventReport {
    pub loads: u64,
    pub aggregates: u64,
    pub updates: u64,
    pub deletes: u64,
    pub rows_scanned: u64,
    pub rows_touched: u64,
    pub projection_fields_dropped: u64,
}

impl EventReport {
    const fn new() -> Self {
        Self {
            loads: 0,
            aggregates: 0,
            updates: 0,
            deletes: 0,
            rows_scanned: 0,
            rows_touched: 0,
            projection_fields_dropped: 0,
        }
    }
}

pub(crate) fn record(event: MetricsEvent) {
    COUNTERS.with(|counters| {
        let mut counters = counters.borrow_mut();
        match event {
            MetricsEvent::ExecStart { .. } => {}
            MetricsEvent::ExecFinish {
                kind, rows_touched, ..
            } => {
                match kind {
                    ExecKind::Load => counters.loads += 1,
                    ExecKind::Aggregate => counters.aggregates += 1,
                    ExecKind::Update => counters.updates += 1,
                    ExecKind::Delete => counters.deletes += 1,
                }
                counters.rows_touched += rows_touched;
            }
            MetricsEvent::RowsScanned { rows_scanned, .. } => {
                counters.rows_scanned += rows_scanned;
            }
            MetricsEvent::ProjectionFieldDropped { .. } => {
                counters.projection_fields_dropped += 1;
            }
        }
    });
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    COUNTERS.with(|counters| *counters.borrow())
}

/// Reset the current thread's counters to zero.
pub fn metrics_reset_all() {
    COUNTERS.with(|counters| *counters.borrow_mut() = EventReport::new());
}
