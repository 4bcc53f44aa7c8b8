//! Prometheus collectors for driver operations.
//!
//! Collectors are process-wide; embedders expose them by registering into
//! their own [`Registry`] with [`register_custom_metrics`].

use lazy_static::lazy_static;
use prometheus::exponential_buckets;
use prometheus::Histogram;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;
use tracing::warn;

mod timer;

pub(crate) use timer::OperationTimer;


lazy_static! {
    pub static ref DRIVER_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("driver_operations_total", "Completed driver operations by kind and outcome"),
        &["operation", "outcome"]
    )
    .expect("metric can not be created");

    pub static ref OPERATION_LATENCY: HistogramVec = HistogramVec::new(
        HistogramOpts::new("driver_operation_latency_ms", "Driver operation latency in ms")
            .buckets(exponential_buckets(0.05, 2.0, 16).expect("valid buckets")),
        &["operation"]
    )
    .expect("metric can not be created");

    pub static ref BATCH_KEYS: Histogram = Histogram::with_opts(
        HistogramOpts::new("driver_batch_keys", "Number of keys per batch get")
            .buckets(exponential_buckets(1.0, 2.0, 12).expect("valid buckets"))
    )
    .expect("metric can not be created");

    pub static ref BATCH_MISSES: IntCounter = IntCounter::new(
        "driver_batch_misses_total",
        "Keys reported missing by successful batch gets"
    )
    .expect("metric can not be created");
}

pub fn register_custom_metrics(registry: &Registry) {
    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(DRIVER_OPERATIONS.clone()),
        Box::new(OPERATION_LATENCY.clone()),
        Box::new(BATCH_KEYS.clone()),
        Box::new(BATCH_MISSES.clone()),
    ];
    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            warn!("collector can not be registered: {:?}", e);
        }
    }
}

pub(crate) fn record_operation(
    operation: &str,
    outcome: &str,
) {
    DRIVER_OPERATIONS.with_label_values(&[operation, outcome]).inc();
}
