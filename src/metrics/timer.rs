use tokio::time::Instant;
use tracing::trace;

use super::OPERATION_LATENCY;

/// Measures one driver operation from creation to drop.
///
/// On drop the elapsed time goes to `driver_operation_latency_ms` under the
/// operation label and to the `timing` trace target.
pub(crate) struct OperationTimer {
    start: Instant,
    operation: &'static str,
}

impl OperationTimer {
    pub(crate) fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        OPERATION_LATENCY
            .with_label_values(&[self.operation])
            .observe(elapsed.as_secs_f64() * 1000.0);
        trace!(target: "timing", "{} took {:?}", self.operation, elapsed);
    }
}
