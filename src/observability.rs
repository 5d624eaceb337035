use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

// ── Outcome metrics ─────────────────────────────────────────────

/// Counter: rides accepted by `publish_ride`.
pub const RIDES_PUBLISHED_TOTAL: &str = "ridepool_rides_published_total";

/// Counter: seats taken by `book_seat`.
pub const SEATS_BOOKED_TOTAL: &str = "ridepool_seats_booked_total";

/// Counter: rejected mutations. Labels: operation, reason.
pub const REJECTIONS_TOTAL: &str = "ridepool_rejections_total";

// ── State / latency ─────────────────────────────────────────────

/// Gauge: rides currently held by the engine.
pub const RIDES_TOTAL: &str = "ridepool_rides_total";

/// Histogram: time spent holding the ride lock, in seconds. Labels: operation.
pub const OPERATION_DURATION_SECONDS: &str = "ridepool_operation_duration_seconds";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Install a `fmt` tracing subscriber. Returns false if one was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt().try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_without_port_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn init_tracing_twice_does_not_panic() {
        init_tracing();
        assert!(!init_tracing());
    }
}
