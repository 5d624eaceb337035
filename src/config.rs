use crate::limits::DEFAULT_MAX_RIDES;

/// Engine settings. Defaults suit a single office; override via environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Rides held before `publish_ride` refuses new ones.
    pub max_rides: usize,
    /// Port for the Prometheus scrape endpoint. `None` disables it.
    pub metrics_port: Option<u16>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rides: DEFAULT_MAX_RIDES,
            metrics_port: None,
        }
    }
}

impl EngineConfig {
    /// Reads `RIDEPOOL_MAX_RIDES` and `RIDEPOOL_METRICS_PORT`.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_rides = lookup("RIDEPOOL_MAX_RIDES")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_rides);
        let metrics_port = lookup("RIDEPOOL_METRICS_PORT").and_then(|s| s.parse().ok());
        Self {
            max_rides,
            metrics_port,
        }
    }
}
