//! Engine configuration, from defaults or the environment.

use tracing::warn;

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    std::env::var("CONCORDIA_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Tunables of the consensus pipeline and its evaluation loop.
#[derive(Debug, Clone)]
pub struct Config {
    /// Window within which opposing signals for the same instrument are
    /// considered in conflict.
    pub conflict_window_seconds: i64,
    /// Minimum side probability required to resolve a conflict.
    pub min_consensus: f64,
    /// Minimum confidence a signal needs to reach the final set.
    pub min_confidence_threshold: f64,
    /// Evaluation loop interval. 0 disables the scheduler.
    pub evaluation_interval_seconds: u64,
    pub symbols: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conflict_window_seconds: 300,
            min_consensus: 0.60,
            min_confidence_threshold: 0.70,
            evaluation_interval_seconds: 60,
            symbols: vec!["BTC-USD".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from `CONCORDIA_*` environment variables (with
    /// `.env` support), falling back to the defaults for anything missing
    /// or unparsable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            conflict_window_seconds: parse_var(
                "CONCORDIA_CONFLICT_WINDOW_SECONDS",
                defaults.conflict_window_seconds,
            ),
            min_consensus: parse_var("CONCORDIA_MIN_CONSENSUS", defaults.min_consensus),
            min_confidence_threshold: parse_var(
                "CONCORDIA_MIN_CONFIDENCE",
                defaults.min_confidence_threshold,
            ),
            evaluation_interval_seconds: parse_var(
                "CONCORDIA_EVALUATION_INTERVAL_SECONDS",
                defaults.evaluation_interval_seconds,
            ),
            symbols: std::env::var("CONCORDIA_SYMBOLS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .ok()
                .filter(|symbols: &Vec<String>| !symbols.is_empty())
                .unwrap_or(defaults.symbols),
        }
    }
}

fn parse_var<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "unparsable value, using default");
            default
        }),
        Err(_) => default,
    }
}
