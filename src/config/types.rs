// Configuration types module
// Defines all configuration-related data structures

use crate::relay::Polarity;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Relay hardware configuration
///
/// `polarity` depends on how the relay board is wired to the pin: most
/// bare relay modules switch on a low line, so the default is active-low.
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    /// BCM pin number driving the relay
    pub pin: u8,
    pub polarity: Polarity,
    /// Pulse width in milliseconds
    pub pulse_ms: u64,
}

impl RelayConfig {
    pub const fn pulse_width(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

/// Static asset paths, read fully into memory at startup
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Control page served on "/"
    pub page: String,
    /// Button image served on "/button.png"
    pub button: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}
