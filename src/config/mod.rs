// Configuration module entry point
// Layered loading: built-in defaults, then config.toml, then environment

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, LoggingConfig, PerformanceConfig, RelayConfig, ServerConfig,
};

impl Config {
    /// Load configuration from the default file ("config.toml" if present)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    ///
    /// The file is optional; anything it does not set falls back to the
    /// defaults below, and `DOOR_`-prefixed environment variables override
    /// both.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DOOR"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("relay.pin", 4)?
            .set_default("relay.polarity", "active-low")?
            .set_default("relay.pulse_ms", 300)?
            .set_default("assets.page", "static/root.html")?
            .set_default("assets.button", "static/button.png")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
