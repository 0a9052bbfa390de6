//! Telemetry module
//!
//! Structured logging via `tracing`

mod logging;

pub use crate::config::LogFormat;
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize telemetry from configuration
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
