pub mod config;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig};
pub use telemetry::{init_telemetry, TelemetryConfig};
