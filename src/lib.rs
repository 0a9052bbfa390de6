//! exmo-indicator: EXMO public market data and moving averages
//!
//! This library provides:
//! - A typed client for the public EXMO v1 REST API
//! - SMA/EMA indicators over candle close prices
//! - TOML configuration and structured logging for the CLI

pub mod cli;
pub mod config;
pub mod exchange;
pub mod indicator;
pub mod telemetry;
