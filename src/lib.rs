pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod parser;
pub mod types;

// Application use case and its ports; infrastructure adapters behind them
pub mod app;
pub mod infra;

pub mod observability;
