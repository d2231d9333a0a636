//! Utility modules for npm-start

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
