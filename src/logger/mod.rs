//! Logger module
//!
//! Provides logging utilities for freshness evaluation including:
//! - Subscriber initialisation from `LoggingConfig`
//! - Header write and short-circuit events
//! - Warnings for ignored client headers and failed response builds

pub mod writer;

use crate::config::LoggingConfig;
use hyper::StatusCode;
use std::io;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when it is set. Should be
/// called once at application startup.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer::make_writer(config.log_file.as_deref())?)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

pub fn log_header_set(name: &str, value: &str) {
    trace!(header = %name, value = %value, "response header set");
}

pub fn log_short_circuit(status: StatusCode, validator: &str) {
    debug!(status = status.as_u16(), validator = %validator, "conditional request short-circuited");
}

/// Malformed client header, treated as absent
pub fn log_ignored_header(name: &str, value: &str) {
    debug!(header = %name, value = %value, "ignoring unparseable conditional header");
}

pub fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    error!("Failed to build {status} response: {error}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_bad_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "info,freshness=notalevel".to_string(),
            log_file: None,
        };
        let err = init(&config).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
