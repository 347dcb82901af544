//! Configuration errors shared by every harness component.

use thiserror::Error;

/// Errors raised while loading or validating startup configuration.
///
/// All of these are fatal: they are detected before any socket is opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid endpoint '{0}': expected host:port or tcp://host:port")]
    InvalidEndpoint(String),

    #[error("Invalid duration '{0}': expected a number with an optional ms/s/m/h suffix")]
    InvalidDuration(String),

    #[error("No {0} endpoints configured")]
    EmptyEndpoints(&'static str),

    #[error("Batch size must be at least 1")]
    ZeroBatchSize,

    #[error("Report interval must be at least 1 message")]
    ZeroReportInterval,

    #[error("Report cadence must be greater than zero")]
    ZeroReportCadence,

    #[error("Connect timeout must be greater than zero")]
    ZeroConnectTimeout,
}
