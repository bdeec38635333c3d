use vitalwatch_core::error::CoreError;

/// Error type for the monitoring layer.
///
/// Wraps [`CoreError`] for boundary validation failures and adds
/// parsing and configuration variants.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A domain-level error from `vitalwatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input that could not be parsed, with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An environment override that could not be parsed or is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type alias for monitor return values.
pub type MonitorResult<T> = Result<T, MonitorError>;
