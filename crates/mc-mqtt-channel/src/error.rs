//! MQTT adapter error types.

use thiserror::Error;

/// Errors that can occur while turning settings into client options.
#[derive(Debug, Error)]
pub enum MqttError {
    #[error("TLS error: {0}")]
    Tls(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for MQTT adapter results.
pub type MqttResult<T> = Result<T, MqttError>;
