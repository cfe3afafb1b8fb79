//! Connection settings error types.

use thiserror::Error;

/// Errors that can occur while building connection settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for '{key}': '{value}' is not a valid {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("TOML error: {0}")]
    Toml(String),
}

/// Convenience alias for settings results.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_key_and_value() {
        let err = SettingsError::InvalidValue {
            key: "TcpPort",
            value: "abc".into(),
            expected: "integer (0-65535)",
        };
        let msg = err.to_string();
        assert!(msg.contains("TcpPort"), "{msg}");
        assert!(msg.contains("'abc'"), "{msg}");
    }

    #[test]
    fn missing_field_message() {
        let err = SettingsError::MissingField("HostName");
        assert_eq!(err.to_string(), "missing required field: HostName");
    }
}
