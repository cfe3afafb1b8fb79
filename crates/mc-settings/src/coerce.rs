//! Typed field reads with a lenient or strict error policy.

use crate::auth::AuthType;
use crate::error::{SettingsError, SettingsResult};
use crate::source::EnvSource;

/// What to do when a present value fails to coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Keep the field's default and continue (connection strings).
    Lenient,
    /// Fail with `SettingsError::InvalidValue` (environment sources).
    Strict,
}

/// A field type that can be coerced from its raw string form.
pub(crate) trait FieldValue: Sized {
    /// Human-readable type name used in error messages.
    const EXPECTED: &'static str;

    fn coerce(raw: &str) -> Option<Self>;
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn coerce(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FieldValue for u16 {
    const EXPECTED: &'static str = "integer (0-65535)";

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FieldValue for bool {
    const EXPECTED: &'static str = "boolean (true/false)";

    fn coerce(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FieldValue for AuthType {
    const EXPECTED: &'static str = "auth type (Basic/X509)";

    fn coerce(raw: &str) -> Option<Self> {
        AuthType::from_name(raw)
    }
}

/// Reads schema fields out of a source under a fixed policy.
pub(crate) struct FieldReader<'a, S: EnvSource + ?Sized> {
    source: &'a S,
    policy: Policy,
}

impl<'a, S: EnvSource + ?Sized> FieldReader<'a, S> {
    pub(crate) fn new(source: &'a S, policy: Policy) -> Self {
        Self { source, policy }
    }

    /// Read `key`, falling back to `default` when it is absent or empty.
    pub(crate) fn read<T: FieldValue>(&self, key: &'static str, default: T) -> SettingsResult<T> {
        let Some(raw) = self.source.get(key).filter(|v| !v.is_empty()) else {
            return Ok(default);
        };

        match T::coerce(&raw) {
            Some(value) => Ok(value),
            None => match self.policy {
                Policy::Lenient => {
                    tracing::warn!(
                        key,
                        value = %raw,
                        expected = T::EXPECTED,
                        "invalid setting value, using default"
                    );
                    Ok(default)
                }
                Policy::Strict => Err(SettingsError::InvalidValue {
                    key,
                    value: raw,
                    expected: T::EXPECTED,
                }),
            },
        }
    }
}
