//! MQTT connection settings.
//!
//! Provides the strongly-typed settings snapshot an MQTT client connects with:
//! - `ConnectionSettings` built from a host name, a `;`-delimited connection
//!   string, an environment source, or a TOML document
//! - `EnvSource` implementations for the process environment, in-memory maps,
//!   and dotenv files
//! - canonical `Key=Value;...` serialization via `Display`
//!
//! Connection strings are parsed leniently (a malformed field keeps its
//! default), environment sources strictly (a malformed field is an error).

pub mod auth;
pub mod error;
pub mod keys;
pub mod settings;
pub mod source;

mod coerce;

// Re-exports for convenience.
pub use auth::AuthType;
pub use error::{SettingsError, SettingsResult};
pub use settings::{ConnectionSettings, ConnectionSettingsBuilder};
pub use source::{ConnectionStringSource, EnvFileSource, EnvSource, MapEnvSource, StdEnvSource};
