//! The `ConnectionSettings` snapshot and its entry points.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::AuthType;
use crate::coerce::{FieldReader, Policy};
use crate::error::{SettingsError, SettingsResult};
use crate::keys;
use crate::source::{ConnectionStringSource, EnvFileSource, EnvSource, StdEnvSource};

/// Default broker port (MQTT over TLS).
pub const DEFAULT_TCP_PORT: u16 = 8883;

/// Default keep-alive interval in seconds.
pub const DEFAULT_KEEP_ALIVE_SECS: u16 = 30;

/// Everything an MQTT client needs to open a connection.
///
/// Immutable once built. `host_name` is always non-empty; every other field
/// has a fixed default. Deserializing goes through the same validation as
/// the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawConnectionSettings")]
pub struct ConnectionSettings {
    host_name: String,
    client_id: String,
    tcp_port: u16,
    use_tls: bool,
    clean_session: bool,
    keep_alive_in_seconds: u16,
    auth: AuthType,
    disable_crl: bool,
    ca_file: String,
    cert_file: String,
    key_file: String,
    key_file_password: String,
    #[serde(rename = "UserName")]
    username: String,
    password: String,
}

/// Unvalidated serde form of `ConnectionSettings`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawConnectionSettings {
    host_name: String,
    #[serde(default)]
    client_id: String,
    #[serde(default = "default_tcp_port")]
    tcp_port: u16,
    #[serde(default = "default_true")]
    use_tls: bool,
    #[serde(default = "default_true")]
    clean_session: bool,
    #[serde(default = "default_keep_alive")]
    keep_alive_in_seconds: u16,
    #[serde(default)]
    auth: AuthType,
    #[serde(default)]
    disable_crl: bool,
    #[serde(default)]
    ca_file: String,
    #[serde(default)]
    cert_file: String,
    #[serde(default)]
    key_file: String,
    #[serde(default)]
    key_file_password: String,
    #[serde(default, rename = "UserName")]
    username: String,
    #[serde(default)]
    password: String,
}

impl TryFrom<RawConnectionSettings> for ConnectionSettings {
    type Error = SettingsError;

    fn try_from(raw: RawConnectionSettings) -> SettingsResult<Self> {
        Self {
            host_name: raw.host_name,
            client_id: raw.client_id,
            tcp_port: raw.tcp_port,
            use_tls: raw.use_tls,
            clean_session: raw.clean_session,
            keep_alive_in_seconds: raw.keep_alive_in_seconds,
            auth: raw.auth,
            disable_crl: raw.disable_crl,
            ca_file: raw.ca_file,
            cert_file: raw.cert_file,
            key_file: raw.key_file,
            key_file_password: raw.key_file_password,
            username: raw.username,
            password: raw.password,
        }
        .validate()
    }
}

fn default_tcp_port() -> u16 {
    DEFAULT_TCP_PORT
}

fn default_keep_alive() -> u16 {
    DEFAULT_KEEP_ALIVE_SECS
}

fn default_true() -> bool {
    true
}

impl ConnectionSettings {
    /// Settings for `host_name` with every other field at its default.
    pub fn new(host_name: impl Into<String>) -> SettingsResult<Self> {
        ConnectionSettingsBuilder::new(host_name).build()
    }

    /// Same as `new`, with TLS explicitly on or off.
    pub fn with_tls(host_name: impl Into<String>, use_tls: bool) -> SettingsResult<Self> {
        ConnectionSettingsBuilder::new(host_name)
            .use_tls(use_tls)
            .build()
    }

    pub fn builder(host_name: impl Into<String>) -> ConnectionSettingsBuilder {
        ConnectionSettingsBuilder::new(host_name)
    }

    /// Parse a `Key=Value;...` connection string.
    ///
    /// Unknown keys are ignored. A value that fails to coerce leaves its
    /// field at the default instead of failing the parse; only a missing
    /// `HostName` is an error.
    pub fn from_connection_string(input: &str) -> SettingsResult<Self> {
        let source = ConnectionStringSource::parse(input);
        for (key, _) in source.pairs().filter(|(key, _)| !keys::is_known(key)) {
            tracing::trace!(key, "ignoring unrecognized connection string key");
        }
        Self::load(&source, Policy::Lenient)
    }

    /// Build from the process environment.
    ///
    /// Variables use the connection string key names. A value that fails to
    /// coerce is an error.
    pub fn from_env() -> SettingsResult<Self> {
        Self::from_env_source(&StdEnvSource)
    }

    /// Build from any environment source, failing on the first malformed
    /// value in schema-declaration order (see `keys::ALL`).
    pub fn from_env_source<S: EnvSource + ?Sized>(source: &S) -> SettingsResult<Self> {
        Self::load(source, Policy::Strict)
    }

    /// Build from an env file of `NAME=value` lines. Names the file does
    /// not set are looked up in the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let source = EnvFileSource::load(path)?.with_process_fallback();
        Self::from_env_source(&source)
    }

    /// Deserialize from a TOML document using the connection string key names.
    pub fn from_toml(input: &str) -> SettingsResult<Self> {
        let raw: RawConnectionSettings =
            toml::from_str(input).map_err(|e| SettingsError::Toml(e.to_string()))?;
        raw.try_into()
    }

    fn load<S: EnvSource + ?Sized>(source: &S, policy: Policy) -> SettingsResult<Self> {
        let r = FieldReader::new(source, policy);

        let settings = Self {
            host_name: r.read(keys::HOST_NAME, String::new())?,
            client_id: r.read(keys::CLIENT_ID, String::new())?,
            tcp_port: r.read(keys::TCP_PORT, DEFAULT_TCP_PORT)?,
            use_tls: r.read(keys::USE_TLS, true)?,
            clean_session: r.read(keys::CLEAN_SESSION, true)?,
            keep_alive_in_seconds: r.read(keys::KEEP_ALIVE_IN_SECONDS, DEFAULT_KEEP_ALIVE_SECS)?,
            auth: r.read(keys::AUTH, AuthType::default())?,
            disable_crl: r.read(keys::DISABLE_CRL, false)?,
            ca_file: r.read(keys::CA_FILE, String::new())?,
            cert_file: r.read(keys::CERT_FILE, String::new())?,
            key_file: r.read(keys::KEY_FILE, String::new())?,
            key_file_password: r.read(keys::KEY_FILE_PASSWORD, String::new())?,
            username: r.read(keys::USER_NAME, String::new())?,
            password: r.read(keys::PASSWORD, String::new())?,
        }
        .validate()?;

        tracing::debug!(
            host = %settings.host_name,
            port = settings.tcp_port,
            client_id = %settings.client_id,
            use_tls = settings.use_tls,
            auth = %settings.auth,
            "connection settings loaded"
        );
        Ok(settings)
    }

    /// `HostName` must be non-empty and must survive a trip through the
    /// canonical string: no `;` and no surrounding whitespace.
    fn validate(self) -> SettingsResult<Self> {
        let host = self.host_name.as_str();
        if host.trim().is_empty() {
            return Err(SettingsError::MissingField(keys::HOST_NAME));
        }
        if host.contains(ConnectionStringSource::FIELD_SEPARATOR) || host.trim() != host {
            return Err(SettingsError::InvalidValue {
                key: keys::HOST_NAME,
                value: self.host_name,
                expected: "host name without ';' or surrounding whitespace",
            });
        }
        Ok(self)
    }

    /// Canonical `Key=Value;...` form, identical to `Display`.
    pub fn to_connection_string(&self) -> String {
        self.to_string()
    }

    /// Copy with `Password` and `KeyFilePassword` masked, for printing.
    pub fn redacted(&self) -> Self {
        const MASK: &str = "***";
        let mask = |v: &str| {
            if v.is_empty() {
                String::new()
            } else {
                MASK.to_string()
            }
        };
        Self {
            password: mask(&self.password),
            key_file_password: mask(&self.key_file_password),
            ..self.clone()
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn tcp_port(&self) -> u16 {
        self.tcp_port
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    pub fn clean_session(&self) -> bool {
        self.clean_session
    }

    pub fn keep_alive_in_seconds(&self) -> u16 {
        self.keep_alive_in_seconds
    }

    pub fn auth(&self) -> AuthType {
        self.auth
    }

    pub fn disable_crl(&self) -> bool {
        self.disable_crl
    }

    pub fn ca_file(&self) -> &str {
        &self.ca_file
    }

    pub fn cert_file(&self) -> &str {
        &self.cert_file
    }

    pub fn key_file(&self) -> &str {
        &self.key_file
    }

    pub fn key_file_password(&self) -> &str {
        &self.key_file_password
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

impl fmt::Display for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={};{}={};{}={};{}={};{}={};{}={}",
            keys::HOST_NAME,
            self.host_name,
            keys::TCP_PORT,
            self.tcp_port,
            keys::CLEAN_SESSION,
            bool_str(self.clean_session),
            keys::KEEP_ALIVE_IN_SECONDS,
            self.keep_alive_in_seconds,
            keys::USE_TLS,
            bool_str(self.use_tls),
            keys::AUTH,
            self.auth,
        )?;

        let optional = [
            (keys::CLIENT_ID, self.client_id.as_str()),
            (keys::CERT_FILE, self.cert_file.as_str()),
            (keys::KEY_FILE, self.key_file.as_str()),
            (keys::CA_FILE, self.ca_file.as_str()),
            (keys::DISABLE_CRL, if self.disable_crl { "True" } else { "" }),
            (keys::USER_NAME, self.username.as_str()),
            (keys::PASSWORD, self.password.as_str()),
            (keys::KEY_FILE_PASSWORD, self.key_file_password.as_str()),
        ];
        for (key, value) in optional {
            if !value.is_empty() {
                write!(f, ";{key}={value}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConnectionSettings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_connection_string(s)
    }
}

// ── Builder ───────────────────────────────────────────────────

/// Owned builder for settings that differ from the defaults.
#[derive(Debug, Clone)]
pub struct ConnectionSettingsBuilder {
    inner: ConnectionSettings,
}

impl ConnectionSettingsBuilder {
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            inner: ConnectionSettings {
                host_name: host_name.into(),
                client_id: String::new(),
                tcp_port: DEFAULT_TCP_PORT,
                use_tls: true,
                clean_session: true,
                keep_alive_in_seconds: DEFAULT_KEEP_ALIVE_SECS,
                auth: AuthType::default(),
                disable_crl: false,
                ca_file: String::new(),
                cert_file: String::new(),
                key_file: String::new(),
                key_file_password: String::new(),
                username: String::new(),
                password: String::new(),
            },
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.inner.client_id = client_id.into();
        self
    }

    pub fn tcp_port(mut self, port: u16) -> Self {
        self.inner.tcp_port = port;
        self
    }

    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.inner.use_tls = use_tls;
        self
    }

    pub fn clean_session(mut self, clean_session: bool) -> Self {
        self.inner.clean_session = clean_session;
        self
    }

    pub fn keep_alive_in_seconds(mut self, secs: u16) -> Self {
        self.inner.keep_alive_in_seconds = secs;
        self
    }

    pub fn auth(mut self, auth: AuthType) -> Self {
        self.inner.auth = auth;
        self
    }

    pub fn disable_crl(mut self, disable_crl: bool) -> Self {
        self.inner.disable_crl = disable_crl;
        self
    }

    pub fn ca_file(mut self, path: impl Into<String>) -> Self {
        self.inner.ca_file = path.into();
        self
    }

    pub fn cert_file(mut self, path: impl Into<String>) -> Self {
        self.inner.cert_file = path.into();
        self
    }

    pub fn key_file(mut self, path: impl Into<String>) -> Self {
        self.inner.key_file = path.into();
        self
    }

    pub fn key_file_password(mut self, password: impl Into<String>) -> Self {
        self.inner.key_file_password = password.into();
        self
    }

    /// Username and password for `AuthType::Basic`.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.inner.username = username.into();
        self.inner.password = password.into();
        self
    }

    pub fn build(self) -> SettingsResult<ConnectionSettings> {
        self.inner.validate()
    }
}
