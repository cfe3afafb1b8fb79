//! Key/value sources settings are read from.
//!
//! Every entry point goes through an `EnvSource`: the process environment,
//! an in-memory map, an env file, or a tokenized connection string. The
//! coercion and defaulting logic only ever sees this trait.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{SettingsError, SettingsResult};

/// Source of raw string values looked up by key.
pub trait EnvSource: Send + Sync {
    /// Get the raw value for a key.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a key is present.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

// ── Process environment ───────────────────────────────────────

/// Reads from the process environment via `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

// ── In-memory map ─────────────────────────────────────────────

/// Environment source backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add multiple variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }

    /// All variables, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

// ── Env file ──────────────────────────────────────────────────

/// Variables read from a dotenv-format file.
///
/// Parsing is delegated to `dotenvy`: `#` comments, quoting, `export`
/// prefixes and `${VAR}` substitution follow its rules. With
/// `with_process_fallback`, names the file does not set are looked up in
/// the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvFileSource {
    vars: MapEnvSource,
    process_fallback: bool,
}

impl EnvFileSource {
    /// Read and parse an env file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let iter = dotenvy::from_path_iter(path).map_err(|e| env_file_error(&label, e))?;
        let source = Self::collect(&label, iter)?;
        tracing::debug!(path = %label, vars = source.vars.len(), "env file loaded");
        Ok(source)
    }

    /// Parse env file contents already in memory.
    pub fn parse(contents: &str) -> SettingsResult<Self> {
        Self::collect("<memory>", dotenvy::from_read_iter(contents.as_bytes()))
    }

    fn collect<I>(label: &str, iter: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = Result<(String, String), dotenvy::Error>>,
    {
        let vars = iter
            .into_iter()
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| env_file_error(label, e))?;
        Ok(Self {
            vars: MapEnvSource::new().with_vars(vars),
            process_fallback: false,
        })
    }

    /// Fall back to the process environment for names the file does not set.
    pub fn with_process_fallback(mut self) -> Self {
        self.process_fallback = true;
        self
    }

    /// Variables set by the file itself, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for EnvFileSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).or_else(|| {
            if self.process_fallback {
                StdEnvSource.get(name)
            } else {
                None
            }
        })
    }
}

fn env_file_error(path: &str, err: dotenvy::Error) -> SettingsError {
    SettingsError::Io {
        path: path.to_string(),
        message: err.to_string(),
    }
}

// ── Connection string ─────────────────────────────────────────

/// Ordered `key=value` pairs tokenized from a `;`-delimited connection string.
///
/// Tokens are split on the first `=` and trimmed, so line breaks left inside
/// a multi-line string do not leak into keys or values. Empty tokens and
/// tokens without `=` are dropped. On duplicate keys the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStringSource {
    pairs: Vec<(String, String)>,
}

impl ConnectionStringSource {
    pub const FIELD_SEPARATOR: char = ';';
    pub const VALUE_SEPARATOR: char = '=';

    pub fn parse(input: &str) -> Self {
        let pairs = input
            .split(Self::FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| token.split_once(Self::VALUE_SEPARATOR))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { pairs }
    }

    /// All pairs in input order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl EnvSource for ConnectionStringSource {
    fn get(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}
