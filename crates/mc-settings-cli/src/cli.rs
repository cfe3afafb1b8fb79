//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use mc_settings::{ConnectionSettings, SettingsError, SettingsResult};

/// Where the settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    ConnectionString(String),
    Env,
    EnvFile(PathBuf),
    Toml(PathBuf),
}

impl Input {
    /// Load settings with the error policy of the chosen entry point.
    pub fn load(&self) -> SettingsResult<ConnectionSettings> {
        match self {
            Self::ConnectionString(cs) => ConnectionSettings::from_connection_string(cs),
            Self::Env => ConnectionSettings::from_env(),
            Self::EnvFile(path) => ConnectionSettings::from_env_file(path),
            Self::Toml(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                ConnectionSettings::from_toml(&contents)
            }
        }
    }
}

/// Load MQTT connection settings and print their canonical form.
#[derive(Debug, Parser)]
#[command(name = "mc-settings", version, about)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["connection_string", "env", "env_file", "toml"])
))]
pub struct Args {
    /// `Key=Value;...` connection string (lenient: bad values keep defaults).
    pub connection_string: Option<String>,

    /// Read settings from the process environment.
    #[arg(long)]
    pub env: bool,

    /// Read settings from a dotenv file, falling back to the environment.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Read settings from a TOML file.
    #[arg(long, value_name = "PATH")]
    pub toml: Option<PathBuf>,

    /// Print JSON instead of the canonical string.
    #[arg(long)]
    pub json: bool,

    /// Also build rumqttc options and report the result.
    #[arg(long)]
    pub mqtt: bool,
}

impl Args {
    /// The selected input. The `input` group guarantees exactly one is set.
    pub fn input(&self) -> Input {
        if let Some(cs) = &self.connection_string {
            Input::ConnectionString(cs.clone())
        } else if let Some(path) = &self.env_file {
            Input::EnvFile(path.clone())
        } else if let Some(path) = &self.toml {
            Input::Toml(path.clone())
        } else {
            Input::Env
        }
    }
}
