//! mc-settings: load MQTT connection settings and print their canonical form.
//!
//! Exits non-zero when the settings cannot be loaded, so it doubles as a
//! pre-flight check for env files and TOML configs before a client starts.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mc_settings_cli::cli::Args;
use mc_settings_cli::report;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    let settings = args.input().load()?;
    tracing::info!(
        host = %settings.host_name(),
        port = settings.tcp_port(),
        "settings loaded"
    );

    if args.json {
        println!("{}", report::json(&settings)?);
    } else {
        println!("{}", report::canonical(&settings));
    }

    if args.mqtt {
        println!("{}", report::mqtt_summary(&settings)?);
    }

    Ok(())
}
