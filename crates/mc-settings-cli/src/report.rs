//! Rendering loaded settings for the terminal.
//!
//! Secrets are always masked; the output is meant for logs and bug reports.

use rumqttc::Transport;

use mc_settings::ConnectionSettings;

/// Canonical `Key=Value;...` string with secrets masked.
pub fn canonical(settings: &ConnectionSettings) -> String {
    settings.redacted().to_connection_string()
}

/// Pretty JSON with secrets masked.
pub fn json(settings: &ConnectionSettings) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&settings.redacted())
}

/// One-line summary of the rumqttc options the settings produce.
pub fn mqtt_summary(settings: &ConnectionSettings) -> mc_mqtt_channel::MqttResult<String> {
    let options = mc_mqtt_channel::mqtt_options(settings)?;
    let (host, port) = options.broker_address();
    let transport = match options.transport() {
        Transport::Tcp => "tcp",
        Transport::Tls(_) => "tls",
        _ => "other",
    };
    Ok(format!(
        "mqtt: client_id={} broker={host}:{port} transport={transport} keep_alive={}s clean_session={} credentials={}",
        options.client_id(),
        options.keep_alive().as_secs(),
        options.clean_session(),
        options.credentials().is_some(),
    ))
}
