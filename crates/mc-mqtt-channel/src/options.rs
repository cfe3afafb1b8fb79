//! Client options built from a settings snapshot.

use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions};

use mc_settings::{AuthType, ConnectionSettings};

use crate::error::{MqttError, MqttResult};
use crate::tls;

/// Smallest keep-alive interval rumqttc accepts.
pub const MIN_KEEP_ALIVE_SECS: u16 = 5;

/// Prefix for client ids generated when the settings leave `ClientId` empty.
const GENERATED_CLIENT_ID_PREFIX: &str = "mc-";

/// Build `MqttOptions` (including the transport) from the settings.
///
/// An empty `ClientId` is replaced with a generated one as long as
/// `CleanSession` is set; a persistent session needs a stable id.
pub fn mqtt_options(settings: &ConnectionSettings) -> MqttResult<MqttOptions> {
    let client_id = client_id(settings)?;

    if settings.keep_alive_in_seconds() < MIN_KEEP_ALIVE_SECS {
        return Err(MqttError::Config(format!(
            "KeepAliveInSeconds must be at least {MIN_KEEP_ALIVE_SECS}, got {}",
            settings.keep_alive_in_seconds()
        )));
    }

    let mut options = MqttOptions::new(client_id, settings.host_name(), settings.tcp_port());
    options.set_keep_alive(Duration::from_secs(settings.keep_alive_in_seconds().into()));
    options.set_clean_session(settings.clean_session());

    if settings.auth() == AuthType::Basic && !settings.username().is_empty() {
        options.set_credentials(settings.username(), settings.password());
    }

    options.set_transport(tls::transport(settings)?);

    tracing::debug!(
        host = %settings.host_name(),
        port = settings.tcp_port(),
        client_id = %options.client_id(),
        use_tls = settings.use_tls(),
        auth = %settings.auth(),
        "MQTT options built"
    );
    Ok(options)
}

/// Create the client and its event loop. No network I/O happens until the
/// caller polls the event loop:
/// ```ignore
/// let (client, mut eventloop) = mc_mqtt_channel::connect(&settings, 64)?;
/// tokio::spawn(async move {
///     loop {
///         if let Err(e) = eventloop.poll().await {
///             tracing::error!("MQTT event loop error: {e}");
///             tokio::time::sleep(Duration::from_secs(5)).await;
///         }
///     }
/// });
/// ```
pub fn connect(settings: &ConnectionSettings, cap: usize) -> MqttResult<(AsyncClient, EventLoop)> {
    let options = mqtt_options(settings)?;
    Ok(AsyncClient::new(options, cap))
}

fn client_id(settings: &ConnectionSettings) -> MqttResult<String> {
    if !settings.client_id().is_empty() {
        return Ok(settings.client_id().to_string());
    }
    if !settings.clean_session() {
        return Err(MqttError::Config(
            "ClientId is mandatory when CleanSession is false".to_string(),
        ));
    }
    Ok(format!(
        "{GENERATED_CLIENT_ID_PREFIX}{}",
        uuid::Uuid::now_v7().simple()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rumqttc::Transport;

    fn plaintext() -> mc_settings::ConnectionSettingsBuilder {
        ConnectionSettings::builder("broker.example.com")
            .use_tls(false)
            .tcp_port(1883)
    }

    #[test]
    fn maps_address_keep_alive_and_session() {
        let settings = plaintext()
            .client_id("rpi-001")
            .keep_alive_in_seconds(45)
            .clean_session(false)
            .build()
            .unwrap();
        let options = mqtt_options(&settings).unwrap();
        assert_eq!(options.client_id(), "rpi-001");
        assert_eq!(
            options.broker_address(),
            ("broker.example.com".to_string(), 1883)
        );
        assert_eq!(options.keep_alive(), Duration::from_secs(45));
        assert!(!options.clean_session());
        assert!(matches!(options.transport(), Transport::Tcp));
    }

    #[test]
    fn basic_auth_sets_credentials() {
        let settings = plaintext()
            .client_id("rpi-001")
            .credentials("sample_user", "foo")
            .build()
            .unwrap();
        let options = mqtt_options(&settings).unwrap();
        assert_eq!(
            options.credentials(),
            Some(("sample_user".to_string(), "foo".to_string()))
        );
    }

    #[test]
    fn no_username_means_no_credentials() {
        let settings = plaintext().client_id("rpi-001").build().unwrap();
        let options = mqtt_options(&settings).unwrap();
        assert!(options.credentials().is_none());
    }

    #[test]
    fn empty_client_id_is_generated() {
        let settings = plaintext().build().unwrap();
        let options = mqtt_options(&settings).unwrap();
        assert!(options.client_id().starts_with(GENERATED_CLIENT_ID_PREFIX));
        assert!(options.client_id().len() > GENERATED_CLIENT_ID_PREFIX.len());
    }

    #[test]
    fn persistent_session_requires_client_id() {
        let settings = plaintext().clean_session(false).build().unwrap();
        let err = mqtt_options(&settings).unwrap_err();
        assert!(matches!(err, MqttError::Config(_)));
        assert!(err.to_string().contains("ClientId"));
    }

    #[test]
    fn keep_alive_below_minimum_rejected() {
        let settings = plaintext().client_id("c").keep_alive_in_seconds(2).build().unwrap();
        let err = mqtt_options(&settings).unwrap_err();
        assert!(err.to_string().contains("KeepAliveInSeconds"));
    }

    #[test]
    fn unreadable_ca_file_fails_options() {
        let settings = ConnectionSettings::builder("broker.example.com")
            .client_id("c")
            .ca_file("/nonexistent/ca.pem")
            .build()
            .unwrap();
        let err = mqtt_options(&settings).unwrap_err();
        assert!(matches!(err, MqttError::Tls(_)));
    }

    #[tokio::test]
    async fn connect_creates_client_without_io() {
        let settings = plaintext().client_id("rpi-001").build().unwrap();
        assert!(connect(&settings, 16).is_ok());
    }

    #[test]
    fn connect_propagates_settings_errors() {
        let settings = plaintext().clean_session(false).build().unwrap();
        assert!(matches!(
            connect(&settings, 16),
            Err(MqttError::Config(_))
        ));
    }
}
