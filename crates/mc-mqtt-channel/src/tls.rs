//! Transport selection and TLS material loading.
//!
//! Reads PEM files named by the settings and configures rumqttc's TLS
//! transport:
//! - no TLS: plain TCP
//! - TLS without `CaFile`: platform root certificates
//! - TLS with `CaFile`: that CA, plus the client certificate and key for X.509 auth

use rumqttc::{TlsConfiguration, Transport};

use mc_settings::{AuthType, ConnectionSettings};

use crate::error::{MqttError, MqttResult};

/// Pick the transport for the given settings.
pub fn transport(settings: &ConnectionSettings) -> MqttResult<Transport> {
    if !settings.use_tls() {
        return Ok(Transport::Tcp);
    }

    if settings.disable_crl() {
        tracing::debug!("DisableCrl has no effect, rumqttc performs no CRL checks");
    }

    let client_auth = match settings.auth() {
        AuthType::X509 => Some(load_client_auth(settings)?),
        AuthType::Basic => None,
    };

    if settings.ca_file().is_empty() {
        if client_auth.is_some() {
            return Err(MqttError::Config(
                "X509 auth requires CaFile to be set".to_string(),
            ));
        }
        return Ok(Transport::tls_with_default_config());
    }

    let ca = read_pem("CA file", settings.ca_file())?;
    Ok(Transport::tls_with_config(TlsConfiguration::Simple {
        ca,
        alpn: None,
        client_auth,
    }))
}

fn load_client_auth(settings: &ConnectionSettings) -> MqttResult<(Vec<u8>, Vec<u8>)> {
    if settings.cert_file().is_empty() || settings.key_file().is_empty() {
        return Err(MqttError::Config(
            "X509 auth requires both CertFile and KeyFile".to_string(),
        ));
    }
    if !settings.key_file_password().is_empty() {
        return Err(MqttError::Tls(
            "encrypted private keys (KeyFilePassword) are not supported".to_string(),
        ));
    }

    let cert = read_pem("client cert", settings.cert_file())?;
    let key = read_pem("client key", settings.key_file())?;
    Ok((cert, key))
}

fn read_pem(what: &str, path: &str) -> MqttResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| MqttError::Tls(format!("failed to read {what} '{path}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_when_tls_disabled() {
        let settings = ConnectionSettings::with_tls("localhost", false).unwrap();
        assert!(matches!(transport(&settings).unwrap(), Transport::Tcp));
    }

    #[test]
    fn missing_ca_file_returns_error() {
        let settings = ConnectionSettings::builder("localhost")
            .ca_file("/nonexistent/ca.pem")
            .build()
            .unwrap();
        let err = transport(&settings).err().expect("should fail");
        let msg = err.to_string();
        assert!(msg.contains("CA file"), "error should mention CA file: {msg}");
    }

    #[test]
    fn x509_requires_cert_and_key() {
        let settings = ConnectionSettings::builder("localhost")
            .auth(AuthType::X509)
            .ca_file("/nonexistent/ca.pem")
            .cert_file("/nonexistent/cert.pem")
            .build()
            .unwrap();
        let err = transport(&settings).err().expect("should fail");
        assert!(matches!(err, MqttError::Config(_)));
    }

    #[test]
    fn x509_rejects_key_password() {
        let settings = ConnectionSettings::builder("localhost")
            .auth(AuthType::X509)
            .cert_file("cert.pem")
            .key_file("cert.key")
            .key_file_password("bar")
            .build()
            .unwrap();
        let err = transport(&settings).err().expect("should fail");
        assert!(err.to_string().contains("KeyFilePassword"));
    }

    #[test]
    fn missing_client_cert_returns_error() {
        let settings = ConnectionSettings::builder("localhost")
            .auth(AuthType::X509)
            .ca_file("/nonexistent/ca.pem")
            .cert_file("/nonexistent/cert.pem")
            .key_file("/nonexistent/cert.key")
            .build()
            .unwrap();
        let msg = transport(&settings).err().expect("should fail").to_string();
        assert!(msg.contains("client cert"), "{msg}");
    }
}
