//! rumqttc adapter for `mc_settings::ConnectionSettings`.
//!
//! Turns a settings snapshot into what `rumqttc` connects with:
//! - `mqtt_options` for client id, broker address, keep-alive, session and credentials
//! - `transport` for plaintext TCP or TLS (CA file, X.509 client auth)
//! - `connect` to create the `AsyncClient` / `EventLoop` pair

pub mod error;
pub mod options;
pub mod tls;

// Re-exports for convenience.
pub use error::{MqttError, MqttResult};
pub use options::{connect, mqtt_options};
pub use tls::transport;
