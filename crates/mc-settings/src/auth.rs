//! Authentication scheme used when connecting to the broker.

use serde::{Deserialize, Serialize};

/// How the client authenticates against the broker.
///
/// Parsed and displayed by exact member name (`Basic`, `X509`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// Username and password in the CONNECT packet.
    #[default]
    Basic,
    /// X.509 client certificate presented during the TLS handshake.
    X509,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::X509 => "X509",
        }
    }

    /// Look up a member by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Basic" => Some(Self::Basic),
            "X509" => Some(Self::X509),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
