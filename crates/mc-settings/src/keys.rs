//! Canonical key names shared by connection strings and environment sources.
//!
//! Keys are matched case-sensitively. `ALL` lists them in schema-declaration
//! order, which is also the order fields are read in.

pub const HOST_NAME: &str = "HostName";
pub const CLIENT_ID: &str = "ClientId";
pub const TCP_PORT: &str = "TcpPort";
pub const USE_TLS: &str = "UseTls";
pub const CLEAN_SESSION: &str = "CleanSession";
pub const KEEP_ALIVE_IN_SECONDS: &str = "KeepAliveInSeconds";
pub const AUTH: &str = "Auth";
pub const DISABLE_CRL: &str = "DisableCrl";
pub const CA_FILE: &str = "CaFile";
pub const CERT_FILE: &str = "CertFile";
pub const KEY_FILE: &str = "KeyFile";
pub const KEY_FILE_PASSWORD: &str = "KeyFilePassword";
pub const USER_NAME: &str = "UserName";
pub const PASSWORD: &str = "Password";

pub const ALL: [&str; 14] = [
    HOST_NAME,
    CLIENT_ID,
    TCP_PORT,
    USE_TLS,
    CLEAN_SESSION,
    KEEP_ALIVE_IN_SECONDS,
    AUTH,
    DISABLE_CRL,
    CA_FILE,
    CERT_FILE,
    KEY_FILE,
    KEY_FILE_PASSWORD,
    USER_NAME,
    PASSWORD,
];

/// Whether `key` is part of the settings schema.
pub fn is_known(key: &str) -> bool {
    ALL.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_case_sensitive() {
        assert!(is_known("HostName"));
        assert!(is_known("UserName"));
        assert!(!is_known("hostname"));
        assert!(!is_known("Username"));
        assert!(!is_known("Foo"));
    }
}
