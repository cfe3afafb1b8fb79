//! E2E tests against the real process environment.
//!
//! Kept in their own test binary as a single test: the process environment
//! is shared by every thread of the binary.

mod helpers;

use helpers::fixture;
use mc_settings::{ConnectionSettings, EnvFileSource, EnvSource, SettingsError, StdEnvSource};

const FILE_AND_PROCESS: &str = "MC_E2E_FILE_AND_PROCESS";
const PROCESS_ONLY: &str = "MC_E2E_PROCESS_ONLY";

fn set(name: &str, value: &str) {
    // SAFETY: the only test in this binary, no other thread reads the environment.
    unsafe { std::env::set_var(name, value) };
}

fn unset(name: &str) {
    // SAFETY: as in `set`.
    unsafe { std::env::remove_var(name) };
}

#[test]
fn e2e_process_environment() {
    // Fallback: file values win, the process fills names the file leaves out.
    set(FILE_AND_PROCESS, "from_process");
    set(PROCESS_ONLY, "from_process");
    let source = EnvFileSource::parse(&format!("{FILE_AND_PROCESS}=from_file\n"))
        .unwrap()
        .with_process_fallback();
    assert_eq!(source.get(FILE_AND_PROCESS).as_deref(), Some("from_file"));
    assert_eq!(source.get(PROCESS_ONLY).as_deref(), Some("from_process"));
    assert_eq!(StdEnvSource.get(PROCESS_ONLY).as_deref(), Some("from_process"));
    unset(FILE_AND_PROCESS);
    unset(PROCESS_ONLY);

    // The same precedence through `from_env_file` with schema keys.
    set("HostName", "process.example.com");
    set("ClientId", "process_client");
    let cs = ConnectionSettings::from_env_file(fixture("min_settings.txt")).unwrap();
    assert_eq!(cs.host_name(), "localhost");
    assert_eq!(cs.client_id(), "process_client");
    assert!(!cs.clean_session());

    // `from_env` reads the process environment strictly.
    set("TcpPort", "1883");
    let cs = ConnectionSettings::from_env().unwrap();
    assert_eq!(cs.host_name(), "process.example.com");
    assert_eq!(cs.client_id(), "process_client");
    assert_eq!(cs.tcp_port(), 1883);

    set("TcpPort", "not_a_number");
    let err = ConnectionSettings::from_env().unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue { key: "TcpPort", .. }));

    for name in ["HostName", "ClientId", "TcpPort"] {
        unset(name);
    }
    let err = ConnectionSettings::from_env().unwrap_err();
    assert!(matches!(err, SettingsError::MissingField("HostName")));
}
