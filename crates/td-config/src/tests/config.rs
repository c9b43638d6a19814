use crate::Config;

use std::io::Write;

use log::LevelFilter;

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert!(!config.auth.enabled);
    assert_eq!(config.database.file, "taskdeck.db");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_toml() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 8080

        [auth]
        enabled = true
        jwt_secret = "test-secret"

        [logging]
        level = "debug"
        colored = false
    "#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert!(config.auth.enabled);
    assert_eq!(config.auth.jwt_secret.as_deref(), Some("test-secret"));
    assert_eq!(config.logging.level.0, LevelFilter::Debug);
    assert!(!config.logging.colored);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert!(!config.auth.enabled);
}

#[test]
fn test_auth_enabled_without_secret_is_invalid() {
    let config: Config = toml::from_str("[auth]\nenabled = true\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_toml_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    // load_toml is private; go through from_str the way Config::load does
    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert!(toml::from_str::<Config>(&contents).is_err());
}
