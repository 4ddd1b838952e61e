//! Tests for configuration resolution
//!
//! Priority order: command line → environment → TOML → compiled default.
//! Tests that touch FYYUR_* environment variables are marked #[serial].

use fyyur_common::config::{
    default_database_path, resolve_config_path, CliOverrides, ServiceConfig, TomlConfig,
    DEFAULT_HOST, DEFAULT_PORT, ENV_CONFIG, ENV_DATABASE, ENV_HOST, ENV_PORT,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn clear_env() {
    for var in [ENV_CONFIG, ENV_HOST, ENV_PORT, ENV_DATABASE] {
        env::remove_var(var);
    }
}

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let config = ServiceConfig::resolve(CliOverrides::default(), &TomlConfig::default()).unwrap();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database_path, default_database_path());
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();
    let file = toml_file(
        "host = \"0.0.0.0\"\nport = 8080\ndatabase_path = \"/tmp/fyyur-toml.db\"\nlog_level = \"debug\"\n",
    );

    let toml_config = TomlConfig::load_or_default(Some(file.path()));
    let config = ServiceConfig::resolve(CliOverrides::default(), &toml_config).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-toml.db"));
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_PORT, "7000");
    env::set_var(ENV_DATABASE, "/tmp/fyyur-env.db");

    let toml_config = TomlConfig {
        port: Some(8080),
        database_path: Some(PathBuf::from("/tmp/fyyur-toml.db")),
        ..TomlConfig::default()
    };
    let config = ServiceConfig::resolve(CliOverrides::default(), &toml_config).unwrap();

    assert_eq!(config.port, 7000);
    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-env.db"));

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_HOST, "10.0.0.1");
    env::set_var(ENV_PORT, "7000");

    let cli = CliOverrides {
        host: Some("192.168.1.5".to_string()),
        port: Some(9000),
        database: Some(PathBuf::from("/tmp/fyyur-cli.db")),
    };
    let config = ServiceConfig::resolve(cli, &TomlConfig::default()).unwrap();

    assert_eq!(config.host, "192.168.1.5");
    assert_eq!(config.port, 9000);
    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-cli.db"));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_port_is_config_error() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let result = ServiceConfig::resolve(CliOverrides::default(), &TomlConfig::default());
    assert!(result.is_err());

    clear_env();
}

#[test]
fn test_malformed_toml_falls_back_to_defaults() {
    let file = toml_file("port = \"eighty\"\n[[[");

    assert!(TomlConfig::load(file.path()).is_err());
    assert_eq!(TomlConfig::load_or_default(Some(file.path())), TomlConfig::default());
}

#[test]
fn test_missing_toml_falls_back_to_defaults() {
    let missing = Path::new("/nonexistent/fyyur/config.toml");
    assert_eq!(TomlConfig::load_or_default(Some(missing)), TomlConfig::default());
}

#[test]
#[serial]
fn test_config_path_priority() {
    clear_env();

    let explicit = PathBuf::from("/tmp/explicit.toml");
    assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));

    env::set_var(ENV_CONFIG, "/tmp/from-env.toml");
    assert_eq!(resolve_config_path(None), Some(PathBuf::from("/tmp/from-env.toml")));

    clear_env();
}
