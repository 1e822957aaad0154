use articles_client::config::{AuthScheme, Config, ConfigError};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:9000/api");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.api.scheme(), AuthScheme::Raw);
    assert!(config.session.path.is_none());
    assert!(config
        .session
        .resolved_path()
        .ends_with("articles-client/session.json"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_location() {
    let path = Config::config_path();
    assert!(path.ends_with("articles-client/config.toml"));
}

#[test]
fn test_full_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"[api]
base_url = "https://articles.example.com/api"
timeout_seconds = 10
connect_timeout_seconds = 2
auth_scheme = "bearer"

[session]
path = "/var/tmp/articles-session.json"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://articles.example.com/api");
    assert_eq!(config.api.timeout_seconds, 10);
    assert_eq!(config.api.scheme(), AuthScheme::Bearer);
    assert_eq!(
        config.session.resolved_path(),
        std::path::PathBuf::from("/var/tmp/articles-session.json")
    );
}

#[test]
fn test_empty_file_is_all_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:9000/api");
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nbase_url = \"localhost:9000\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\ntimeout_seconds = \"ten\"\n").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}
