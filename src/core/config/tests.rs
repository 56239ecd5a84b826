use super::data::{Config, ConfigKey};
use super::io::ConfigError;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .set(ConfigKey::Persona, "A calm butler.\nSpeak formally.".to_string())
        .unwrap();
    config
        .set(ConfigKey::Model, "gemini-1.5-pro".to_string())
        .unwrap();
    config.set(ConfigKey::HistoryWindow, "12".to_string()).unwrap();
    config.save_to_path(&config_path).expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);
    assert_eq!(
        loaded.persona.as_deref(),
        Some("A calm butler.\nSpeak formally.")
    );
    assert_eq!(loaded.history_window, Some(12));

    let mut modified = loaded;
    modified.unset(ConfigKey::Model);
    modified.save_to_path(&config_path).expect("Failed to save config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.model, None);
    assert_eq!(reloaded.history_window, Some(12));
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "persona = [unterminated").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_history_window_rejects_non_positive_values() {
    let mut config = Config::default();
    assert!(config.set(ConfigKey::HistoryWindow, "0".to_string()).is_err());
    assert!(config.set(ConfigKey::HistoryWindow, "ten".to_string()).is_err());
    assert_eq!(config.history_window, None);
    assert!(config.set(ConfigKey::HistoryWindow, " 4 ".to_string()).is_ok());
    assert_eq!(config.get(ConfigKey::HistoryWindow).as_deref(), Some("4"));
}

#[test]
fn test_zero_history_window_in_file_loads_as_unset() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "model = \"gemini-test\"\nhistory_window = 0\n").unwrap();

    let config = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(config.history_window, None);
    assert_eq!(config.model.as_deref(), Some("gemini-test"));

    let mut app = crate::core::app::new_from_config(
        crate::core::app::AppInitConfig {
            model: None,
            persona: None,
            log_file: None,
        },
        &config,
    );
    let request = app.begin_submission("Hi").expect("request prepared");
    assert_eq!(request.history, "user: Hi\n");
}

#[test]
fn test_config_keys_parse_by_name() {
    for key in ConfigKey::ALL {
        assert_eq!(ConfigKey::parse(key.as_str()), Some(key));
    }
    assert_eq!(ConfigKey::parse("default-provider"), None);
}
