use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert_eq!(config.manifest, "workspace.toml");
    assert_eq!(config.output.format, "toml");
    assert!(config.activation.properties.is_empty());
}

#[test]
fn test_app_config_load_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&config_path, "[activation]\nproperties = [\"native\"]\n")
        .expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.manifest, "workspace.toml");
    assert_eq!(config.output.format, "toml");
    assert_eq!(config.activation.properties, vec!["native".to_string()]);
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");

    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_composer.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_or_default_without_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    let config = AppConfig::load_or_default(&config_path).expect("defaults");

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_app_config_load_or_default_rejects_malformed_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&config_path, "manifest = [").expect("Failed to write config");

    assert!(AppConfig::load_or_default(&config_path).is_err());
}

#[test]
fn test_app_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join(DEFAULT_CONFIG_FILENAME);

    let original_config = AppConfig {
        manifest: "build/workspace.toml".to_string(),
        output: OutputConfig {
            format: "json".to_string(),
        },
        activation: ActivationConfig {
            properties: vec!["native".to_string()],
        },
    };

    original_config
        .save(&config_path)
        .expect("Failed to save config");
    assert!(config_path.exists());

    let loaded_config = AppConfig::load(&config_path).expect("Failed to load config");
    assert_eq!(loaded_config, original_config);
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_unknown_format() {
    let mut config = AppConfig::default();
    config.output.format = "yaml".to_string();

    let result = config.validate();

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("yaml"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_validate_rejects_blank_property() {
    let mut config = AppConfig::default();
    config.activation.properties = vec!["native".to_string(), " ".to_string()];

    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_validate_rejects_empty_manifest() {
    let mut config = AppConfig::default();
    config.manifest = String::new();

    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_activation_properties_merge_command_line() {
    let mut config = AppConfig::default();
    config.activation.properties = vec!["native".to_string()];

    let properties = config.activation_properties(&["ci".to_string(), "native".to_string()]);

    assert!(properties.is_active("native"));
    assert!(properties.is_active("ci"));
    assert_eq!(properties.iter().collect::<Vec<_>>(), vec!["ci", "native"]);
}

#[test]
fn test_command_line_overrides() {
    let config = AppConfig::default();

    assert_eq!(config.manifest_path(None), PathBuf::from("workspace.toml"));
    assert_eq!(
        config.manifest_path(Some("other/workspace.toml")),
        PathBuf::from("other/workspace.toml")
    );
    assert_eq!(config.output_format(None), "toml");
    assert_eq!(config.output_format(Some("pretty")), "pretty");
}

#[test]
fn test_validate_format() {
    for format in SUPPORTED_FORMATS {
        assert!(validate_format(format).is_ok());
    }
    assert!(matches!(
        validate_format("xml"),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn test_get_config_path_with_custom_path() {
    let custom_path = "/custom/path/composer.toml";
    assert_eq!(get_config_path(Some(custom_path)), PathBuf::from(custom_path));
}

#[test]
fn test_get_config_path_default() {
    let path = get_config_path(None);
    assert!(path.ends_with(DEFAULT_CONFIG_FILENAME));
}
