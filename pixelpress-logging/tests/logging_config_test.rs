use pixelpress_config::{LogFormat, LogLevel, LoggingConfig};
use pixelpress_logging::{init_logging_from_config, init_simple_tracing};

#[test]
fn test_logging_config_integration() {
    let yaml_config = r#"
level: debug
format: json
include_location: true
"#;

    let config: LoggingConfig = serde_yaml::from_str(yaml_config).unwrap();
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);

    assert!(init_logging_from_config(&config).is_ok());
    tracing::info!(component = "test", "logging initialised");
}

#[test]
fn test_repeated_initialisation_is_harmless() {
    let config = LoggingConfig::default();
    assert!(init_logging_from_config(&config).is_ok());
    assert!(init_logging_from_config(&config).is_ok());
    assert!(init_simple_tracing("warn").is_ok());
}

#[test]
fn test_invalid_level_string_falls_back() {
    assert!(init_simple_tracing("not a [valid] directive").is_ok());
}
