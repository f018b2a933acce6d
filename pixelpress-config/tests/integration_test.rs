//! Integration tests for pixelpress-config

use pixelpress_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = PixelpressConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("PIXELPRESS_SERVER_PORT", Some("9090")),
        ("PIXELPRESS_WORKER_COUNT", Some("3")),
        ("PIXELPRESS_MAX_BATCH_SIZE", Some("8")),
        ("PIXELPRESS_OUTPUT_FORMAT", Some("png")),
        ("PIXELPRESS_METRICS_WINDOW_SECONDS", Some("30")),
        ("PIXELPRESS_LOG_LEVEL", Some("debug")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.processing.worker_count, 3);
        assert_eq!(config.processing.max_batch_size, 8);
        assert_eq!(config.processing.output_format, OutputFormat::Png);
        assert_eq!(config.metrics.window, Duration::from_secs(30));
        assert_eq!(config.logging.level, LogLevel::Debug);
    });
}

#[test]
fn test_invalid_env_value_is_rejected() {
    with_vars(vec![("PIXELPRESS_SERVER_PORT", Some("eighty"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("IMGSVC_QUEUE_CAPACITY", Some("5"))], || {
        let config = ConfigLoader::with_prefix("IMGSVC").from_env().unwrap();
        assert_eq!(config.processing.queue_capacity, 5);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = PixelpressConfig::generate_sample().unwrap();
    let parsed: PixelpressConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
}

#[test]
fn test_comprehensive_config() {
    let yaml = r#"
server:
  bind_address: "127.0.0.1"
  port: 9000
  max_upload_bytes: 1048576
  cors:
    allowed_origins: ["http://dashboard.local:3000"]
    allowed_methods: ["GET", "POST"]

processing:
  worker_count: 4
  queue_capacity: 16
  max_batch_size: 10
  output_format: png

load_test:
  sample_interval: 500
  shutdown_grace: 3

metrics:
  window: 20
  sample_interval: 2000

logging:
  level: warn
  format: json
"#;

    let config: PixelpressConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(config.validate_all().is_ok());

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.max_upload_bytes, 1_048_576);
    assert_eq!(config.processing.worker_count, 4);
    assert_eq!(config.processing.output_format, OutputFormat::Png);
    assert_eq!(config.load_test.sample_interval, Duration::from_millis(500));
    assert_eq!(config.load_test.shutdown_grace, Duration::from_secs(3));
    assert_eq!(config.metrics.window, Duration::from_secs(20));
    assert_eq!(config.metrics.sample_interval, Duration::from_secs(2));
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_from_file_applies_env_overrides() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "processing:\n  max_batch_size: 12").unwrap();

    with_vars(vec![("PIXELPRESS_QUEUE_CAPACITY", Some("7"))], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();
        assert_eq!(config.processing.max_batch_size, 12);
        assert_eq!(config.processing.queue_capacity, 7);
    });
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(file, r#"{{"server": {{"port": 7070}}}}"#).unwrap();

    // Hold the env lock so a concurrent override test cannot leak in
    with_vars(vec![("PIXELPRESS_SERVER_PORT", None::<&str>)], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 7070);
    });
}

#[test]
fn test_validation_errors() {
    let mut config = PixelpressConfig::default();
    config.metrics.sample_interval = Duration::from_millis(10);
    assert!(config.validate_all().is_err());

    let mut config = PixelpressConfig::default();
    config.server.port = 0;
    assert!(config.validate_all().is_err());
}
