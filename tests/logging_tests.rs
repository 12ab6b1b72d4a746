use spa_router::logging::{init_logging_with_config, LogConfig, LogFormat};

#[test]
fn test_second_init_is_rejected() {
    let config = LogConfig {
        log_level: "debug".to_string(),
        format: LogFormat::Json,
        target_filter: Some("spa_router=trace, ,not a directive!".to_string()),
        include_location: true,
    };
    init_logging_with_config(&config).unwrap();
    tracing::info!(test = "logging", "subscriber installed");

    let err = init_logging_with_config(&LogConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to initialize logging"));
}
