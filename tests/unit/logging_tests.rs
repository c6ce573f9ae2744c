// Logging tests
//
// Only one global subscriber can exist per process, so these tests check
// that initialization is idempotent and that filters are built correctly.

use watermarking::config::{LogFormat, LoggingConfig};
use watermarking::logging::{build_filter, init_subscriber};

#[test]
fn test_can_initialize_tracing_subscriber() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
    };

    assert!(init_subscriber(&config).is_ok());
    // Second initialization is a no-op
    assert!(init_subscriber(&LoggingConfig::default()).is_ok());

    tracing::info!(component = "logging_tests", "structured event after init");
}

#[test]
fn test_filter_accepts_directives() {
    let config = LoggingConfig {
        level: "watermarking::pipeline=trace,info".to_string(),
        format: LogFormat::Text,
    };
    assert!(build_filter(&config).is_ok());
}
