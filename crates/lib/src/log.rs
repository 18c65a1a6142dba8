use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone, ValueEnum)]
pub enum LoggingFormat {
    Standard,
    Json,
}

/// Installs the global tracing subscriber. Safe to call more than once; later
/// calls are ignored so every integration test can initialise logging.
pub fn setup_logging(format: &LoggingFormat) {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,jsonrpsee=warn,hyper=warn".into());

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).with_test_writer();
    let _ = match format {
        LoggingFormat::Standard => subscriber.try_init(),
        LoggingFormat::Json => subscriber.json().try_init(),
    };
}
