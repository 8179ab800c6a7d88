use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WORKHOURS_LOG";

/// Install the stderr subscriber. `WORKHOURS_LOG` wins over the configured level.
pub fn enable_logging(default_level: &str) {
    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| default_level.to_string());

    let filter = EnvFilter::try_new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_")
    ))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
