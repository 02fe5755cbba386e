use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter (e.g. `SCRAWL_LOG=debug`).
pub const LOG_ENV: &str = "SCRAWL_LOG";

/// Initialize structured JSON logging on stderr.
///
/// Defaults to `warn` level unless overridden by `SCRAWL_LOG`, so zero-length annotation
/// warnings and per-file failures show up without any configuration.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV)
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(true),
        )
        .try_init();
}
