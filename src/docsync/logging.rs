use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `docsync=trace`.
pub const LOG_ENV: &str = "DOCSYNC_LOG";

pub fn build_filter(verbose: bool, directive: Option<&str>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the stderr log subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(verbose, directive.as_deref());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
