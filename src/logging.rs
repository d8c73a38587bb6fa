use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level`; `level` falls back to INFO when unset.
/// `format` is `pretty` or `json`. Calling this twice keeps the first
/// subscriber.
pub fn init(level: Option<&str>, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let installed = match format {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    if installed.is_err() {
        tracing::debug!("Subscriber already installed");
    }
}
