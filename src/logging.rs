use tracing_subscriber::EnvFilter;

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
