/// Install the line-oriented `tracing` subscriber used by the binaries.
///
/// `RUST_LOG` overrides the default `info` filter. A subscriber installed
/// earlier stays in place.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .try_init();
}
