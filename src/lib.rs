pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod report;
pub mod session;

/// Installs the stderr log subscriber shared by both binaries. Stdout carries
/// only probe results.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
