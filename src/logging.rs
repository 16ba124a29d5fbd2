use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Library target plus the `package-manifest` binary target.
const DEFAULT_FILTER: &str = "icons_build=info,package_manifest=info";

/// Initialize tracing to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
