use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter used by every binary: `RUST_LOG` when set, `info` otherwise.
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Install the `fmt` subscriber used by every binary, writing to stderr.
pub fn init() {
    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
