use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, e.g.
/// `RUST_LOG=ffp=trace` to see every task of a batch complete.
///
/// Does nothing if a global subscriber is already set.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
}
