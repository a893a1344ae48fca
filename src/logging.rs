//! Log sink setup for the binary. The library only emits `tracing` events.

use tracing::Level;

/// Installs a stderr `fmt` subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
