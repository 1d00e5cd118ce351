//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so stdout stays clean for reports. `RUST_LOG`
//! overrides the level picked from `-v`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a level: warn, then debug, then trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(verbosity: u8) {
    let level = level_from_verbosity(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,labform_cli={level},labform_core={level}",
            level = level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
