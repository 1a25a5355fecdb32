//! Diagnostics routing: warnings and debug notes go through `tracing`, error
//! messages share one prefix.

use tracing_subscriber::EnvFilter;

pub fn warn(msg: impl AsRef<str>) {
    tracing::warn!("{}", msg.as_ref());
}

pub fn debug(msg: impl AsRef<str>) {
    tracing::debug!("{}", msg.as_ref());
}

pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("procscript: {}", msg.as_ref())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(error_message("no section D0[1]"), "procscript: no section D0[1]");
    }
}
