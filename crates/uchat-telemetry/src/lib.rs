//! Logging for uchat
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! human-readable or JSON `fmt` layer

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uchat_config::{LogFormat, TelemetryConfig};

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. An unparseable
/// filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json().flatten_event(true)).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!(format = ?config.format, "telemetry initialized");

    Ok(())
}

fn build_filter(env_override: Option<&str>, configured: &str) -> EnvFilter {
    env_override
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used_without_override() {
        let filter = build_filter(None, "uchat_chat=debug");
        assert_eq!(filter.to_string(), "uchat_chat=debug");
    }

    #[test]
    fn environment_override_wins() {
        let filter = build_filter(Some("trace"), "info");
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn blank_override_is_ignored() {
        let filter = build_filter(Some("  "), "debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        let filter = build_filter(None, "uchat_chat=loudest");
        assert_eq!(filter.to_string(), "info");
    }
}
