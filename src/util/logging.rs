//! Tracing subscriber setup

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Build the filter from the `RUST_LOG` value when it parses, otherwise
/// from the configured level.
fn env_filter(directives: Option<&str>, level: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

/// Initialize logging to stdout, or to `config.file` when set
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            &config.level,
        ))
        .with_target(true)
        .with_thread_ids(true);

    let result = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_to_configured_level() {
        assert!(env_filter(None, "debug").to_string().contains("debug"));
    }

    #[test]
    fn test_env_filter_prefers_env_directives() {
        let filter = env_filter(Some("shoplist=trace"), "debug").to_string();
        assert!(filter.contains("shoplist=trace"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_env_filter_ignores_unparsable_env() {
        let filter = env_filter(Some("shoplist=loud"), "warn").to_string();
        assert!(filter.contains("warn"));
        assert!(!filter.contains("loud"));
    }
}
