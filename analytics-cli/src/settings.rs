use std::time::Duration;

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) log_level: String,
    pub(crate) connect_timeout: Duration,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let connect_timeout_secs = parse_secs(
            "ANALYTICS_CONNECT_TIMEOUT_SECS",
            std::env::var("ANALYTICS_CONNECT_TIMEOUT_SECS").ok(),
            5,
        )?;

        Ok(Self {
            log_level,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
