use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{level}'"))
}

/// `level` уже учитывает `LOG_LEVEL`/`RUST_LOG`, см. `Settings::from_env`.
pub(crate) fn init_logging(level: &str) -> Result<()> {
    // stdout занят выводом команд
    fmt()
        .with_env_filter(build_filter(level)?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_configured_directives() {
        let filter = build_filter("warn,analytics_client=debug").expect("filter must parse");
        assert!(filter.to_string().contains("analytics_client=debug"));
    }

    #[test]
    fn plain_level_is_accepted() {
        assert!(build_filter("info").is_ok());
    }
}
