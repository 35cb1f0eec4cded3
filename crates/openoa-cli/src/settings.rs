use std::path::Path;

use anyhow::Context;

use openoa_core::{ResolvedConfig, StatusConfig};

/// Load the config file (if present) and resolve the runtime settings.
pub fn load(
    path: &Path,
    api_url: Option<&str>,
    env_url: Option<&str>,
) -> anyhow::Result<ResolvedConfig> {
    let config = StatusConfig::load_or_default(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    config
        .resolve_with(api_url, env_url)
        .context("invalid API configuration")
}
