use anyhow::{Context, Result};
use pod_core::PolicyConfig;
use std::fs;
use std::path::Path;

/// Loads policy tunables from an optional JSON file. Missing fields take their
/// defaults; a config that fails validation falls back to the defaults.
pub fn load_policy(path: Option<&Path>) -> Result<PolicyConfig> {
    let Some(path) = path else {
        return Ok(PolicyConfig::default());
    };
    let raw = fs::read(path).with_context(|| format!("failed reading config {}", path.display()))?;
    let config: PolicyConfig = serde_json::from_slice(&raw)
        .with_context(|| format!("failed parsing config {}", path.display()))?;
    Ok(checked_or_default(config))
}

pub fn checked_or_default(config: PolicyConfig) -> PolicyConfig {
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            tracing::warn!("{err}. Falling back to default policy.");
            PolicyConfig::default()
        }
    }
}
