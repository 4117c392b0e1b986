use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use gr_core::ThresholdConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "GR_CONFIG";

/// Config file picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "gesture.toml";

/// On-disk layout: everything lives under `[thresholds]`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    thresholds: ThresholdConfig,
}

// ---------------------------------------------------------------------------
// Pure helpers (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

/// Parse and validate TOML config content. Missing keys take defaults.
pub fn parse_config(content: &str) -> Result<ThresholdConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    file.thresholds.validate()?;
    Ok(file.thresholds)
}

/// Render thresholds in the same layout `parse_config` reads.
pub fn render_config(config: &ThresholdConfig) -> Result<String> {
    let file = ConfigFile {
        thresholds: *config,
    };
    toml::to_string(&file).map_err(|e| TraceError::InvalidData(format!("TOML render failed: {e}")))
}

/// Pick the config path.
///
/// Priority chain:
/// 1. Explicit `--config` path
/// 2. `GR_CONFIG` environment value (ignored when empty)
/// 3. `gesture.toml` in the working directory, if present
fn choose_config_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    local_candidate: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value
        && !value.trim().is_empty()
    {
        return Some(PathBuf::from(value));
    }
    local_candidate
}

// ---------------------------------------------------------------------------
// I/O wrappers
// ---------------------------------------------------------------------------

/// Resolve which config file to use, or `None` for built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let local = env::current_dir()
        .ok()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
        .filter(|p| p.is_file());
    choose_config_path(explicit, env::var(CONFIG_ENV).ok(), local)
}

/// Load thresholds from `path`, or defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ThresholdConfig> {
    let Some(path) = path else {
        tracing::debug!("no config file, using default thresholds");
        return Ok(ThresholdConfig::default());
    };
    let content = fs::read_to_string(path).map_err(|e| {
        TraceError::InvalidData(format!("failed to read {}: {e}", path.display()))
    })?;
    let config = parse_config(&content)?;
    tracing::info!("loaded thresholds from {}", path.display());
    Ok(config)
}
