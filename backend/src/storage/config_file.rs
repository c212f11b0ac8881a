//! # Split Config File
//!
//! Loads and saves [`SplitConfig`] as a single YAML file.
//!
//! ```yaml
//! currency_symbol: "$"
//! decimal_places: 2
//! percentage_tolerance: 0.01
//! max_contribution: 1000000.0
//! enable_debug_logging: false
//! ```
//!
//! Missing fields fall back to their defaults, and a missing file yields the
//! default configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use shared::SplitConfig;

const MAX_DECIMAL_PLACES: u8 = 6;

/// Load the split configuration from `path`, or defaults if the file does not exist
pub fn load_split_config(path: &Path) -> Result<SplitConfig> {
    if !path.exists() {
        info!("No split config at {:?}, using defaults", path);
        return Ok(SplitConfig::default());
    }

    let yaml_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read split config {:?}", path))?;
    let config: SplitConfig = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to parse split config {:?}", path))?;
    validate_split_config(&config)?;

    debug!("Loaded split config from {:?}", path);
    Ok(config)
}

/// Save the split configuration to `path`
pub fn save_split_config(path: &Path, config: &SplitConfig) -> Result<()> {
    validate_split_config(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
    }

    let yaml_content = serde_yaml::to_string(config)?;

    // write to a temp file, then rename over the target
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, yaml_content)?;
    fs::rename(&temp_path, path)?;

    debug!("Saved split config to {:?}", path);
    Ok(())
}

fn validate_split_config(config: &SplitConfig) -> Result<()> {
    if config.decimal_places > MAX_DECIMAL_PLACES {
        bail!(
            "decimal_places must be at most {}, got {}",
            MAX_DECIMAL_PLACES,
            config.decimal_places
        );
    }
    if !config.percentage_tolerance.is_finite() || config.percentage_tolerance < 0.0 {
        bail!("percentage_tolerance must be a non-negative number");
    }
    if !config.max_contribution.is_finite() || config.max_contribution <= 0.0 {
        bail!("max_contribution must be a positive number");
    }
    Ok(())
}
