use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use symsize_core::config::ToolConfig;

/// Settings that can come from the command line, layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub nm: Option<String>,
    pub path_root: Option<String>,
    pub no_strip: bool,
}

/// Resolve the effective tool config: defaults, then `--config`, then
/// `SYMSIZE_NM`, then explicit flags.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ToolConfig> {
    let mut config = match overrides.config_path.as_deref() {
        Some(path) => load_config_file(path)?,
        None => ToolConfig::default(),
    };
    config.apply_env();

    if let Some(nm) = &overrides.nm {
        config.nm = nm.clone();
    }
    if let Some(root) = &overrides.path_root {
        config.path_root = Some(root.clone());
    }
    if overrides.no_strip {
        config.path_root = None;
    }
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<ToolConfig> {
    ToolConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Map `-v` occurrences to a log filter; warnings are always shown.
pub fn log_filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
