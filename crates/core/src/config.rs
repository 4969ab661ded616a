use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SizeError;
use crate::parse::{LineParser, DEFAULT_PATH_ROOT};
use crate::report::DEFAULT_REPORT_KINDS;

/// Environment variable overriding the extractor program.
pub const NM_ENV_VAR: &str = "SYMSIZE_NM";

pub const DEFAULT_NM: &str = "arm-none-eabi-nm";

/// Tool configuration. Every field has a default so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Extractor program, looked up on `PATH` when not absolute.
    #[serde(default = "default_nm")]
    pub nm: String,
    /// Arguments passed before the binary path.
    #[serde(default = "default_nm_args")]
    pub nm_args: Vec<String>,
    /// Directory marker stripped from source paths; `null` keeps paths as-is.
    #[serde(default = "default_path_root")]
    pub path_root: Option<String>,
    /// Symbol kinds listed by the single-binary report.
    #[serde(default = "default_report_kinds")]
    pub report_kinds: Vec<char>,
}

fn default_nm() -> String {
    DEFAULT_NM.to_string()
}

fn default_nm_args() -> Vec<String> {
    ["-S", "-l", "--size-sort", "--radix=d"].iter().map(|s| s.to_string()).collect()
}

fn default_path_root() -> Option<String> {
    Some(DEFAULT_PATH_ROOT.to_string())
}

fn default_report_kinds() -> Vec<char> {
    DEFAULT_REPORT_KINDS.to_vec()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            nm: default_nm(),
            nm_args: default_nm_args(),
            path_root: default_path_root(),
            report_kinds: default_report_kinds(),
        }
    }
}

impl ToolConfig {
    /// Load a config file; the format follows the extension (`json`, `yaml`, `yml`).
    pub fn load(path: &Path) -> Result<Self, SizeError> {
        let body = fs::read_to_string(path)
            .map_err(|source| SizeError::Io { path: path.to_path_buf(), source })?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext {
            "json" => serde_json::from_str(&body).map_err(|e| {
                SizeError::Config(format!("failed to parse {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&body).map_err(|e| {
                SizeError::Config(format!("failed to parse {}: {e}", path.display()))
            }),
            other => Err(SizeError::Config(format!(
                "unsupported config extension '{}' for {} (expected json, yaml or yml)",
                other,
                path.display()
            ))),
        }
    }

    /// Apply `SYMSIZE_NM` if it is set and non-empty.
    pub fn apply_env(&mut self) {
        if let Some(nm) = std::env::var_os(NM_ENV_VAR).filter(|v| !v.is_empty()) {
            self.nm = nm.to_string_lossy().to_string();
        }
    }

    pub fn parser(&self) -> LineParser {
        LineParser::with_path_root(self.path_root.as_deref())
    }
}
