use std::path::Path;
use std::process::Command;

use crate::config::ToolConfig;
use crate::error::SizeError;
use crate::extract::SymbolSource;

/// Runs an `nm`-compatible tool and captures its stdout.
#[derive(Debug, Clone)]
pub struct NmSource {
    program: String,
    args: Vec<String>,
}

impl NmSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(config.nm.clone(), config.nm_args.clone())
    }
}

impl SymbolSource for NmSource {
    fn name(&self) -> &'static str {
        "nm"
    }

    fn read_lines(&self, binary: &Path) -> Result<String, SizeError> {
        if !binary.is_file() {
            return Err(SizeError::MissingBinary(binary.to_path_buf()));
        }

        log::debug!("running {} {} {}", self.program, self.args.join(" "), binary.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(binary)
            .output()
            .map_err(|source| SizeError::Spawn { tool: self.program.clone(), source })?;
        if !output.status.success() {
            return Err(SizeError::ToolFailed {
                tool: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // Symbol names are not guaranteed to be UTF-8.
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
