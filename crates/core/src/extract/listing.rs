use std::fs;
use std::path::Path;

use crate::error::SizeError;
use crate::extract::SymbolSource;

/// Reads extractor output saved to a text file, e.g. `nm -S -l ... > before.txt`.
pub struct ListingSource;

impl SymbolSource for ListingSource {
    fn name(&self) -> &'static str {
        "listing"
    }

    fn read_lines(&self, binary: &Path) -> Result<String, SizeError> {
        if !binary.is_file() {
            return Err(SizeError::MissingBinary(binary.to_path_buf()));
        }
        let bytes = fs::read(binary)
            .map_err(|source| SizeError::Io { path: binary.to_path_buf(), source })?;
        // Decoded the same way as live nm output.
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}
