//! Symbol sources: where the raw extractor lines for a binary come from.
//!
//! `NmSource` shells out to an `nm`-compatible tool; `ListingSource` reads a
//! listing that was captured earlier. Both feed the same parser.

mod listing;
mod nm;

use std::path::Path;

pub use listing::ListingSource;
pub use nm::NmSource;

use crate::error::SizeError;
use crate::model::Entity;
use crate::parse::LineParser;

/// Produces the raw extractor output for one binary.
pub trait SymbolSource {
    /// Returns a human-readable name for the source.
    fn name(&self) -> &'static str;

    /// Full extractor output for `binary`, one record per line.
    fn read_lines(&self, binary: &Path) -> Result<String, SizeError>;
}

/// Extract, parse and sort the symbols of one binary.
///
/// The entity is labelled with the path as given.
pub fn load_entity(
    source: &dyn SymbolSource,
    parser: &LineParser,
    binary: &Path,
) -> Result<Entity, SizeError> {
    log::info!("reading: {:?}", binary.display().to_string());
    let listing = source.read_lines(binary)?;
    let entity = parser.parse_listing(&binary.display().to_string(), &listing)?;
    log::debug!("{}: {} symbols via {}", entity.label, entity.len(), source.name());

    let dups = entity.duplicate_names();
    if !dups.is_empty() {
        log::warn!(
            "{}: {} duplicated symbol name(s), pairing by position: {}",
            entity.label,
            dups.len(),
            dups.join(", ")
        );
    }
    Ok(entity)
}
