use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use symsize_core::config::ToolConfig;
use symsize_core::diff::DeltaReport;
use symsize_core::extract::{load_entity, ListingSource, NmSource, SymbolSource};
use symsize_core::model::Entity;
use symsize_core::parse::LineParser;
use symsize_core::report::{
    write_delta_report, write_json, write_size_report, OutputFormat, SizeReport,
};

/// What to do with the positional inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPlan {
    Single(PathBuf),
    Delta { old: PathBuf, new: PathBuf },
    /// Zero or more than two inputs: warn and produce nothing.
    Unsupported(usize),
}

impl ReportPlan {
    pub fn from_inputs(inputs: &[PathBuf]) -> Self {
        match inputs {
            [one] => ReportPlan::Single(one.clone()),
            [old, new] => ReportPlan::Delta { old: old.clone(), new: new.clone() },
            other => ReportPlan::Unsupported(other.len()),
        }
    }
}

/// Run the report for `inputs`, writing it to `out`.
///
/// Every input is extracted and parsed before anything is written, so a
/// fatal error never leaves a partial report behind.
pub fn report_command<W: Write>(
    out: &mut W,
    inputs: &[PathBuf],
    config: &ToolConfig,
    use_listing: bool,
    format: OutputFormat,
) -> Result<()> {
    let nm = NmSource::from_config(config);
    let source: &dyn SymbolSource = if use_listing { &ListingSource } else { &nm };
    let parser = config.parser();

    match ReportPlan::from_inputs(inputs) {
        ReportPlan::Single(path) => {
            let entity = load(source, &parser, &path)?;
            let report = SizeReport::build(&entity, &config.report_kinds);
            match format {
                OutputFormat::Text => write_size_report(out, &report),
                OutputFormat::Json => write_json(out, &report),
            }
            .context("Failed to write size report")?;
        }
        ReportPlan::Delta { old, new } => {
            let old_entity = load(source, &parser, &old)?;
            let new_entity = load(source, &parser, &new)?;
            let report = DeltaReport::build(&old_entity, &new_entity);
            let counts = report.counts();
            log::info!(
                "{} added, {} deleted, {} modified",
                counts.added,
                counts.deleted,
                counts.modified
            );
            match format {
                OutputFormat::Text => write_delta_report(out, &report),
                OutputFormat::Json => write_json(out, &report),
            }
            .context("Failed to write delta report")?;
        }
        ReportPlan::Unsupported(count) => {
            eprintln!("Warning: expected one or two binaries, got {count}; no report produced");
        }
    }

    Ok(())
}

fn load(source: &dyn SymbolSource, parser: &LineParser, path: &Path) -> Result<Entity> {
    load_entity(source, parser, path)
        .with_context(|| format!("Failed to read symbols from {}", path.display()))
}
