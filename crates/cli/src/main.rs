use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use symsize::{log_filter_for, report_command, resolve_config, ConfigOverrides};
use symsize_core::report::OutputFormat;

/// Per-symbol size reports for firmware binaries.
///
/// With one binary, prints code and read-only data symbols grouped by
/// source file. With two (old, then new), prints the symbols that were
/// added, deleted or resized, grouped by file, followed by totals.
///
/// This CLI is a thin wrapper around `symsize-core`; all substantive logic
/// lives in the library.
#[derive(Parser, Debug)]
#[command(name = "symsize", version, about = "Per-symbol size reports and deltas", long_about = None)]
struct Cli {
    /// One binary for a size report, or two (old, new) for a delta report.
    binaries: Vec<PathBuf>,

    /// Config file (.json, .yaml or .yml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// nm-compatible extractor to run. Overrides SYMSIZE_NM and the config file.
    #[arg(long)]
    nm: Option<String>,

    /// Directory marker stripped from source paths (default `zephyr/`).
    #[arg(long, conflicts_with = "no_strip")]
    path_root: Option<String>,

    /// Keep source paths exactly as the extractor reports them.
    #[arg(long, default_value_t = false)]
    no_strip: bool,

    /// Treat inputs as saved extractor output instead of binaries.
    #[arg(long, default_value_t = false)]
    listing: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter_for(cli.verbose)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    let overrides = ConfigOverrides {
        config_path: cli.config,
        nm: cli.nm,
        path_root: cli.path_root,
        no_strip: cli.no_strip,
    };
    let config = resolve_config(&overrides)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report_command(&mut out, &cli.binaries, &config, cli.listing, cli.format.into())
}
