use std::path::PathBuf;

use clap::Parser;
use prism_tools::io_utils::cli_error;
use prism_tools::renamer::{apply_renames, plan_renames};
use prism_tools::{logging, RenamerConfig};
use tracing::info;

/// Append encoded band settings to rendered mp3 filenames.
#[derive(Parser)]
struct Args {
    /// Directory containing the example* folders
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Log the renames without performing them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = RenamerConfig {
        root: args.root,
        dry_run: args.dry_run,
        ..RenamerConfig::default()
    };

    let plan = plan_renames(&config).map_err(|e| cli_error("scanning", &config.root, e))?;
    let count = apply_renames(&plan, config.dry_run)
        .map_err(|e| cli_error("renaming in", &config.root, e))?;
    info!(count, dry_run = config.dry_run, "done");
    Ok(())
}
