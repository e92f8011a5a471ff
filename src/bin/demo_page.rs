use std::path::PathBuf;

use clap::Parser;
use prism_tools::demo_page::{collect_entries, render_page, write_page};
use prism_tools::io_utils::cli_error;
use prism_tools::{logging, DemoPageConfig};
use tracing::info;

/// Generate the multiband demo page from the dry/wet render folders.
#[derive(Parser)]
struct Args {
    /// Directory containing the dry and wet folders
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Dry renders folder, relative to root
    #[arg(long, default_value = "dry")]
    dry: String,
    /// Wet renders folder, relative to root
    #[arg(long, default_value = "wet")]
    wet: String,
    /// HTML file to write
    #[arg(long, default_value = "demos-multiband.html")]
    output: PathBuf,
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
    let config = DemoPageConfig {
        root: args.root,
        dry_dir: args.dry,
        wet_dir: args.wet,
        output: args.output,
        ..DemoPageConfig::default()
    };

    let entries = collect_entries(&config).map_err(|e| cli_error("scanning", &config.root, e))?;
    let html = render_page(&entries);
    write_page(&config.output, &html).map_err(|e| cli_error("writing", &config.output, e))?;
    info!("Generated {} with {} demos", config.output.display(), entries.len());
    Ok(())
}
