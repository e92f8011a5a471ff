use std::path::PathBuf;

use clap::Parser;
use prism_tools::io_utils::cli_error;
use prism_tools::{codegen, compile_header, logging, CompileMode, CompilerConfig};
use tracing::info;

/// Compile the VAE latent CSV into the plugin's C++ lookup header.
#[derive(Parser)]
struct Args {
    /// Latent CSV with label,g,t,latents columns
    #[arg(long, default_value = "PRISM_vae_latents.csv")]
    input: PathBuf,
    /// Header file to generate
    #[arg(long, default_value = "VAEdataframe.h")]
    output: PathBuf,
    /// Fail on missing, duplicate or off-grid cells instead of zero-filling
    #[arg(long)]
    strict: bool,
    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,
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
    let config = CompilerConfig {
        input: args.input,
        output: args.output,
        mode: if args.strict {
            CompileMode::Strict
        } else {
            CompileMode::Lenient
        },
    };

    let (table, header) =
        compile_header(&config).map_err(|e| cli_error("compiling", &config.input, e))?;
    codegen::write_header(&config.output, &header)
        .map_err(|e| cli_error("writing", &config.output, e))?;

    let missing = table.missing_cells().len();
    if args.json {
        let summary = serde_json::json!({
            "input": config.input.display().to_string(),
            "output": config.output.display().to_string(),
            "populated_cells": table.populated_count(),
            "missing_cells": missing,
            "bytes": header.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            "Wrote {} ({} cells populated, {} zero-filled). Copy it to Source/VAEdataframe.h",
            config.output.display(),
            table.populated_count(),
            missing
        );
    }
    Ok(())
}
