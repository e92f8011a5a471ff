use std::io;
use std::path::Path;

use thiserror::Error;

use crate::error::PrismError;

/// Error reported by the binaries: what was being done, to which path, and
/// a hint about the usual cause.
#[derive(Debug, Error)]
#[error("Error {operation} '{path}': {detail}{hint}")]
pub struct CliError {
    pub operation: String,
    pub path: String,
    pub detail: String,
    hint: String,
    #[source]
    pub source: PrismError,
}

fn missing_file_hint(missing: &Path) -> &'static str {
    let name = missing
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if name.ends_with(".csv") {
        "Export the latent CSV from the VAE notebook or point --input at it."
    } else if name.ends_with(".txt") {
        "Every example directory needs the band settings file written by the render script."
    } else if name.ends_with(".mp3") {
        "Each wet render needs its dry source and the amp renders of both."
    } else {
        "Point --root at the folder holding the renders."
    }
}

fn io_hint(operation: &str, err: &io::Error) -> &'static str {
    use io::ErrorKind::*;
    match (operation.starts_with("writing"), err.kind()) {
        (true, NotFound) => "The output directory does not exist; create it or pass --output.",
        (true, PermissionDenied) => "The output path is not writable; pass --output elsewhere.",
        (false, PermissionDenied) => "The input is not readable by this user.",
        (false, InvalidData) => "The file is not valid UTF-8 text.",
        (_, NotFound) => "Check that the path is correct.",
        _ => "",
    }
}

fn hint(operation: &str, err: &PrismError) -> &'static str {
    match err {
        PrismError::MissingFile(missing) => missing_file_hint(missing),
        PrismError::Io(io_err) => io_hint(operation, io_err),
        PrismError::Csv(_) => "The CSV needs label, g, t and latents columns.",
        PrismError::IncompleteTable { .. } => "Add the missing rows or drop --strict to zero-fill.",
        PrismError::BandSettings { .. } | PrismError::UnknownPedal(_) => {
            "Band tags look like B0PfG5T5: band, pedal r/f/k, gain and tone 0-5."
        }
        _ => "",
    }
}

/// Wrap a library error raised while `operation` was working on `path`.
pub fn cli_error(operation: &str, path: &Path, err: PrismError) -> CliError {
    let detail = match &err {
        PrismError::MissingFile(missing) => format!("{} does not exist", missing.display()),
        other => other.to_string(),
    };
    let hint = match hint(operation, &err) {
        "" => String::new(),
        h => format!(". {h}"),
    };
    CliError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        detail,
        hint,
        source: err,
    }
}
