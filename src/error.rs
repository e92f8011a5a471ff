use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrismError {
    /// Malformed CSV input or a row that does not match the expected columns.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `label` column names no known effect.
    #[error("line {line}: unknown effect label '{label}'")]
    UnknownEffect { label: String, line: u64 },

    /// Pedal code in a filename or metadata file names no known effect.
    #[error("unknown pedal code '{0}'")]
    UnknownPedal(char),

    /// The `latents` column could not be read as a list of numbers.
    #[error("line {line}: malformed latent vector '{text}'")]
    MalformedLatents { text: String, line: u64 },

    /// Latent vector with the wrong number of elements.
    #[error("line {line}: latent vector must have 8 elements, found {found}")]
    VectorLength { found: usize, line: u64 },

    /// Gain or tone maps to a cell the table does not have.
    #[error("line {line}: {axis} value {value} maps outside the table")]
    OutOfDomain {
        axis: &'static str,
        value: i64,
        line: u64,
    },

    /// Gain or tone not on the 0,2,..,10 grid (strict mode only).
    #[error("line {line}: {axis} value {value} is not one of 0,2,4,6,8,10")]
    OffGrid {
        axis: &'static str,
        value: i64,
        line: u64,
    },

    /// Same cell written twice (strict mode only).
    #[error("line {line}: duplicate entry for {effect} gain={gain} tone={tone}")]
    DuplicateCell {
        effect: &'static str,
        gain: i64,
        tone: i64,
        line: u64,
    },

    /// Cross product not fully covered (strict mode only).
    #[error("latent table incomplete: {} missing cells ({})", .missing.len(), .missing.join(", "))]
    IncompleteTable { missing: Vec<String> },

    /// Encoded band settings in an audio filename could not be parsed.
    #[error("band settings error in '{name}': {reason}")]
    BandSettings { name: String, reason: String },

    /// A file the run depends on is absent.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failure.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, PrismError>;
