//! Reading latent rows from the exported VAE CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::effect::Effect;
use crate::error::{PrismError, Result};

/// One row of the latent table as it appears in the CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentRecord {
    pub effect: Effect,
    /// Gain knob value, 0..=10 in steps of 2.
    pub gain: i64,
    /// Tone knob value, 0..=10 in steps of 2.
    pub tone: i64,
    /// Latent vector. Length is checked when the table is compiled.
    pub vector: Vec<f64>,
    /// 1-based source line, 0 when built in memory.
    pub line: u64,
}

impl LatentRecord {
    pub fn new(effect: Effect, gain: i64, tone: i64, vector: Vec<f64>) -> Self {
        Self {
            effect,
            gain,
            tone,
            vector,
            line: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    g: i64,
    t: i64,
    latents: String,
}

/// Parse a list literal such as `[0.1, -2e-3, 4]` into numbers.
///
/// Square brackets or parentheses are accepted and a trailing comma is
/// allowed. Non-finite values are rejected because they cannot be emitted
/// as C++ float literals.
pub fn parse_latents(text: &str) -> Option<Vec<f64>> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| text.strip_prefix('(').and_then(|s| s.strip_suffix(')')))?;
    let inner = inner.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    inner
        .split(',')
        .map(|item| {
            let v: f64 = item.trim().parse().ok()?;
            v.is_finite().then_some(v)
        })
        .collect()
}

/// Read every row of a latent CSV from `reader`.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<LatentRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut raw = csv::StringRecord::new();
    let mut records = Vec::new();

    while rdr.read_record(&mut raw)? {
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRow = raw.deserialize(Some(&headers))?;
        let effect = Effect::from_label(&row.label).ok_or_else(|| PrismError::UnknownEffect {
            label: row.label.clone(),
            line,
        })?;
        let vector = parse_latents(&row.latents).ok_or_else(|| PrismError::MalformedLatents {
            text: row.latents.clone(),
            line,
        })?;
        records.push(LatentRecord {
            effect,
            gain: row.g,
            tone: row.t,
            vector,
            line,
        });
    }

    debug!(rows = records.len(), "parsed latent CSV");
    Ok(records)
}

/// Open `path` and read its latent rows.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<LatentRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PrismError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    parse_records(file)
}
