//! Per-band settings encoded in rendered audio filenames.
//!
//! A wet render is named `<source>_B0PfG5T5_B1PkG4T4_..._B7PrG1T1.mp3`:
//! one `B{band}P{pedal}G{gain}T{tone}` tag per frequency band.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::effect::Effect;
use crate::error::{PrismError, Result};

/// Frequency bands of the multiband effect.
pub const BAND_COUNT: usize = 8;
/// Highest gain/tone value in band tags.
pub const MAX_BAND_LEVEL: u8 = 5;

/// Human readable frequency range of each band.
pub const BAND_RANGES: [&str; BAND_COUNT] = [
    "~40-500Hz",
    "~0.5 - 1kHz",
    "~1 - 1.6kHz",
    "~1.6 - 2.7kHz",
    "~2.7 - 4.5kHz",
    "~4.5 - 7.4kHz",
    "~7.4 - 12kHz",
    "~12 - 20kHz",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSetting {
    pub effect: Effect,
    pub gain: u8,
    pub tone: u8,
}

impl BandSetting {
    /// Filename tag for this setting at position `band`.
    pub fn tag(&self, band: usize) -> String {
        format!("B{band}P{}G{}T{}", self.effect.code(), self.gain, self.tone)
    }
}

impl fmt::Display for BandSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} G{}/5 T{}/5", self.effect.short_name(), self.gain, self.tone)
    }
}

fn band_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"B(\d)P([kfr])G(\d)T(\d)").expect("valid band regex"))
}

fn source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.+?)_B\d").expect("valid source regex"))
}

/// Extract the eight band settings from a filename, in the order they appear.
pub fn parse_band_settings(file_name: &str) -> Result<[BandSetting; BAND_COUNT]> {
    let err = |reason: String| PrismError::BandSettings {
        name: file_name.to_string(),
        reason,
    };

    let mut settings = Vec::with_capacity(BAND_COUNT);
    for caps in band_pattern().captures_iter(file_name) {
        let code = caps[2].chars().next().unwrap_or_default();
        let effect = Effect::from_code(code).map_err(|e| err(e.to_string()))?;
        // single ASCII digits
        let gain = caps[3].parse::<u8>().map_err(|e| err(e.to_string()))?;
        let tone = caps[4].parse::<u8>().map_err(|e| err(e.to_string()))?;
        if gain > MAX_BAND_LEVEL || tone > MAX_BAND_LEVEL {
            return Err(err(format!(
                "gain and tone must be between 0 and {MAX_BAND_LEVEL}, got G{gain}T{tone}"
            )));
        }
        settings.push(BandSetting { effect, gain, tone });
    }

    let found = settings.len();
    settings
        .try_into()
        .map_err(|_| err(format!("expected {BAND_COUNT} bands, found {found}")))
}

/// Name of the dry source a wet render was made from: everything before the
/// first band tag, or the whole stem when there is none.
pub fn source_name(file_name: &str) -> String {
    let stem = file_name.replace(".mp3", "");
    match source_pattern().captures(&stem) {
        Some(caps) => caps[1].to_string(),
        None => stem,
    }
}

/// Join band tags into the filename suffix used by the renderer.
pub fn encode_band_settings(settings: &[BandSetting; BAND_COUNT]) -> String {
    settings
        .iter()
        .enumerate()
        .map(|(band, s)| s.tag(band))
        .collect::<Vec<_>>()
        .join("_")
}
