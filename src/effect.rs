//! The fixed set of effect categories modelled by the plugin.

use std::fmt;

use crate::error::{PrismError, Result};

/// Number of effect categories, the first table dimension.
pub const EFFECT_COUNT: usize = 3;

/// One of the three pedal models. The discriminant is the table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Effect {
    /// Suhr Riot distortion.
    Riot = 0,
    /// JAM Red Muck fuzz.
    Fuzz = 1,
    /// King of Tone overdrive.
    KingOfTone = 2,
}

impl Effect {
    pub const ALL: [Effect; EFFECT_COUNT] = [Effect::Riot, Effect::Fuzz, Effect::KingOfTone];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Key used in the `label` column of the latent CSV.
    pub fn label(self) -> &'static str {
        match self {
            Effect::Riot => "riot",
            Effect::Fuzz => "fuzz",
            Effect::KingOfTone => "kingoftone",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }

    /// Single-letter code used in encoded audio filenames.
    pub fn code(self) -> char {
        match self {
            Effect::Riot => 'r',
            Effect::Fuzz => 'f',
            Effect::KingOfTone => 'k',
        }
    }

    pub fn from_code(code: char) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or(PrismError::UnknownPedal(code))
    }

    /// Name written into the generated header comments.
    pub fn display_name(self) -> &'static str {
        match self {
            Effect::Riot => "Distortion (Suhr Riot)",
            Effect::Fuzz => "Fuzz (JAM Red Muck)",
            Effect::KingOfTone => "Overdrive (King of Tone)",
        }
    }

    /// Abbreviation shown on the demo page.
    pub fn short_name(self) -> &'static str {
        match self {
            Effect::Riot => "Dist",
            Effect::Fuzz => "Fuzz",
            Effect::KingOfTone => "OD",
        }
    }

    /// Demo page bar colour as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Effect::Riot => "#faeb32",
            Effect::Fuzz => "#ec2215",
            Effect::KingOfTone => "#569bfd",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
