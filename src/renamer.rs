//! Tag rendered audio files with the band settings they were made with.
//!
//! Each `example*/` directory holds renders plus a `band_settings_8bands.txt`
//! written by the render script, with lines such as
//! `Band 3: gain=4, tone=2, pedal=fuzz`. Files are renamed to
//! `<stem>_B0P..._B7P...<ext>` so the demo page can read the settings back
//! out of the name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::bands::BAND_COUNT;
use crate::config::RenamerConfig;
use crate::effect::Effect;
use crate::error::{PrismError, Result};

/// A planned move of one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.split_once(key)?.1;
    let value = rest.split([' ', ',', '\n', '\r']).next()?;
    (!value.is_empty()).then_some(value)
}

/// Parse a band settings file into one filename tag per band.
pub fn parse_band_info(name: &str, text: &str) -> Result<[String; BAND_COUNT]> {
    let err = |reason: String| PrismError::BandSettings {
        name: name.to_string(),
        reason,
    };
    let mut tags: [Option<String>; BAND_COUNT] = Default::default();

    for line in text.lines() {
        if !(line.contains("Band ") && line.contains(" pedal=")) {
            continue;
        }
        let band = line
            .split_once("Band ")
            .and_then(|(_, rest)| rest.split_once(':'))
            .and_then(|(n, _)| n.trim().parse::<usize>().ok())
            .filter(|n| *n < BAND_COUNT)
            .ok_or_else(|| err(format!("bad band number in '{line}'")))?;
        let pedal = line
            .split_once(" pedal=")
            .and_then(|(_, p)| p.trim().chars().next())
            .ok_or_else(|| err(format!("missing pedal in '{line}'")))?;
        let effect = Effect::from_code(pedal).map_err(|e| err(e.to_string()))?;
        let gain =
            field(line, " gain=").ok_or_else(|| err(format!("missing gain in '{line}'")))?;
        let tone =
            field(line, " tone=").ok_or_else(|| err(format!("missing tone in '{line}'")))?;

        tags[band] = Some(format!("B{band}P{}G{gain}T{tone}", effect.code()));
    }

    let mut out: [String; BAND_COUNT] = Default::default();
    for (band, tag) in tags.into_iter().enumerate() {
        out[band] = tag.ok_or_else(|| err(format!("no settings for band {band}")))?;
    }
    Ok(out)
}

/// New filename for `file_name` carrying `tags`, with `strip_marker` removed.
pub fn tagged_name(file_name: &str, tags: &[String; BAND_COUNT], strip_marker: &str) -> String {
    let path = Path::new(file_name);
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let name = format!("{stem}_{}{ext}", tags.join("_"));
    if strip_marker.is_empty() {
        name
    } else {
        name.replace(strip_marker, "")
    }
}

/// Work out every rename under `config.root` without touching any file.
pub fn plan_renames(config: &RenamerConfig) -> Result<Vec<Rename>> {
    let mut info_cache: HashMap<PathBuf, [String; BAND_COUNT]> = HashMap::new();
    let mut plan = Vec::new();

    for entry in WalkDir::new(&config.root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        let Some(dir) = path.parent() else { continue };
        let in_example_dir = dir
            .file_name()
            .is_some_and(|d| d.to_string_lossy().starts_with(&config.dir_prefix));
        let is_mp3 = path.extension().is_some_and(|e| e == "mp3");
        if !(entry.file_type().is_file() && in_example_dir && is_mp3) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.contains("_B0P") {
            debug!(file = %path.display(), "already tagged, skipping");
            continue;
        }

        if !info_cache.contains_key(dir) {
            let info_path = dir.join(&config.info_file);
            if !info_path.exists() {
                return Err(PrismError::MissingFile(info_path));
            }
            let text = fs::read_to_string(&info_path)?;
            let tags = parse_band_info(&info_path.to_string_lossy(), &text)?;
            info_cache.insert(dir.to_path_buf(), tags);
        }

        let new_name = tagged_name(&file_name, &info_cache[dir], &config.strip_marker);
        plan.push(Rename {
            from: path.to_path_buf(),
            to: dir.join(new_name),
        });
    }

    Ok(plan)
}

/// Carry out `plan`. With `dry_run` the renames are only logged.
pub fn apply_renames(plan: &[Rename], dry_run: bool) -> Result<usize> {
    for rename in plan {
        info!(from = %rename.from.display(), to = %rename.to.display(), dry_run, "renaming");
        if !dry_run {
            fs::rename(&rename.from, &rename.to)?;
        }
    }
    Ok(plan.len())
}
