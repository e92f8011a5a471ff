//! Static HTML page listing every multiband demo render.
//!
//! Each wet render in the wet directory is paired with its dry source and
//! the amp-simulated versions of both. Entries whose files are missing or
//! whose names do not parse are logged and left out.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::bands::{self, BandSetting, BAND_COUNT, BAND_RANGES, MAX_BAND_LEVEL};
use crate::config::DemoPageConfig;
use crate::error::{PrismError, Result};

const HEADER: &str = include_str!("../templates/demo_header.html");
const FOOTER: &str = include_str!("../templates/demo_footer.html");

/// Marker present in every wet render that carries band settings.
const FIRST_BAND_MARKER: &str = "_B0P";

/// One demo row: four audio files plus the settings used to render them.
/// Paths are relative to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoEntry {
    /// 1-based position among the wet renders.
    pub index: usize,
    pub source: String,
    pub dry: String,
    pub dry_amp: String,
    pub wet: String,
    pub wet_amp: String,
    pub bands: [BandSetting; BAND_COUNT],
}

/// Text colour that stays readable on a `#rrggbb` background.
pub fn text_color(background: &str) -> &'static str {
    let hex = background.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(u32::from)
            .unwrap_or(0)
    };
    let brightness = (channel(0) * 299 + channel(2) * 587 + channel(4) * 114) / 1000;
    if brightness < 150 {
        "#FFFFFF"
    } else {
        "#000000"
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn build_entry(config: &DemoPageConfig, index: usize, wet_name: &str) -> Result<DemoEntry> {
    let bands = bands::parse_band_settings(wet_name)?;
    let source = bands::source_name(wet_name);
    let DemoPageConfig {
        dry_dir,
        wet_dir,
        amp_dir,
        ..
    } = config;

    let entry = DemoEntry {
        index,
        dry: format!("{dry_dir}/{source}.mp3"),
        dry_amp: format!("{dry_dir}/{amp_dir}/amp_{source}.mp3"),
        wet: format!("{wet_dir}/{wet_name}"),
        wet_amp: format!("{wet_dir}/{amp_dir}/amp_{wet_name}"),
        source,
        bands,
    };

    for rel in [&entry.dry, &entry.dry_amp, &entry.wet, &entry.wet_amp] {
        let full = config.root.join(rel);
        if !full.exists() {
            return Err(PrismError::MissingFile(full));
        }
    }
    Ok(entry)
}

/// Scan the wet directory and pair every band-tagged render with its files.
pub fn collect_entries(config: &DemoPageConfig) -> Result<Vec<DemoEntry>> {
    let wet_root = config.root.join(&config.wet_dir);
    if !wet_root.is_dir() {
        return Err(PrismError::MissingFile(wet_root));
    }

    let mut wet_names = Vec::new();
    for entry in WalkDir::new(&wet_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && name.ends_with(".mp3") {
            wet_names.push(name.into_owned());
        }
    }
    info!(count = wet_names.len(), dir = %wet_root.display(), "found wet files");

    let mut entries = Vec::new();
    let tagged = wet_names.iter().filter(|n| n.contains(FIRST_BAND_MARKER));
    for (i, name) in tagged.enumerate() {
        match build_entry(config, i + 1, name) {
            Ok(entry) => {
                debug!(file = %name, "processed");
                entries.push(entry);
            }
            Err(e) => warn!(file = %name, error = %e, "skipping demo"),
        }
    }
    Ok(entries)
}

fn band_table(bands: &[BandSetting; BAND_COUNT]) -> String {
    let mut html = String::from(
        r#"<table class="progtab text-center table table-borderless align-middle" style="width: 100%; table-layout: fixed;">"#,
    );
    let label_cell = |label: &str| {
        format!(
            r#"<td class="align-middle left" style="font-size: 0.85em; font-weight: bold; white-space: nowrap;">{label}</td>"#
        )
    };

    html.push_str("<tr>");
    html.push_str(r#"<td class="align-middle left" style="width: auto;"><b>Frequency Bands:</b></td>"#);
    for (i, range) in BAND_RANGES.iter().enumerate() {
        let _ = write!(
            html,
            r#"<td class="align-middle" style="font-size: 0.85em;"><b>B{}<br>({range})</b></td>"#,
            i + 1
        );
    }
    html.push_str("</tr>");

    html.push_str("<tr>");
    html.push_str(&label_cell("Effect"));
    for band in bands {
        let name = band.effect.short_name();
        let color = band.effect.color();
        let _ = write!(
            html,
            r#"
        <td class='align-middle'>
            <div class="type-selector">
                <div class="type-bar" style="background-color:{color}; color:{}; width:100%" title="{name}">{name}</div>
            </div>
        </td>"#,
            text_color(color)
        );
    }
    html.push_str("</tr>");

    let max = u32::from(MAX_BAND_LEVEL);
    html.push_str("<tr>");
    html.push_str(&label_cell("Gain"));
    for band in bands {
        let _ = write!(
            html,
            r#"
        <td class='align-middle' style=" margin-bottom: 1rem;">
            <div class="progress" style="height: 1rem;">
                <div class="progress-bar bg-info" style="width: {}%; color:#000;">G{}/{max}</div>
            </div>
        </td>"#,
            u32::from(band.gain) * 100 / max,
            band.gain
        );
    }
    html.push_str("</tr>");

    html.push_str("<tr>");
    html.push_str(&label_cell("Tone"));
    for band in bands {
        let _ = write!(
            html,
            r#"
        <td class='align-middle'>
            <div class="progress" style="height: 15px;">
                <div class="progress-bar bg-warning" style="width: {}%; color:#000;">T{}/{max}</div>
            </div>
        </td>"#,
            u32::from(band.tone) * 100 / max,
            band.tone
        );
    }
    html.push_str("</tr>");

    html.push_str("</table>");
    html
}

fn entry_rows(entry: &DemoEntry) -> String {
    let wet_name = file_name(&entry.wet);
    let wet_amp_name = file_name(&entry.wet_amp);
    let wet_amp_label = wet_amp_name.split('_').take(2).collect::<Vec<_>>().join("_");
    let wet_label = wet_name.split('_').next().unwrap_or(wet_name);

    format!(
        r#"
    <tr>
        <td class="align-middle">{index}</td>
        <td class="align-middle" colspan="2">
            {bands}
        </td>
    </tr>
    <tr>
        <td></td>
        <td class="align-middle">
            <b>Dry+Amp:</b> <a href="{dry_amp}">{dry_amp_name}</a><br>
            <audio controls>
                <source src="{dry_amp}" type="audio/mp3">
            </audio><br>
            <b>Dry DI:</b> <a href="{dry}">{dry_name}</a><br>
            <audio controls>
                <source src="{dry}" type="audio/mp3">
            </audio>
        </td>
        <td class="align-middle">
            <b>Wet+Amp:</b> <a href="{wet_amp}">{wet_amp_label}_wet</a><br>
            <audio controls>
                <source src="{wet_amp}" type="audio/mp3">
            </audio><br>
            <b>Wet DI:</b> <a href="{wet}">{wet_label}</a><br>
            <audio controls>
                <source src="{wet}" type="audio/mp3">
            </audio>
        </td>
    </tr>
    "#,
        index = entry.index,
        bands = band_table(&entry.bands),
        dry_amp = entry.dry_amp,
        dry_amp_name = file_name(&entry.dry_amp),
        dry = entry.dry,
        dry_name = file_name(&entry.dry),
        wet_amp = entry.wet_amp,
        wet = entry.wet,
    )
}

fn section_rows(source: &str) -> String {
    format!(
        r##"
    <tr><td colspan="3"><hr></td></tr>
    <tr>
        <td colspan="3" class="text-center" id="{source}"><h3>{}</h3><a style="size: 0.5rem;" href="#index">Back to top</a></td>
    </tr>
                "##,
        capitalize(source)
    )
}

/// Render the full page. A section heading and index link is emitted each
/// time the dry source changes between consecutive entries.
pub fn render_page(entries: &[DemoEntry]) -> String {
    let mut index_links = Vec::new();
    let mut rows = String::new();
    let mut prev_dry: Option<&str> = None;

    for entry in entries {
        if prev_dry != Some(entry.dry.as_str()) {
            rows.push_str(&section_rows(&entry.source));
            index_links.push(format!(
                r##"<a href="#{}">{}</a>"##,
                entry.source,
                capitalize(&entry.source)
            ));
            prev_dry = Some(entry.dry.as_str());
        }
        rows.push_str(&entry_rows(entry));
    }

    let mut page = String::from(HEADER);
    page.push_str("\n<h2 id=\"index\">Index</h2>\n");
    page.push_str(&index_links.join("<br>\n"));
    page.push_str("<br><br>");
    page.push_str(&rows);
    page.push_str(FOOTER);
    page
}

/// Write the page to `path`, replacing any existing file.
pub fn write_page<P: AsRef<Path>>(path: P, html: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, html)?;
    info!(path = %path.display(), "wrote demo page");
    Ok(())
}
