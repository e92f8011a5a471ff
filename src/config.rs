use std::path::PathBuf;

use crate::table::CompileMode;

/// Settings for the latent header compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// CSV exported by the VAE training notebook.
    pub input: PathBuf,
    /// Generated C++ header.
    pub output: PathBuf,
    pub mode: CompileMode,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("PRISM_vae_latents.csv"),
            output: PathBuf::from("VAEdataframe.h"),
            mode: CompileMode::Lenient,
        }
    }
}

/// Settings for the demo page generator. Directory names are relative to
/// `root` and are used verbatim in the page's links.
#[derive(Debug, Clone)]
pub struct DemoPageConfig {
    pub root: PathBuf,
    pub dry_dir: String,
    pub wet_dir: String,
    /// Subdirectory of both `dry_dir` and `wet_dir` holding amp renders.
    pub amp_dir: String,
    pub output: PathBuf,
}

impl Default for DemoPageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dry_dir: "dry".to_string(),
            wet_dir: "wet".to_string(),
            amp_dir: "amp".to_string(),
            output: PathBuf::from("demos-multiband.html"),
        }
    }
}

/// Settings for the band renamer.
#[derive(Debug, Clone)]
pub struct RenamerConfig {
    pub root: PathBuf,
    /// Only directories whose name starts with this prefix are scanned.
    pub dir_prefix: String,
    /// Metadata file expected next to every audio file.
    pub info_file: String,
    /// Marker stripped from renamed files.
    pub strip_marker: String,
    pub dry_run: bool,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dir_prefix: "example".to_string(),
            info_file: "band_settings_8bands.txt".to_string(),
            strip_marker: "_prism8".to_string(),
            dry_run: false,
        }
    }
}
