//! Offline tooling for the Prism multiband effect plugin.
//!
//! * [`table`] and [`codegen`] turn the VAE latent CSV into the C++ header
//!   the plugin embeds.
//! * [`demo_page`] builds the static page of audio demos.
//! * [`renamer`] tags rendered audio files with their band settings.

pub mod bands;
pub mod codegen;
pub mod config;
pub mod demo_page;
pub mod effect;
pub mod error;
pub mod io_utils;
pub mod logging;
pub mod record;
pub mod renamer;
pub mod table;

pub use bands::{parse_band_settings, source_name, BandSetting, BAND_COUNT};
pub use codegen::{render_header, write_header};
pub use config::{CompilerConfig, DemoPageConfig, RenamerConfig};
pub use effect::Effect;
pub use error::{PrismError, Result};
pub use record::{parse_records, read_records, LatentRecord};
pub use table::{CompileMode, LatentTable, LatentVector, LATENT_DIM, LEVELS};

/// Read, compile and render the latent header described by `config`,
/// returning the compiled table and the header text. Nothing is written.
pub fn compile_header(config: &CompilerConfig) -> Result<(LatentTable, String)> {
    let records = read_records(&config.input)?;
    let table = LatentTable::compile(&records, config.mode)?;
    let header = render_header(&table);
    Ok((table, header))
}
