use honggfuzz::fuzz;
use prism_tools::renamer::parse_band_info;
use prism_tools::{parse_band_settings, source_name};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(text) = std::str::from_utf8(data) {
                let _ = parse_band_settings(text);
                let _ = source_name(text);
                let _ = parse_band_info("fuzz", text);
            }
        });
    }
}
