//! C++ header generation for the plugin's `VAELatentDataFrame`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::effect::Effect;
use crate::error::Result;
use crate::table::{level_value, LatentTable, LatentVector, LATENT_DIM, LEVELS};

const INDENT: &str = "            ";

const PREFIX: &str = r#"#pragma once

#include <JuceHeader.h>

class VAELatentDataFrame
{
public:
    void getLatent(int effectType, int gain, int tone, std::array<float,8>& latentOut)
    {
        // Effect type: 0,1,2 (Distortion, Fuzz, Overdrive)
        // Gain: 0,2,4,6,8,10
        // Tone: 0,2,4,6,8,10

        int gainIndex = gain / 2;
        int toneIndex = tone / 2;

        if (effectType < 0 || effectType > 2 ||
            gainIndex < 0 || gainIndex > 5 ||
            toneIndex < 0 || toneIndex > 5)
        {
            // Invalid parameters, return zero latent
            latentOut.fill(0.0f);
            return;
        }
        latentOut = data[effectType][gainIndex][toneIndex];
    }

    VAELatentDataFrame() :
"#;

const SUFFIX: &str = r#"
    {}
    ~VAELatentDataFrame() = default;

private:
    std::array<std::array<std::array<std::array<float, 8>, 6>, 6>, 3> data;
};
"#;

/// Format a value as a C++ float literal. `Debug` keeps the shortest
/// round-trip digits and always includes a `.` or an exponent.
pub fn float_literal(value: f64) -> String {
    format!("{value:?}f")
}

/// Format one latent vector as a brace initializer.
pub fn vector_literal(vector: &LatentVector) -> String {
    let items: Vec<String> = vector.iter().map(|v| float_literal(*v)).collect();
    format!("{{{}}}", items.join(","))
}

/// Render just the nested initializer for the `data` member.
pub fn render_initializer(table: &LatentTable) -> String {
    let mut out = String::new();
    let zero = [0.0; LATENT_DIM];

    // writeln! into a String cannot fail
    let _ = writeln!(out, "{INDENT}data{{{{");
    for effect in Effect::ALL {
        let name = effect.display_name();
        let _ = writeln!(out, "{INDENT}    // Effect {}:{name}", effect.index());
        let _ = writeln!(out, "{INDENT}    {{{{");
        for g in 0..LEVELS {
            let _ = writeln!(out, "{INDENT}        // Gain {} - {name}", level_value(g));
            let _ = writeln!(out, "{INDENT}        {{{{");
            for t in 0..LEVELS {
                let cell = table.cell(effect.index(), g, t).unwrap_or(&zero);
                let _ = writeln!(
                    out,
                    "{INDENT}            {}, // Tone {}",
                    vector_literal(cell),
                    level_value(t)
                );
            }
            let _ = writeln!(out, "{INDENT}        }}}},");
        }
        let _ = writeln!(out, "{INDENT}    }}}},");
    }
    let _ = write!(out, "{INDENT}}}}}");
    out
}

/// Render the complete header file.
pub fn render_header(table: &LatentTable) -> String {
    let mut out = String::with_capacity(PREFIX.len() + SUFFIX.len() + 32 * 1024);
    out.push_str(PREFIX);
    out.push('\n');
    out.push_str(&render_initializer(table));
    out.push_str(SUFFIX);
    out
}

/// Write `header` to `path`, replacing any existing file.
pub fn write_header<P: AsRef<Path>>(path: P, header: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, header)?;
    info!(path = %path.display(), bytes = header.len(), "wrote latent header");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LatentRecord;
    use crate::table::CompileMode;

    #[test]
    fn float_literals_are_valid_cpp() {
        assert_eq!(float_literal(0.1), "0.1f");
        assert_eq!(float_literal(1.0), "1.0f");
        assert_eq!(float_literal(-2.5), "-2.5f");
        assert_eq!(float_literal(1e-5), "1e-5f");
    }

    #[test]
    fn vector_literal_is_braced() {
        let v = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.5];
        assert_eq!(
            vector_literal(&v),
            "{0.0f,1.0f,2.0f,3.0f,4.0f,5.0f,6.0f,7.5f}"
        );
    }

    #[test]
    fn header_contains_annotated_cells() {
        let r = LatentRecord::new(
            Effect::Fuzz,
            4,
            6,
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8],
        );
        let table = LatentTable::compile([&r], CompileMode::Lenient).unwrap();
        let header = render_header(&table);

        assert!(header.starts_with("#pragma once"));
        assert!(header.contains("// Effect 1:Fuzz (JAM Red Muck)"));
        assert!(header.contains("// Gain 4 - Fuzz (JAM Red Muck)"));
        assert!(header.contains("{0.1f,0.2f,0.3f,0.4f,0.5f,0.6f,0.7f,0.8f}, // Tone 6"));
        let member = "std::array<std::array<std::array<std::array<float, 8>, 6>, 6>, 3> data;";
        assert!(header.contains(member));
        assert_eq!(header.matches("// Tone ").count(), 3 * 6 * 6);
        assert_eq!(header.matches("// Gain ").count(), 3 * 6);
    }

    #[test]
    fn initializer_braces_balance() {
        let header = render_initializer(&LatentTable::default());
        assert_eq!(header.matches('{').count(), header.matches('}').count());
    }
}
