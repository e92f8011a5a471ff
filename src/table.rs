//! Dense effect × gain × tone latent table.

use tracing::{debug, warn};

use crate::effect::{Effect, EFFECT_COUNT};
use crate::error::{PrismError, Result};
use crate::record::LatentRecord;

/// Elements per latent vector.
pub const LATENT_DIM: usize = 8;
/// Quantized knob positions per axis (0,2,4,6,8,10).
pub const LEVELS: usize = 6;
/// Knob value step between adjacent levels.
pub const LEVEL_STEP: i64 = 2;

pub type LatentVector = [f64; LATENT_DIM];

/// How strictly [`LatentTable::compile`] treats imperfect input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileMode {
    /// Missing cells stay zero, odd knob values alias, duplicates overwrite.
    #[default]
    Lenient,
    /// Every cell must be written exactly once from an on-grid knob value.
    Strict,
}

/// Map a knob value to its level index. Integer division truncates toward
/// zero, so odd values share a cell with the even value below them.
pub fn level_index(value: i64) -> Option<usize> {
    let idx = value / LEVEL_STEP;
    (0..LEVELS as i64).contains(&idx).then_some(idx as usize)
}

/// Knob value at the centre of level `index`.
pub fn level_value(index: usize) -> i64 {
    index as i64 * LEVEL_STEP
}

/// Fixed-shape table of latent vectors. Cells not covered by input are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentTable {
    cells: [[[LatentVector; LEVELS]; LEVELS]; EFFECT_COUNT],
    populated: [[[bool; LEVELS]; LEVELS]; EFFECT_COUNT],
}

impl Default for LatentTable {
    fn default() -> Self {
        Self {
            cells: [[[[0.0; LATENT_DIM]; LEVELS]; LEVELS]; EFFECT_COUNT],
            populated: [[[false; LEVELS]; LEVELS]; EFFECT_COUNT],
        }
    }
}

impl LatentTable {
    /// Build the table from CSV rows.
    ///
    /// Any vector whose length is not [`LATENT_DIM`] aborts the build. Knob
    /// values that fall outside the six levels abort the build in both modes
    /// because the table has no cell for them. See [`CompileMode`] for the
    /// remaining checks.
    pub fn compile<'a, I>(records: I, mode: CompileMode) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LatentRecord>,
    {
        let mut table = Self::default();
        let mut rows = 0usize;

        for record in records {
            rows += 1;
            let vector = LatentVector::try_from(record.vector.as_slice()).map_err(|_| {
                PrismError::VectorLength {
                    found: record.vector.len(),
                    line: record.line,
                }
            })?;

            let g = axis_index("gain", record.gain, record.line, mode)?;
            let t = axis_index("tone", record.tone, record.line, mode)?;
            let e = record.effect.index();

            if table.populated[e][g][t] {
                if mode == CompileMode::Strict {
                    return Err(PrismError::DuplicateCell {
                        effect: record.effect.label(),
                        gain: record.gain,
                        tone: record.tone,
                        line: record.line,
                    });
                }
                debug!(
                    effect = record.effect.label(),
                    gain = record.gain,
                    tone = record.tone,
                    line = record.line,
                    "overwriting latent cell"
                );
            }

            table.cells[e][g][t] = vector;
            table.populated[e][g][t] = true;
        }

        let missing = table.missing_cells();
        if !missing.is_empty() {
            if mode == CompileMode::Strict {
                return Err(PrismError::IncompleteTable {
                    missing: missing
                        .iter()
                        .map(|(e, g, t)| format!("{e} gain={g} tone={t}"))
                        .collect(),
                });
            }
            warn!(
                missing = missing.len(),
                "latent table incomplete, missing cells default to zero"
            );
        }

        debug!(rows, populated = table.populated_count(), "compiled latent table");
        Ok(table)
    }

    /// Vector stored at the given indices, if they are in range.
    pub fn cell(
        &self,
        effect: usize,
        gain_index: usize,
        tone_index: usize,
    ) -> Option<&LatentVector> {
        self.cells.get(effect)?.get(gain_index)?.get(tone_index)
    }

    /// Consumer-side lookup by raw knob values. Any out-of-range argument
    /// yields the zero vector.
    pub fn lookup(&self, effect_type: i32, gain: i32, tone: i32) -> LatentVector {
        let (Ok(e), Some(g), Some(t)) = (
            usize::try_from(effect_type),
            level_index(i64::from(gain)),
            level_index(i64::from(tone)),
        ) else {
            return [0.0; LATENT_DIM];
        };
        self.cell(e, g, t).copied().unwrap_or([0.0; LATENT_DIM])
    }

    pub fn is_populated(&self, effect: Effect, gain_index: usize, tone_index: usize) -> bool {
        self.populated[effect.index()]
            .get(gain_index)
            .and_then(|row| row.get(tone_index))
            .copied()
            .unwrap_or(false)
    }

    pub fn populated_count(&self) -> usize {
        self.populated.iter().flatten().flatten().filter(|p| **p).count()
    }

    /// Combinations never written, as `(effect, gain, tone)` knob values.
    pub fn missing_cells(&self) -> Vec<(Effect, i64, i64)> {
        let mut missing = Vec::new();
        for effect in Effect::ALL {
            for g in 0..LEVELS {
                for t in 0..LEVELS {
                    if !self.populated[effect.index()][g][t] {
                        missing.push((effect, level_value(g), level_value(t)));
                    }
                }
            }
        }
        missing
    }
}

fn axis_index(axis: &'static str, value: i64, line: u64, mode: CompileMode) -> Result<usize> {
    let idx = level_index(value)
        .filter(|_| value >= 0)
        .ok_or(PrismError::OutOfDomain { axis, value, line })?;
    if mode == CompileMode::Strict && value % LEVEL_STEP != 0 {
        return Err(PrismError::OffGrid { axis, value, line });
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(effect: Effect, gain: i64, tone: i64, fill: f64) -> LatentRecord {
        LatentRecord::new(effect, gain, tone, vec![fill; LATENT_DIM])
    }

    fn full_grid() -> Vec<LatentRecord> {
        let mut out = Vec::new();
        for effect in Effect::ALL {
            for g in 0..LEVELS {
                for t in 0..LEVELS {
                    let fill = (effect.index() * 100 + g * 10 + t) as f64;
                    out.push(rec(effect, level_value(g), level_value(t), fill));
                }
            }
        }
        out
    }

    #[test]
    fn level_index_boundaries() {
        assert_eq!(level_index(0), Some(0));
        assert_eq!(level_index(10), Some(5));
        assert_eq!(level_index(11), Some(5));
        assert_eq!(level_index(12), None);
        assert_eq!(level_index(-1), Some(0));
        assert_eq!(level_index(-2), None);
    }

    #[test]
    fn fuzz_row_lands_in_expected_cell() {
        let v = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let r = LatentRecord::new(Effect::Fuzz, 4, 6, v.clone());
        let table = LatentTable::compile([&r], CompileMode::Lenient).unwrap();
        assert_eq!(table.cell(1, 2, 3).unwrap().as_slice(), v.as_slice());
        assert!(table.is_populated(Effect::Fuzz, 2, 3));
        assert_eq!(table.populated_count(), 1);
    }

    #[test]
    fn absent_cells_are_zero() {
        let r = rec(Effect::Riot, 0, 0, 1.0);
        let table = LatentTable::compile([&r], CompileMode::Lenient).unwrap();
        assert_eq!(table.cell(2, 5, 5), Some(&[0.0; LATENT_DIM]));
        assert_eq!(table.missing_cells().len(), EFFECT_COUNT * LEVELS * LEVELS - 1);
    }

    #[test]
    fn wrong_vector_length_is_fatal() {
        for len in [7, 9] {
            let r = LatentRecord::new(Effect::Riot, 0, 0, vec![0.0; len]);
            let err = LatentTable::compile([&r], CompileMode::Lenient).unwrap_err();
            assert!(matches!(err, PrismError::VectorLength { found, .. } if found == len));
        }
    }

    #[test]
    fn out_of_domain_knob_is_fatal() {
        let r = rec(Effect::Riot, 12, 0, 1.0);
        let err = LatentTable::compile([&r], CompileMode::Lenient).unwrap_err();
        assert!(matches!(err, PrismError::OutOfDomain { axis: "gain", value: 12, .. }));
        let r = rec(Effect::Riot, 0, -1, 1.0);
        let err = LatentTable::compile([&r], CompileMode::Lenient).unwrap_err();
        assert!(matches!(err, PrismError::OutOfDomain { axis: "tone", value: -1, .. }));
    }

    #[test]
    fn odd_knob_aliases_in_lenient_mode() {
        let r = rec(Effect::Fuzz, 5, 1, 3.0);
        let table = LatentTable::compile([&r], CompileMode::Lenient).unwrap();
        assert_eq!(table.cell(1, 2, 0), Some(&[3.0; LATENT_DIM]));
    }

    #[test]
    fn strict_mode_rejects_off_grid_duplicates_and_gaps() {
        let r = rec(Effect::Fuzz, 5, 0, 3.0);
        assert!(matches!(
            LatentTable::compile([&r], CompileMode::Strict),
            Err(PrismError::OffGrid { axis: "gain", value: 5, .. })
        ));

        let mut rows = full_grid();
        rows.push(rec(Effect::Riot, 0, 0, 9.0));
        assert!(matches!(
            LatentTable::compile(&rows, CompileMode::Strict),
            Err(PrismError::DuplicateCell { .. })
        ));

        let mut rows = full_grid();
        rows.pop();
        match LatentTable::compile(&rows, CompileMode::Strict) {
            Err(PrismError::IncompleteTable { missing }) => {
                assert_eq!(missing, vec!["kingoftone gain=10 tone=10".to_string()]);
            }
            other => panic!("expected incomplete table, got {other:?}"),
        }

        let table = LatentTable::compile(&full_grid(), CompileMode::Strict).unwrap();
        assert!(table.missing_cells().is_empty());
    }

    #[test]
    fn later_rows_win_in_lenient_mode() {
        let rows = [rec(Effect::Riot, 2, 2, 1.0), rec(Effect::Riot, 2, 2, 2.0)];
        let table = LatentTable::compile(&rows, CompileMode::Lenient).unwrap();
        assert_eq!(table.cell(0, 1, 1), Some(&[2.0; LATENT_DIM]));
    }

    #[test]
    fn lookup_zero_fills_out_of_range() {
        let table = LatentTable::compile(&full_grid(), CompileMode::Strict).unwrap();
        assert_eq!(table.lookup(1, 4, 6), [123.0; LATENT_DIM]);
        assert_eq!(table.lookup(5, 4, 6), [0.0; LATENT_DIM]);
        assert_eq!(table.lookup(-1, 4, 6), [0.0; LATENT_DIM]);
        assert_eq!(table.lookup(0, 12, 0), [0.0; LATENT_DIM]);
        assert_eq!(table.lookup(0, 0, -2), [0.0; LATENT_DIM]);
        assert_eq!(table.lookup(0, 0, 11), [5.0; LATENT_DIM]);
    }
}
