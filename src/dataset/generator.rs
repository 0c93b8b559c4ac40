use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;

use super::options::{GeneratorConfig, VALUE_SPAN};
use super::sink::{RowSink, TsvSink};
use crate::errors::GenError;

/// Draws rows of independent uniform values in `[base, base + VALUE_SPAN)`.
pub struct RowSampler {
    rng: StdRng,
    base: f64,
    cols: usize,
    row: Vec<f64>,
}

impl RowSampler {
    /// # Errors
    /// Returns `GenError::InvalidRange` if `base` is not finite or so large that
    /// `base + VALUE_SPAN` rounds back to `base` (an empty interval).
    pub fn new(base: f64, cols: usize, seed: Option<u64>) -> Result<Self, GenError> {
        let top = base + VALUE_SPAN;
        if !base.is_finite() || !top.is_finite() || top <= base {
            return Err(GenError::InvalidRange(base));
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { rng, base, cols, row: Vec::with_capacity(cols) })
    }

    pub fn next_row(&mut self) -> &[f64] {
        self.row.clear();
        for _ in 0..self.cols {
            let v = self.rng.random_range(self.base..self.base + VALUE_SPAN);
            self.row.push(v);
        }
        &self.row
    }
}

/// Write `rows` sampled rows into `sink`. Returns the number of rows written.
///
/// # Errors
/// Returns an error if the sink fails to write or flush.
pub fn generate_with(
    mut sink: Box<dyn RowSink + '_>,
    sampler: &mut RowSampler,
    rows: usize,
) -> Result<u64, GenError> {
    let mut written = 0u64;
    for _ in 0..rows {
        sink.write_row(sampler.next_row())?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}

/// Create (or truncate) `cfg.path` and fill it with `cfg.rows` x `cfg.cols` values.
///
/// # Errors
/// Returns `GenError::Io` if the file cannot be created or written, and
/// `GenError::InvalidRange` for a non-finite value base.
pub fn generate(cfg: &GeneratorConfig) -> Result<u64, GenError> {
    let mut sampler = RowSampler::new(cfg.value_base, cfg.cols, cfg.seed)?;
    let file = File::create(&cfg.path)?;
    log::info!(
        "generate: path={}, rows={}, cols={}, base={}, seeded={}",
        cfg.path.display(),
        cfg.rows,
        cfg.cols,
        cfg.value_base,
        cfg.seed.is_some()
    );
    let written = generate_with(Box::new(TsvSink::new(file)), &mut sampler, cfg.rows)?;
    log::debug!("generate: wrote {written} rows");
    Ok(written)
}
