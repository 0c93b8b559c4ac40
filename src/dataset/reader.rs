use std::path::Path;

use crate::errors::GenError;

/// Row and column counts of a tab-separated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetShape {
    pub rows: u64,
    pub cols: usize,
}

/// Parse a generated dataset and check that it is rectangular and numeric.
///
/// Blank lines are skipped by the reader, so a file of zero-column rows reads as empty.
///
/// # Errors
/// Returns `GenError::Csv`/`GenError::Io` if the file cannot be read, and
/// `GenError::Malformed` on a ragged row or a non-numeric field.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<DatasetShape, GenError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;
    let mut shape = DatasetShape { rows: 0, cols: 0 };
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(shape.rows + 1, |p| p.line());
        if shape.rows == 0 {
            shape.cols = record.len();
        } else if record.len() != shape.cols {
            return Err(GenError::Malformed {
                line,
                reason: format!("expected {} columns, found {}", shape.cols, record.len()),
            });
        }
        for field in &record {
            if field.trim().parse::<f64>().is_err() {
                return Err(GenError::Malformed { line, reason: format!("not a number: {field:?}") });
            }
        }
        shape.rows += 1;
    }
    log::debug!("read_dataset: {} -> {:?}", path.as_ref().display(), shape);
    Ok(shape)
}
