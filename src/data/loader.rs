use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{s, Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{Result, TrainerError};

/// Load a numeric CSV (with a header row) into a 2-D array.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let matrix = read_matrix(file)?;
    debug!(
        path = %path.display(),
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        "Loaded matrix"
    );
    Ok(matrix)
}

/// Parse a numeric CSV (with a header row) from any reader.
///
/// Every cell must parse as a finite `f64` and every row must have the same width.
pub fn read_matrix<R: Read>(reader: R) -> Result<Array2<f64>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let width = rdr.headers()?.len();

    let mut values = Vec::new();
    let mut rows = 0;
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        // +2: one for the header, one for 1-based numbering
        let row_number = line + 2;
        for (col, cell) in record.iter().enumerate() {
            let value: f64 = cell.parse().map_err(|_| {
                TrainerError::InvalidInput(format!(
                    "row {}, column {}: '{}' is not a number",
                    row_number,
                    col + 1,
                    cell
                ))
            })?;
            if !value.is_finite() {
                return Err(TrainerError::InvalidInput(format!(
                    "row {}, column {}: '{}' is not a finite number",
                    row_number,
                    col + 1,
                    cell
                )));
            }
            values.push(value);
        }
        rows += 1;
    }

    if rows == 0 || width == 0 {
        return Err(TrainerError::InvalidInput("CSV has no data rows".to_string()));
    }

    Array2::from_shape_vec((rows, width), values)
        .map_err(|e| TrainerError::InvalidInput(format!("ragged CSV rows: {}", e)))
}

/// Split a combined array into features (all but last column) and labels (last column).
pub fn split_features_labels(combined: &Array2<f64>) -> Result<(Array2<f64>, Array1<f64>)> {
    let cols = combined.ncols();
    if cols < 2 {
        return Err(TrainerError::InvalidInput(format!(
            "combined array needs at least one feature column and a label column, got {} column(s)",
            cols
        )));
    }
    let features = combined.slice(s![.., ..cols - 1]).to_owned();
    let labels = combined.column(cols - 1).to_owned();
    Ok((features, labels))
}

/// Shuffle rows with a fixed seed and split off `test_ratio` of them.
pub fn train_test_split(
    combined: &Array2<f64>,
    test_ratio: f64,
    seed: u64,
) -> Result<(Array2<f64>, Array2<f64>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(TrainerError::InvalidInput(format!(
            "test ratio must be between 0 and 1, got {}",
            test_ratio
        )));
    }

    let rows = combined.nrows();
    let test_rows = ((rows as f64) * test_ratio).round() as usize;
    if test_rows == 0 || test_rows >= rows {
        return Err(TrainerError::InvalidInput(format!(
            "cannot split {} rows with test ratio {}",
            rows, test_ratio
        )));
    }

    let mut order: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let (test_idx, train_idx) = order.split_at(test_rows);
    Ok((
        combined.select(Axis(0), train_idx),
        combined.select(Axis(0), test_idx),
    ))
}
