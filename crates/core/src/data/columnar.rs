use thiserror::Error;

use crate::model::{Channel, EegData, ShapeError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnarError {
    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Convert a row-major sample buffer into columnar [`EegData`].
///
/// Each row holds one value per channel; `time[i] = i / fs`.
pub fn buffer_to_columnar<S: AsRef<str>>(
    rows: &[Vec<f64>],
    sampling_rate_hz: f64,
    channel_names: &[S],
) -> Result<EegData, ColumnarError> {
    if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
        return Err(ShapeError::InvalidRate(sampling_rate_hz).into());
    }
    let dt = 1.0 / sampling_rate_hz;
    let width = channel_names.len();

    let mut time = Vec::with_capacity(rows.len());
    let mut columns: Vec<Vec<f64>> = (0..width)
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ColumnarError::RowWidth {
                row: i,
                expected: width,
                actual: row.len(),
            });
        }
        time.push(i as f64 * dt);
        for (column, value) in columns.iter_mut().zip(row) {
            column.push(*value);
        }
    }

    let channels = channel_names
        .iter()
        .zip(columns)
        .map(|(name, samples)| Channel::new(name.as_ref(), samples))
        .collect();
    Ok(EegData::new(time, channels, sampling_rate_hz)?)
}
