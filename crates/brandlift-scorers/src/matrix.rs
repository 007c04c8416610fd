//! Frame-to-matrix helpers shared by the trained scorers.

use ndarray::Array2;

use brandlift_common::{Frame, Result};

/// Assemble named numeric columns into a row-major feature matrix.
pub(crate) fn feature_matrix(frame: &Frame, names: &[String]) -> Result<Array2<f64>> {
    let n = frame.len();
    let d = names.len();
    let mut flat = Vec::with_capacity(n * d);
    let mut cols = Vec::with_capacity(d);
    for name in names {
        cols.push(frame.float(name)?);
    }
    for i in 0..n {
        for col in &cols {
            flat.push(col[i]);
        }
    }
    Ok(Array2::from_shape_vec((n, d), flat).expect("row-major layout matches (n, d)"))
}

/// Select a subset of rows into a new matrix.
pub(crate) fn select_rows(x: &Array2<f64>, rows: &[usize]) -> Array2<f64> {
    let d = x.ncols();
    let mut flat = Vec::with_capacity(rows.len() * d);
    for &i in rows {
        flat.extend(x.row(i).iter().copied());
    }
    Array2::from_shape_vec((rows.len(), d), flat).expect("row-major layout matches (rows, d)")
}

/// Select a subset of values from a vector.
pub(crate) fn select_values(values: &[f64], rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&i| values[i]).collect()
}

/// Distinct integer classes observed in a 0/1 label column, sorted.
pub(crate) fn observed_classes(labels: &[f64]) -> Vec<i64> {
    let mut classes: Vec<i64> = labels.iter().map(|&v| v.round() as i64).collect();
    classes.sort_unstable();
    classes.dedup();
    classes
}
