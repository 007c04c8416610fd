//! Minimal column-oriented table used by every scorer.
//!
//! Inputs arrive as delimited text files with per-scorer column-name
//! contracts; outputs are the same table plus one or more new named columns
//! (additive, never destructive). A `Frame` keeps column insertion order so
//! a written file stays diffable against its input.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{BrandliftError, Result};

/// A single column: either fully numeric or free text.
///
/// Numeric detection happens at load time — a column is `Float` only when
/// every cell parses as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Column-oriented table with stable column order.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    order: Vec<String>,
    cols: HashMap<String, Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.order
            .first()
            .and_then(|name| self.cols.get(name))
            .map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.cols.contains_key(name)
    }

    /// Verify that every column in `required` is present, collecting the
    /// full missing set into a single error.
    pub fn require_columns(&self, context: &str, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| (*name).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BrandliftError::missing_columns(context, missing))
        }
    }

    /// Numeric column accessor.
    pub fn float(&self, name: &str) -> Result<&[f64]> {
        match self.cols.get(name) {
            Some(Column::Float(v)) => Ok(v),
            Some(Column::Str(_)) => Err(BrandliftError::NonNumericColumn {
                column: name.to_string(),
            }),
            None => Err(BrandliftError::missing_columns("frame", vec![name.to_string()])),
        }
    }

    /// Text column accessor.
    pub fn str_col(&self, name: &str) -> Result<&[String]> {
        match self.cols.get(name) {
            Some(Column::Str(v)) => Ok(v),
            Some(Column::Float(_)) => Err(BrandliftError::Config(format!(
                "column '{name}' is numeric, expected text"
            ))),
            None => Err(BrandliftError::missing_columns("frame", vec![name.to_string()])),
        }
    }

    /// Insert (or replace) a numeric column. Length must match existing rows.
    pub fn insert_float(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.insert(name, Column::Float(values))
    }

    /// Insert (or replace) a text column. Length must match existing rows.
    pub fn insert_str(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        self.insert(name, Column::Str(values))
    }

    fn insert(&mut self, name: &str, column: Column) -> Result<()> {
        if !self.order.is_empty() && column.len() != self.len() {
            return Err(BrandliftError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                actual: column.len(),
            });
        }
        if !self.cols.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.cols.insert(name.to_string(), column);
        Ok(())
    }

    /// Stable sort of all rows by a numeric column.
    ///
    /// NaN compares equal to everything, so NaN rows keep their relative
    /// position rather than poisoning the sort.
    pub fn sort_by_float(&mut self, name: &str, order: SortOrder) -> Result<()> {
        let key = self.float(name)?.to_vec();
        let mut perm: Vec<usize> = (0..key.len()).collect();
        perm.sort_by(|&a, &b| {
            let cmp = key[a]
                .partial_cmp(&key[b])
                .unwrap_or(std::cmp::Ordering::Equal);
            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
        self.apply_permutation(&perm);
        Ok(())
    }

    fn apply_permutation(&mut self, perm: &[usize]) {
        for column in self.cols.values_mut() {
            match column {
                Column::Float(v) => {
                    *v = perm.iter().map(|&i| v[i]).collect();
                }
                Column::Str(v) => {
                    *v = perm.iter().map(|&i| v[i].clone()).collect();
                }
            }
        }
    }

    // ── CSV I/O ──────────────────────────────────────────────────────────────

    /// Read a delimited file into a frame, detecting numeric columns.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (j, cell) in record.iter().enumerate() {
                if j < raw.len() {
                    raw[j].push(cell.to_string());
                }
            }
        }

        let mut frame = Frame::new();
        for (name, cells) in headers.iter().zip(raw.into_iter()) {
            let parsed: Option<Vec<f64>> =
                cells.iter().map(|c| c.trim().parse::<f64>().ok()).collect();
            match parsed {
                Some(values) if !cells.is_empty() => frame.insert_float(name, values)?,
                _ => frame.insert_str(name, cells)?,
            }
        }
        Ok(frame)
    }

    /// Write the frame back out, columns in insertion order.
    pub fn to_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = csv::Writer::from_path(path)?;
        self.to_csv(writer)
    }

    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.to_csv(csv::Writer::from_writer(writer))
    }

    fn to_csv<W: Write>(&self, mut writer: csv::Writer<W>) -> Result<()> {
        writer.write_record(&self.order)?;
        for i in 0..self.len() {
            let row: Vec<String> = self
                .order
                .iter()
                .map(|name| match &self.cols[name] {
                    Column::Float(v) => v[i].to_string(),
                    Column::Str(v) => v[i].clone(),
                })
                .collect();
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Frame {
        let mut f = Frame::new();
        f.insert_str("creator_id", vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        f.insert_float("score", vec![0.2, 0.9, 0.5]).unwrap();
        f
    }

    #[test]
    fn require_columns_names_every_missing_column() {
        let f = sample();
        let err = f
            .require_columns("test", &["creator_id", "engagement_rate", "matched"])
            .unwrap_err();
        match err {
            BrandliftError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["engagement_rate".to_string(), "matched".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sort_descending_reorders_all_columns() {
        let mut f = sample();
        f.sort_by_float("score", SortOrder::Descending).unwrap();
        assert_eq!(f.float("score").unwrap(), &[0.9, 0.5, 0.2]);
        assert_eq!(
            f.str_col("creator_id").unwrap(),
            &["b".to_string(), "c".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut f = sample();
        let err = f.insert_float("bad", vec![1.0]).unwrap_err();
        assert!(matches!(err, BrandliftError::LengthMismatch { .. }));
    }

    #[test]
    fn csv_round_trip_preserves_columns() {
        let input = "creator_id,engagement_rate\nalice,0.12\nbob,0.34\n";
        let f = Frame::from_csv_reader(input.as_bytes()).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.float("engagement_rate").unwrap(), &[0.12, 0.34]);

        let mut out = Vec::new();
        f.to_csv_writer(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("creator_id,engagement_rate"));
        assert!(text.contains("alice,0.12"));
    }

    #[test]
    fn mixed_column_stays_text() {
        let input = "id,val\nx,1.5\ny,n/a\n";
        let f = Frame::from_csv_reader(input.as_bytes()).unwrap();
        assert!(f.float("val").is_err());
        assert_eq!(f.str_col("val").unwrap(), &["1.5".to_string(), "n/a".to_string()]);
    }
}
