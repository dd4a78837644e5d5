//! Tabular artifacts exported from pandas
//!
//! Accepts `DataFrame.to_json(orient="split")` and `orient="records"`.

use bookrec_core::record::{
    COL_AUTHOR, COL_AVERAGE_RATING, COL_IMAGE_URL, COL_TITLE, COL_TOTAL_RATINGS,
};
use bookrec_core::{DisplayRecord, Error, Result, REQUIRED_COLUMNS};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameFile {
    Split {
        columns: Vec<Value>,
        #[serde(default)]
        index: Vec<Value>,
        data: Vec<Vec<Value>>,
    },
    Records(Vec<Map<String, Value>>),
}

/// A loaded table: column names, optional row labels and cell rows
#[derive(Debug, Clone)]
pub struct Frame {
    artifact: String,
    columns: Vec<String>,
    index: Vec<Value>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Read a table artifact from disk
    pub fn read(artifact: &str, path: &Path) -> Result<Self> {
        let bytes = crate::read_artifact(artifact, path)?;
        Self::from_slice(artifact, &bytes)
    }

    pub fn from_slice(artifact: &str, bytes: &[u8]) -> Result<Self> {
        let file: FrameFile = serde_json::from_slice(bytes)
            .map_err(|e| Error::Serialization(format!("{}: {}", artifact, e)))?;

        match file {
            FrameFile::Split { columns, index, data } => {
                // pivot columns are user ids, often numeric
                let columns: Vec<String> = columns
                    .into_iter()
                    .map(|c| match c {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect();
                if let Some((i, row)) = data.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
                    return Err(Error::schema(
                        artifact,
                        format!("row {} has {} cells, expected {}", i, row.len(), columns.len()),
                    ));
                }
                if !index.is_empty() && index.len() != data.len() {
                    return Err(Error::schema(
                        artifact,
                        format!("index has {} labels for {} rows", index.len(), data.len()),
                    ));
                }
                Ok(Self {
                    artifact: artifact.to_string(),
                    columns,
                    index,
                    rows: data,
                })
            }
            FrameFile::Records(records) => {
                let mut columns: Vec<String> = Vec::new();
                for record in &records {
                    for key in record.keys() {
                        if !columns.contains(key) {
                            columns.push(key.clone());
                        }
                    }
                }
                let rows = records
                    .into_iter()
                    .map(|mut record| {
                        columns
                            .iter()
                            .map(|c| record.remove(c).unwrap_or(Value::Null))
                            .collect()
                    })
                    .collect();
                Ok(Self {
                    artifact: artifact.to_string(),
                    columns,
                    index: Vec::new(),
                    rows,
                })
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Fail with every required column that is absent
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::schema(
                &self.artifact,
                format!("missing column(s) {}", quoted(&missing)),
            ))
        }
    }

    /// Convert every row into a display record, in table order
    pub fn display_records(&self) -> Result<Vec<DisplayRecord>> {
        self.require_columns(&REQUIRED_COLUMNS)?;
        let col = |name: &str| self.column(name).unwrap_or_default();
        let (title, author, image, rating, count) = (
            col(COL_TITLE),
            col(COL_AUTHOR),
            col(COL_IMAGE_URL),
            col(COL_AVERAGE_RATING),
            col(COL_TOTAL_RATINGS),
        );

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(DisplayRecord {
                    title: self.required_str(i, COL_TITLE, &row[title])?,
                    author: optional_str(&row[author]),
                    image_url: optional_str(&row[image]),
                    average_rating: self.float(i, COL_AVERAGE_RATING, &row[rating])?,
                    total_ratings: self.count(i, COL_TOTAL_RATINGS, &row[count])?,
                })
            })
            .collect()
    }

    /// Row labels: the split index, or the title column when there is none
    pub fn labels(&self) -> Result<Vec<String>> {
        if !self.index.is_empty() {
            return self
                .index
                .iter()
                .enumerate()
                .map(|(i, label)| self.required_str(i, "index", label))
                .collect();
        }
        let title = self.column(COL_TITLE).ok_or_else(|| {
            Error::schema(
                &self.artifact,
                format!("no row index and no '{}' column", COL_TITLE),
            )
        })?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.required_str(i, COL_TITLE, &row[title]))
            .collect()
    }

    fn required_str(&self, row: usize, column: &str, value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.bad_cell(row, column, "a string", other)),
        }
    }

    fn float(&self, row: usize, column: &str, value: &Value) -> Result<f64> {
        value
            .as_f64()
            .ok_or_else(|| self.bad_cell(row, column, "a number", value))
    }

    fn count(&self, row: usize, column: &str, value: &Value) -> Result<u64> {
        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        // pandas writes integer columns with NaNs as floats
        match value.as_f64() {
            Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            _ => Err(self.bad_cell(row, column, "a non-negative integer", value)),
        }
    }

    fn bad_cell(&self, row: usize, column: &str, expected: &str, found: &Value) -> Error {
        Error::schema(
            &self.artifact,
            format!("row {} column '{}': expected {}, found {}", row, column, expected, found),
        )
    }
}

fn optional_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}
