use crate::{Error, Result};

/// Square item-item similarity matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from nested rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(Error::schema(
                    "similarity",
                    format!("row {} has {} columns, expected {}", i, row.len(), dim),
                ));
            }
            data.extend(row);
        }
        Ok(Self { dim, data })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Row `i` as a slice of scores, indexed by column position
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.dim {
            return None;
        }
        let start = i * self.dim;
        Some(&self.data[start..start + self.dim])
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}
