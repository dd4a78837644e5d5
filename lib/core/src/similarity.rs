//! Item-item similarity lookup
//!
//! Pairs the pivot labels with the similarity matrix and answers
//! "which books are most similar to this one".

use crate::{Error, PivotIndex, Result, SimilarityMatrix};
use std::cmp::Ordering;

/// Default number of neighbors returned per query
pub const DEFAULT_NEIGHBORS: usize = 9;

/// A ranked neighbor of the query title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub title: &'a str,
    /// Row position in the pivot index
    pub position: usize,
    pub score: f64,
}

/// Similarity lookup over a pivot index and its aligned matrix
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    pivot: PivotIndex,
    matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Pair a pivot index with its matrix. The matrix must be n x n for n labels.
    pub fn new(pivot: PivotIndex, matrix: SimilarityMatrix) -> Result<Self> {
        if matrix.dim() != pivot.len() {
            return Err(Error::schema(
                "similarity",
                format!(
                    "matrix is {0}x{0} but the pivot index has {1} titles",
                    matrix.dim(),
                    pivot.len()
                ),
            ));
        }
        Ok(Self { pivot, matrix })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pivot.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pivot.is_empty()
    }

    /// Selectable titles in pivot order
    #[inline]
    pub fn titles(&self) -> &[String] {
        self.pivot.labels()
    }

    /// Top `k` neighbors of `title`, most similar first
    ///
    /// Returns `min(k, n - 1)` entries and never the query title itself.
    pub fn neighbors(&self, title: &str, k: usize) -> Result<Vec<Neighbor<'_>>> {
        let mut ranked = self.ranked(title)?;
        ranked.truncate(k);
        Ok(ranked)
    }

    /// Every other title ranked by similarity to `title`
    ///
    /// Scores are sorted descending; equal scores keep ascending row order.
    /// NaN scores sort after all numbers.
    pub fn ranked(&self, title: &str) -> Result<Vec<Neighbor<'_>>> {
        let query = self
            .pivot
            .position(title)
            .ok_or_else(|| Error::UnknownTitle(title.to_string()))?;
        let row = self
            .matrix
            .row(query)
            .ok_or_else(|| Error::UnknownTitle(title.to_string()))?;

        let mut scored: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(position, _)| *position != query)
            .collect();
        scored.sort_by(rank_order);

        Ok(scored
            .into_iter()
            .filter_map(|(position, score)| {
                self.pivot.label(position).map(|title| Neighbor {
                    title,
                    position,
                    score,
                })
            })
            .collect())
    }
}

fn rank_order(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    let by_score = match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
    };
    by_score.then(a.0.cmp(&b.0))
}
