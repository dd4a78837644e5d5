use crate::{Error, Result};
use ahash::AHashMap;

/// Ordered title labels aligned to similarity matrix rows
#[derive(Debug, Clone)]
pub struct PivotIndex {
    labels: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl PivotIndex {
    /// Build the index. Labels must be unique.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if let Some(previous) = positions.insert(label.clone(), position) {
                return Err(Error::schema(
                    "pivot",
                    format!(
                        "duplicate label '{}' at rows {} and {}",
                        label, previous, position
                    ),
                ));
            }
        }
        Ok(Self { labels, positions })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row position of an exact label
    #[inline]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    #[inline]
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
