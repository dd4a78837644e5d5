use crate::DisplayRecord;

/// Default size of the popularity ranking
pub const DEFAULT_POPULAR_LIMIT: usize = 50;

/// Pre-sorted "most popular" books, served as-is
#[derive(Debug, Clone, Default)]
pub struct PopularityRanking {
    records: Vec<DisplayRecord>,
}

impl PopularityRanking {
    /// Keep the input order and at most `limit` records
    pub fn new(mut records: Vec<DisplayRecord>, limit: usize) -> Self {
        records.truncate(limit);
        Self { records }
    }

    #[inline]
    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
