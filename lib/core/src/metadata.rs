use crate::{DisplayRecord, Error, Result};
use ahash::AHashMap;

/// Resolves titles to display records
///
/// Titles may repeat in the source table. The first record in table order
/// wins; later duplicates are kept but never returned.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    records: Vec<DisplayRecord>,
    first_by_title: AHashMap<String, usize>,
}

impl MetadataResolver {
    pub fn new(records: Vec<DisplayRecord>) -> Self {
        let mut first_by_title = AHashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            first_by_title.entry(record.title.clone()).or_insert(row);
        }
        Self {
            records,
            first_by_title,
        }
    }

    /// First record whose title matches exactly
    pub fn resolve(&self, title: &str) -> Result<&DisplayRecord> {
        self.first_by_title
            .get(title)
            .map(|&row| &self.records[row])
            .ok_or_else(|| Error::MetadataNotFound(title.to_string()))
    }

    /// Number of rows in the table, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct titles
    #[inline]
    pub fn distinct_titles(&self) -> usize {
        self.first_by_title.len()
    }

    /// Titles that appear more than once with differing attributes
    pub fn conflicting_duplicates(&self) -> Vec<&str> {
        let mut conflicts: Vec<&str> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(row, record)| {
                let first = self.first_by_title.get(&record.title).copied()?;
                (first != row && self.records[first] != *record).then_some(first)
            })
            .map(|first| self.records[first].title.as_str())
            .collect();
        conflicts.sort_unstable();
        conflicts.dedup();
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_resolver() -> MetadataResolver {
        MetadataResolver::new(vec![
            DisplayRecord::new("Emma", "Jane Austen", "http://img/emma-1.jpg", 3.9, 100),
            DisplayRecord::new("Persuasion", "Jane Austen", "http://img/p.jpg", 4.1, 40),
            DisplayRecord::new("Emma", "J. Austen", "http://img/emma-2.jpg", 3.2, 7),
            DisplayRecord::new("Persuasion", "Jane Austen", "http://img/p.jpg", 4.1, 40),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let resolver = create_test_resolver();
        let record = resolver.resolve("Emma").unwrap();
        assert_eq!(record.author, "Jane Austen");
        assert_eq!(record.image_url, "http://img/emma-1.jpg");
        assert_eq!(record.total_ratings, 100);
    }

    #[test]
    fn test_missing_title() {
        let resolver = create_test_resolver();
        let err = resolver.resolve("Mansfield Park").unwrap_err();
        assert!(matches!(err, Error::MetadataNotFound(ref t) if t == "Mansfield Park"));
        assert!(resolver.resolve("emma").is_err());
    }

    #[test]
    fn test_conflicting_duplicates() {
        let resolver = create_test_resolver();
        assert_eq!(resolver.len(), 4);
        assert_eq!(resolver.distinct_titles(), 2);
        // identical duplicate rows are not a conflict
        assert_eq!(resolver.conflicting_duplicates(), vec!["Emma"]);
    }
}
