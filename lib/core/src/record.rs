use serde::{Deserialize, Serialize};

/// Column names shared by the popularity and metadata tables
pub const COL_TITLE: &str = "Book-Title";
pub const COL_AUTHOR: &str = "Book-Author";
pub const COL_IMAGE_URL: &str = "Image-URL-M";
pub const COL_AVERAGE_RATING: &str = "Average_Rating";
pub const COL_TOTAL_RATINGS: &str = "Total_number_of_Ratings";

/// Every display table must carry these columns
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TITLE,
    COL_AUTHOR,
    COL_IMAGE_URL,
    COL_AVERAGE_RATING,
    COL_TOTAL_RATINGS,
];

/// Display attributes of a single book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayRecord {
    pub title: String,
    pub author: String,
    pub image_url: String,
    /// Raw mean rating; use [`DisplayRecord::display_rating`] for output
    pub average_rating: f64,
    pub total_ratings: u64,
}

impl DisplayRecord {
    #[inline]
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
        average_rating: f64,
        total_ratings: u64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            image_url: image_url.into(),
            average_rating,
            total_ratings,
        }
    }

    /// Average rating rounded to one decimal place
    #[inline]
    pub fn display_rating(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

impl std::fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Author: {} | Avg Rating: {} | Total Ratings: {}",
            self.title,
            self.author,
            self.display_rating(),
            self.total_ratings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rating_rounds_to_one_decimal() {
        let record = DisplayRecord::new("Dune", "Frank Herbert", "http://img/dune.jpg", 4.2571, 812);
        assert_eq!(record.display_rating(), "4.3");
        // underlying value is untouched
        assert!((record.average_rating - 4.2571).abs() < 1e-12);
    }

    #[test]
    fn test_display_format() {
        let record = DisplayRecord::new("Dune", "Frank Herbert", "http://img/dune.jpg", 4.0, 12);
        assert_eq!(
            record.to_string(),
            "Dune | Author: Frank Herbert | Avg Rating: 4.0 | Total Ratings: 12"
        );
    }
}
