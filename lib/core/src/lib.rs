//! # BookRec Core
//!
//! Core library for the BookRec recommendation service.
//!
//! This crate provides the in-memory data structures and query logic:
//!
//! - [`PivotIndex`] - Title labels aligned to similarity matrix rows
//! - [`SimilarityMatrix`] - Precomputed item-item similarity scores
//! - [`SimilarityIndex`] - Ranked neighbor lookup for a title
//! - [`MetadataResolver`] - Title to display record resolution
//! - [`RecommendationEngine`] - Popular and similar-book queries
//!
//! ## Example
//!
//! ```rust
//! use bookrec_core::{PivotIndex, SimilarityMatrix, SimilarityIndex};
//!
//! let pivot = PivotIndex::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]).unwrap();
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.9, 0.2, 0.9],
//!     vec![0.9, 1.0, 0.4, 0.1],
//!     vec![0.2, 0.4, 1.0, 0.3],
//!     vec![0.9, 0.1, 0.3, 1.0],
//! ]).unwrap();
//! let index = SimilarityIndex::new(pivot, matrix).unwrap();
//!
//! let neighbors = index.neighbors("A", 3).unwrap();
//! let titles: Vec<&str> = neighbors.iter().map(|n| n.title).collect();
//! assert_eq!(titles, vec!["B", "D", "C"]);
//! ```

pub mod availability;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod metadata;
pub mod pivot;
pub mod popularity;
pub mod record;
pub mod similarity;

pub use availability::Availability;
pub use engine::{
    CollaborativeModel, EngineConfig, MissingMetadataPolicy, Recommendation, RecommendationEngine,
};
pub use error::{ArtifactGroup, Error, Result};
pub use matrix::SimilarityMatrix;
pub use metadata::MetadataResolver;
pub use pivot::PivotIndex;
pub use popularity::{PopularityRanking, DEFAULT_POPULAR_LIMIT};
pub use record::{DisplayRecord, REQUIRED_COLUMNS};
pub use similarity::{Neighbor, SimilarityIndex, DEFAULT_NEIGHBORS};
