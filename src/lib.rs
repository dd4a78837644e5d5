//! # BookRec
//!
//! Book recommendations served from precomputed artifacts.
//!
//! BookRec answers two kinds of queries:
//! - **Popularity-based**: a pre-sorted "most popular" ranking, served as-is
//! - **Collaborative filtering**: the books most similar to a given title,
//!   read from a precomputed item-item similarity matrix
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! bookrec --data-dir ./data popular
//! bookrec --data-dir ./data similar "The Da Vinci Code"
//! bookrec --data-dir ./data serve --http-port 6333
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use bookrec::prelude::*;
//!
//! let store = ArtifactStore::load(StoreConfig::new("./data"));
//! let engine = store.engine(EngineConfig::default());
//!
//! for rec in engine.recommend_similar("1984").unwrap() {
//!     println!("{} ({})", rec.record.title, rec.record.display_rating());
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`bookrec-core`](https://docs.rs/bookrec-core) - Similarity index, metadata resolution, engine
//! - [`bookrec-storage`](https://docs.rs/bookrec-storage) - Artifact loading and validation
//! - [`bookrec-api`](https://docs.rs/bookrec-api) - REST API

// Re-export core types
pub use bookrec_core::{
    ArtifactGroup, Availability, CollaborativeModel, DisplayRecord, EngineConfig, Error,
    MetadataResolver, MissingMetadataPolicy, Neighbor, PivotIndex, PopularityRanking,
    Recommendation, RecommendationEngine, Result, SimilarityIndex, SimilarityMatrix,
    DEFAULT_NEIGHBORS, DEFAULT_POPULAR_LIMIT,
};

// Re-export storage
pub use bookrec_storage::{ArtifactStore, StoreConfig, StoreStatus};

// Re-export API
pub use bookrec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArtifactStore, DisplayRecord, EngineConfig, Error, MissingMetadataPolicy, Recommendation,
        RecommendationEngine, Result, StoreConfig,
    };
}
