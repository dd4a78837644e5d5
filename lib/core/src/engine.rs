use crate::{
    ArtifactGroup, Availability, DisplayRecord, Error, MetadataResolver, PopularityRanking, Result,
    SimilarityIndex, DEFAULT_NEIGHBORS,
};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do when a neighbor has no metadata row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingMetadataPolicy {
    /// Reject the whole request with `MetadataNotFound`
    #[default]
    Fail,
    /// Skip the neighbor and take the next-ranked one instead
    Skip,
}

impl FromStr for MissingMetadataPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(MissingMetadataPolicy::Fail),
            "skip" => Ok(MissingMetadataPolicy::Skip),
            other => Err(Error::InvalidConfig(format!(
                "unknown missing-metadata policy '{}', expected 'fail' or 'skip'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MissingMetadataPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingMetadataPolicy::Fail => write!(f, "fail"),
            MissingMetadataPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Configuration for the recommendation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of similar books per query
    pub neighbors: usize,
    pub on_missing_metadata: MissingMetadataPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            on_missing_metadata: MissingMetadataPolicy::Fail,
        }
    }
}

/// Everything the collaborative-filtering path needs
#[derive(Debug, Clone)]
pub struct CollaborativeModel {
    pub index: SimilarityIndex,
    pub metadata: MetadataResolver,
}

impl CollaborativeModel {
    pub fn new(index: SimilarityIndex, metadata: MetadataResolver) -> Self {
        Self { index, metadata }
    }
}

/// A similar book with the score that ranked it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub record: DisplayRecord,
    pub score: f64,
}

/// Answers popularity and similar-book queries over loaded artifacts
///
/// The engine only reads shared, immutable data, so one instance can serve
/// any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    popularity: Availability<Arc<PopularityRanking>>,
    collaborative: Availability<Arc<CollaborativeModel>>,
}

impl RecommendationEngine {
    pub fn new(
        config: EngineConfig,
        popularity: Availability<Arc<PopularityRanking>>,
        collaborative: Availability<Arc<CollaborativeModel>>,
    ) -> Self {
        Self {
            config,
            popularity,
            collaborative,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_ready(&self, group: ArtifactGroup) -> bool {
        match group {
            ArtifactGroup::Popularity => self.popularity.is_ready(),
            ArtifactGroup::Collaborative => self.collaborative.is_ready(),
        }
    }

    /// The popularity ranking in its stored order
    pub fn popular_books(&self) -> Result<&[DisplayRecord]> {
        self.popularity
            .get()
            .map(|ranking| ranking.records())
            .ok_or_else(|| unavailable(ArtifactGroup::Popularity, &self.popularity))
    }

    /// Titles that can be passed to [`RecommendationEngine::recommend_similar`]
    pub fn titles(&self) -> Result<&[String]> {
        Ok(self.model()?.index.titles())
    }

    /// Books most similar to `title`, using the configured neighbor count
    pub fn recommend_similar(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend_similar_top(title, self.config.neighbors)
    }

    /// Books most similar to `title`, at most `k` of them
    pub fn recommend_similar_top(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        let model = self.model()?;
        debug!("Recommending {} neighbors for {:?}", k, title);

        match self.config.on_missing_metadata {
            MissingMetadataPolicy::Fail => model
                .index
                .neighbors(title, k)?
                .into_iter()
                .map(|neighbor| -> Result<Recommendation> {
                    let record = model.metadata.resolve(neighbor.title)?;
                    Ok(Recommendation {
                        record: record.clone(),
                        score: neighbor.score,
                    })
                })
                .collect(),
            MissingMetadataPolicy::Skip => {
                let mut results = Vec::with_capacity(k.min(model.index.len()));
                for neighbor in model.index.ranked(title)? {
                    if results.len() == k {
                        break;
                    }
                    match model.metadata.resolve(neighbor.title) {
                        Ok(record) => results.push(Recommendation {
                            record: record.clone(),
                            score: neighbor.score,
                        }),
                        Err(e) => warn!("Skipping neighbor of {:?}: {}", title, e),
                    }
                }
                Ok(results)
            }
        }
    }

    fn model(&self) -> Result<&CollaborativeModel> {
        self.collaborative
            .get()
            .map(Arc::as_ref)
            .ok_or_else(|| unavailable(ArtifactGroup::Collaborative, &self.collaborative))
    }
}

fn unavailable<T>(group: ArtifactGroup, availability: &Availability<T>) -> Error {
    Error::Unavailable {
        group,
        reason: availability
            .reason()
            .unwrap_or("artifacts not loaded")
            .to_string(),
    }
}
