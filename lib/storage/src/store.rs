use crate::config::StoreConfig;
use crate::matrix::read_matrix;
use crate::table::Frame;
use bookrec_core::{
    ArtifactGroup, Availability, CollaborativeModel, EngineConfig, MetadataResolver, PivotIndex,
    PopularityRanking, RecommendationEngine, Result, SimilarityIndex,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Readiness of one artifact group
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupStatus {
    pub ready: bool,
    /// Ranked books or selectable titles
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreStatus {
    pub popularity: GroupStatus,
    pub collaborative: GroupStatus,
}

/// Loaded artifacts, shared read-only for the process lifetime
///
/// Each group loads independently: a broken popularity table leaves
/// collaborative filtering usable and vice versa.
pub struct ArtifactStore {
    config: StoreConfig,
    popularity: Availability<Arc<PopularityRanking>>,
    collaborative: Availability<Arc<CollaborativeModel>>,
}

impl ArtifactStore {
    pub fn load(config: StoreConfig) -> Self {
        info!("Loading artifacts from {:?}", config.data_dir);

        let popularity = Availability::from_result(
            load_popularity(&config)
                .map(|ranking| {
                    info!("Popularity ranking loaded: {} books", ranking.len());
                    Arc::new(ranking)
                })
                .map_err(|e| {
                    error!("Popularity-based recommendations unavailable: {}", e);
                    e
                }),
        );

        let collaborative = Availability::from_result(
            load_collaborative(&config)
                .map(|model| {
                    info!(
                        "Collaborative filtering loaded: {} titles, {} metadata rows",
                        model.index.len(),
                        model.metadata.len()
                    );
                    Arc::new(model)
                })
                .map_err(|e| {
                    error!("Collaborative filtering unavailable: {}", e);
                    e
                }),
        );

        Self {
            config,
            popularity,
            collaborative,
        }
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[inline]
    pub fn popularity(&self) -> &Availability<Arc<PopularityRanking>> {
        &self.popularity
    }

    #[inline]
    pub fn collaborative(&self) -> &Availability<Arc<CollaborativeModel>> {
        &self.collaborative
    }

    pub fn is_ready(&self, group: ArtifactGroup) -> bool {
        match group {
            ArtifactGroup::Popularity => self.popularity.is_ready(),
            ArtifactGroup::Collaborative => self.collaborative.is_ready(),
        }
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            popularity: GroupStatus {
                ready: self.popularity.is_ready(),
                items: self.popularity.get().map_or(0, |r| r.len()),
                error: self.popularity.reason().map(str::to_string),
            },
            collaborative: GroupStatus {
                ready: self.collaborative.is_ready(),
                items: self.collaborative.get().map_or(0, |m| m.index.len()),
                error: self.collaborative.reason().map(str::to_string),
            },
        }
    }

    /// Build an engine sharing this store's artifacts
    pub fn engine(&self, config: EngineConfig) -> RecommendationEngine {
        RecommendationEngine::new(config, self.popularity.clone(), self.collaborative.clone())
    }
}

fn load_popularity(config: &StoreConfig) -> Result<PopularityRanking> {
    let frame = Frame::read("popular", &config.popular_path())?;
    let records = frame.display_records()?;
    if records.len() > config.popular_limit {
        warn!(
            "Popularity table has {} rows, keeping the first {}",
            records.len(),
            config.popular_limit
        );
    }
    Ok(PopularityRanking::new(records, config.popular_limit))
}

fn load_collaborative(config: &StoreConfig) -> Result<CollaborativeModel> {
    let pivot = PivotIndex::new(Frame::read("pivot", &config.pivot_path())?.labels()?)?;
    let matrix = read_matrix("similarity", &config.similarity_path())?;
    let index = SimilarityIndex::new(pivot, matrix)?;

    let metadata = MetadataResolver::new(
        Frame::read("metadata", &config.metadata_path())?.display_records()?,
    );
    let conflicts = metadata.conflicting_duplicates();
    if !conflicts.is_empty() {
        warn!(
            "{} title(s) have conflicting metadata rows, the first row wins (e.g. {:?})",
            conflicts.len(),
            conflicts[0]
        );
        debug!("Titles with conflicting metadata rows: {:?}", conflicts);
    }
    let unresolvable = index
        .titles()
        .iter()
        .filter(|t| metadata.resolve(t).is_err())
        .count();
    if unresolvable > 0 {
        warn!("{} pivot title(s) have no metadata row", unresolvable);
    }

    Ok(CollaborativeModel::new(index, metadata))
}
