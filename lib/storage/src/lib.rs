pub mod config;
pub mod matrix;
pub mod store;
pub mod table;

pub use config::StoreConfig;
pub use matrix::read_matrix;
pub use store::{ArtifactStore, GroupStatus, StoreStatus};
pub use table::Frame;

use bookrec_core::{Error, Result};
use std::path::Path;

/// Read an artifact file, reporting a missing file as `ArtifactMissing`
pub(crate) fn read_artifact(artifact: &str, path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::ArtifactMissing {
            artifact: artifact.to_string(),
            path: path.display().to_string(),
        });
    }
    Ok(std::fs::read(path)?)
}
