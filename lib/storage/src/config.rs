use bookrec_core::DEFAULT_POPULAR_LIMIT;
use std::path::{Path, PathBuf};

/// Where the precomputed artifacts live
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub popular_file: PathBuf,
    pub pivot_file: PathBuf,
    pub similarity_file: PathBuf,
    pub metadata_file: PathBuf,
    /// Popularity rows beyond this are dropped at load
    pub popular_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            popular_file: PathBuf::from("popular.json"),
            pivot_file: PathBuf::from("pt.json"),
            similarity_file: PathBuf::from("score.json"),
            metadata_file: PathBuf::from("merged.json"),
            popular_limit: DEFAULT_POPULAR_LIMIT,
        }
    }
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Resolve an artifact file against the data directory
    ///
    /// Absolute file names are used as-is.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn popular_path(&self) -> PathBuf {
        self.resolve(&self.popular_file)
    }

    pub fn pivot_path(&self) -> PathBuf {
        self.resolve(&self.pivot_file)
    }

    pub fn similarity_path(&self) -> PathBuf {
        self.resolve(&self.similarity_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.metadata_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = StoreConfig::new("/srv/books");
        assert_eq!(config.popular_path(), PathBuf::from("/srv/books/popular.json"));
        assert_eq!(config.pivot_path(), PathBuf::from("/srv/books/pt.json"));
        assert_eq!(config.similarity_path(), PathBuf::from("/srv/books/score.json"));
        assert_eq!(config.metadata_path(), PathBuf::from("/srv/books/merged.json"));
        assert_eq!(config.popular_limit, 50);
    }

    #[test]
    fn test_absolute_file_overrides_data_dir() {
        let config = StoreConfig {
            similarity_file: PathBuf::from("/models/score.bin"),
            ..StoreConfig::new("/srv/books")
        };
        assert_eq!(config.similarity_path(), PathBuf::from("/models/score.bin"));
    }
}
