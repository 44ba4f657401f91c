use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const VOCABULARY_FILE: &str = "w_dict.bin";
pub const VECTORS_FILE: &str = "f_dict.bin";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Where the vocabulary and the vector store live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub vocabulary: PathBuf,
    pub vectors: PathBuf,
}

impl IndexPaths {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            vocabulary: data_dir.join(VOCABULARY_FILE),
            vectors: data_dir.join(VECTORS_FILE),
        }
    }

    /// Resolves optional overrides. Relative overrides are taken relative
    /// to `data_dir`; absolute ones are used as given.
    pub fn resolve(data_dir: impl AsRef<Path>, vocabulary: Option<&Path>, vectors: Option<&Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let defaults = Self::in_dir(data_dir);
        Self {
            vocabulary: vocabulary.map_or(defaults.vocabulary, |p| data_dir.join(p)),
            vectors: vectors.map_or(defaults.vectors, |p| data_dir.join(p)),
        }
    }
}

impl Default for IndexPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_in_data_dir() {
        let paths = IndexPaths::default();
        assert_eq!(paths.vocabulary, Path::new("data").join("w_dict.bin"));
        assert_eq!(paths.vectors, Path::new("data").join("f_dict.bin"));
    }

    #[test]
    fn overrides_are_relative_to_data_dir() {
        let paths = IndexPaths::resolve("idx", Some(Path::new("words.bin")), None);
        assert_eq!(paths.vocabulary, Path::new("idx").join("words.bin"));
        assert_eq!(paths.vectors, Path::new("idx").join("f_dict.bin"));
    }

    #[test]
    fn absolute_overrides_are_kept() {
        let abs = std::env::temp_dir().join("vectors.bin");
        let paths = IndexPaths::resolve("idx", None, Some(&abs));
        assert_eq!(paths.vectors, abs);
    }
}
