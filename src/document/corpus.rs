use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SearchError};

/// A file in the corpus directory. The id is the file name and is what
/// search results report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: String,
    pub path: PathBuf,
}

impl CorpusEntry {
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .map_err(|source| SearchError::from_document_read(&self.path, source))
    }
}

/// The regular files directly inside a directory, sorted by file name.
///
/// Sorting fixes the traversal order, and with it vocabulary index
/// assignment and the tie-break between equally scored documents,
/// independently of how the filesystem happens to list entries.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let listing = fs::read_dir(&root).map_err(|source| SearchError::ListCorpus {
            path: root.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            // Ids must round-trip exactly; a lossy conversion could merge two names.
            let id = match entry.file_name().into_string() {
                Ok(id) => id,
                Err(name) => {
                    warn!("Skipping {}: file name is not valid UTF-8", name.to_string_lossy());
                    continue;
                }
            };
            // fs::metadata follows symlinks, so a link to a regular file counts.
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => entries.push(CorpusEntry { id, path }),
                Ok(_) => debug!("Skipping non-file entry {}", path.display()),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads each document in order. Files are read lazily, one at a time.
    pub fn documents(&self) -> impl Iterator<Item = (&CorpusEntry, Result<String>)> {
        self.entries.iter().map(|entry| (entry, entry.read()))
    }
}

/// What to do when a document cannot be read while indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Log a warning and carry on with the remaining documents.
    #[default]
    Skip,
    /// Stop the whole pass and return the error.
    Abort,
}

impl ReadPolicy {
    /// Applies the policy to a failed read. Returns `Ok(())` when the
    /// caller should continue with the next document. Only document read
    /// failures can be skipped; any other error is returned as is.
    pub fn handle(self, entry: &CorpusEntry, err: SearchError) -> Result<()> {
        match self {
            ReadPolicy::Skip if err.is_document_failure() => {
                warn!("Skipping {}: {}", entry.id, err);
                Ok(())
            }
            _ => Err(err),
        }
    }
}
