use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::matrix::InvalidStore;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("could not read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document {path} is not valid UTF-8 text")]
    DecodeDocument { path: PathBuf },

    #[error("could not list corpus directory {path}: {source}")]
    ListCorpus {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index file {path} does not exist")]
    MissingIndex { path: PathBuf },

    #[error("index file {path} is corrupt: {reason}")]
    CorruptIndex { path: PathBuf, reason: String },

    #[error("could not read index file {path}: {source}")]
    ReadIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write index file {path}: {source}")]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid vector store: {0}")]
    InvalidVectors(#[from] InvalidStore),

    #[error("vector store has dimension {vectors} but vocabulary has {vocabulary} terms")]
    DimensionMismatch { vocabulary: usize, vectors: usize },
}

impl SearchError {
    /// Classifies a failed document read. Invalid UTF-8 surfaces from
    /// `read_to_string` as `InvalidData` and is reported as a decoding
    /// failure rather than a generic I/O fault.
    pub fn from_document_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::InvalidData {
            SearchError::DecodeDocument { path }
        } else {
            SearchError::ReadDocument { path, source }
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SearchError::CorruptIndex {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_document_failure(&self) -> bool {
        matches!(
            self,
            SearchError::ReadDocument { .. } | SearchError::DecodeDocument { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
