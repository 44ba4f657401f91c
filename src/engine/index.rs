use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::config::IndexPaths;
use crate::document::{Corpus, ReadPolicy};
use crate::engine::search::{self, Ranking};
use crate::error::{Result, SearchError};
use crate::matrix::{self, DocumentVectors};
use crate::preprocessing::{self, Vocabulary, tokenizer};
use crate::storage;

/// A vocabulary and the vectors built against it, checked to agree on
/// dimension. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    vocabulary: Vocabulary,
    vectors: DocumentVectors,
}

impl SearchIndex {
    pub fn new(vocabulary: Vocabulary, vectors: DocumentVectors) -> Result<Self> {
        if vectors.dimension() != vocabulary.len() {
            return Err(SearchError::DimensionMismatch {
                vocabulary: vocabulary.len(),
                vectors: vectors.dimension(),
            });
        }
        Ok(Self { vocabulary, vectors })
    }

    pub fn load(paths: &IndexPaths) -> Result<Self> {
        let vocabulary = storage::load_vocabulary(&paths.vocabulary)?;
        let vectors = storage::load_vectors(&paths.vectors)?;
        Self::new(vocabulary, vectors)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &DocumentVectors {
        &self.vectors
    }

    /// Tokenizes `query` the same way documents were tokenized and ranks.
    pub fn search(&self, query: &str, detailed: bool) -> Ranking {
        let tokens = tokenizer::tokenize(query);
        self.rank(&tokens, detailed)
    }

    pub fn rank<S: AsRef<str>>(&self, tokens: &[S], detailed: bool) -> Ranking {
        search::rank(tokens, &self.vocabulary, &self.vectors, detailed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub documents: usize,
    pub terms: usize,
}

/// Builds the vocabulary of the corpus and saves it.
pub fn create_vocabulary(corpus_dir: &Path, path: &Path, policy: ReadPolicy) -> Result<Vocabulary> {
    let corpus = Corpus::open(corpus_dir)?;
    let vocabulary = preprocessing::build_vocabulary(&corpus, policy)?;
    storage::save_vocabulary(&vocabulary, path)?;
    Ok(vocabulary)
}

/// Vectorizes the corpus against a saved vocabulary and saves the vectors.
/// The vocabulary may have been built from a different snapshot of the
/// corpus.
pub fn index_files(corpus_dir: &Path, paths: &IndexPaths, policy: ReadPolicy) -> Result<DocumentVectors> {
    let corpus = Corpus::open(corpus_dir)?;
    let vocabulary = storage::load_vocabulary(&paths.vocabulary)?;
    let vectors = matrix::vectorize(&corpus, &vocabulary, policy)?;
    storage::save_vectors(&vectors, &paths.vectors)?;
    Ok(vectors)
}

/// Runs the whole pipeline: vocabulary, vectors, and both saved.
pub fn build_index(corpus_dir: &Path, paths: &IndexPaths, policy: ReadPolicy) -> Result<IndexSummary> {
    let start = Instant::now();
    let corpus = Corpus::open(corpus_dir)?;
    info!("Found {} files in {}", corpus.len(), corpus_dir.display());

    let vocabulary = preprocessing::build_vocabulary(&corpus, policy)?;
    storage::save_vocabulary(&vocabulary, &paths.vocabulary)?;

    let vectors = matrix::vectorize(&corpus, &vocabulary, policy)?;
    storage::save_vectors(&vectors, &paths.vectors)?;

    info!("Index built in {:?}", start.elapsed());
    Ok(IndexSummary {
        documents: vectors.len(),
        terms: vocabulary.len(),
    })
}
