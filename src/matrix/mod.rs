use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::document::{Corpus, ReadPolicy};
use crate::error::Result;
use crate::preprocessing::Vocabulary;
use crate::preprocessing::tokenizer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidStore {
    #[error("vector for {id:?} has length {found}, expected {expected}")]
    Length {
        id: String,
        expected: usize,
        found: usize,
    },
    #[error("document {0:?} appears more than once")]
    DuplicateId(String),
}

/// Term-frequency vector of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVector {
    pub id: String,
    pub counts: Vec<f64>,
}

impl DocumentVector {
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0.0)
    }
}

#[derive(Deserialize)]
struct StoredVectors {
    dimension: usize,
    documents: Vec<DocumentVector>,
}

/// Document vectors keyed by document id, kept in corpus traversal order.
///
/// Every vector has length `dimension`, the size of the vocabulary the
/// store was built against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredVectors")]
pub struct DocumentVectors {
    dimension: usize,
    documents: Vec<DocumentVector>,
}

impl TryFrom<StoredVectors> for DocumentVectors {
    type Error = InvalidStore;

    fn try_from(stored: StoredVectors) -> std::result::Result<Self, Self::Error> {
        let mut vectors = DocumentVectors::new(stored.dimension);
        for doc in stored.documents {
            vectors.push(doc.id, doc.counts)?;
        }
        Ok(vectors)
    }
}

impl DocumentVectors {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            documents: Vec::new(),
        }
    }

    pub fn from_vectors<I, S>(dimension: usize, vectors: I) -> std::result::Result<Self, InvalidStore>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut store = Self::new(dimension);
        for (id, counts) in vectors {
            store.push(id.into(), counts)?;
        }
        Ok(store)
    }

    pub fn push(&mut self, id: String, counts: Vec<f64>) -> std::result::Result<(), InvalidStore> {
        if counts.len() != self.dimension {
            return Err(InvalidStore::Length {
                id,
                expected: self.dimension,
                found: counts.len(),
            });
        }
        if self.documents.iter().any(|d| d.id == id) {
            return Err(InvalidStore::DuplicateId(id));
        }
        self.documents.push(DocumentVector { id, counts });
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&[f64]> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.counts.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentVector> {
        self.documents.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.id.as_str())
    }
}

impl<'a> IntoIterator for &'a DocumentVectors {
    type Item = &'a DocumentVector;
    type IntoIter = std::slice::Iter<'a, DocumentVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Counts the in-vocabulary tokens of `text`. Tokens the vocabulary does
/// not know are ignored.
pub fn vectorize_text(text: &str, vocabulary: &Vocabulary) -> Vec<f64> {
    let mut counts = vec![0.0; vocabulary.len()];
    for token in tokenizer::normalize(text).split_whitespace() {
        if let Some(i) = vocabulary.index_of(token) {
            counts[i] += 1.0;
        }
    }
    counts
}

/// Same as [`vectorize_text`] for text that has already been tokenized.
pub fn vectorize_tokens<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary) -> Vec<f64> {
    let mut counts = vec![0.0; vocabulary.len()];
    for token in tokens {
        if let Some(i) = vocabulary.index_of(token.as_ref()) {
            counts[i] += 1.0;
        }
    }
    counts
}

/// Builds one vector per corpus document.
///
/// The vocabulary may come from an older build; only its terms count. A
/// document that cannot be read is kept with a zero vector when the policy
/// allows skipping it.
pub fn vectorize(corpus: &Corpus, vocabulary: &Vocabulary, policy: ReadPolicy) -> Result<DocumentVectors> {
    let start = Instant::now();
    info!(
        "Indexing files from {} against a vocabulary of {} terms",
        corpus.root().display(),
        vocabulary.len()
    );

    let mut vectors = DocumentVectors::new(vocabulary.len());
    for (entry, text) in corpus.documents() {
        info!("Processing {}...", entry.id);
        let counts = match text {
            Ok(text) => vectorize_text(&text, vocabulary),
            Err(e) => {
                policy.handle(entry, e)?;
                vec![0.0; vocabulary.len()]
            }
        };
        vectors.push(entry.id.clone(), counts)?;
    }

    info!("Finished creating {} vectors in {:?}", vectors.len(), start.elapsed());
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::VocabularyBuilder;
    use std::fs;

    fn vocabulary(terms: &[&str]) -> Vocabulary {
        Vocabulary::from_terms(terms.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn counts_occurrences_by_vocabulary_index() {
        let vocabulary = vocabulary(&["the", "fox", "dog"]);
        assert_eq!(vectorize_text("The fox, the end.", &vocabulary), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn sum_equals_recognized_token_count() {
        let text = "It was the best of times, it was the worst of times.";
        let mut builder = VocabularyBuilder::new();
        builder.add_text(text);
        let vocabulary = builder.build();

        let counts = vectorize_text(text, &vocabulary);
        assert_eq!(counts.len(), vocabulary.len());
        assert_eq!(counts.iter().sum::<f64>(), tokenizer::tokenize(text).len() as f64);
    }

    #[test]
    fn out_of_vocabulary_tokens_are_ignored() {
        let vocabulary = vocabulary(&["alpha"]);
        assert_eq!(vectorize_text("alpha omega omega", &vocabulary), vec![1.0]);
        assert_eq!(vectorize_tokens(&["omega", "alpha", "alpha"], &vocabulary), vec![2.0]);
    }

    #[test]
    fn push_rejects_wrong_length_and_duplicates() {
        let mut store = DocumentVectors::new(2);
        store.push("a".into(), vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            store.push("b".into(), vec![1.0]),
            Err(InvalidStore::Length { found: 1, .. })
        ));
        assert_eq!(
            store.push("a".into(), vec![0.0, 0.0]),
            Err(InvalidStore::DuplicateId("a".into()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unreadable_document_gets_a_zero_vector() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "red green").unwrap();
        fs::write(dir.path().join("b.txt"), [0xc3, 0x28]).unwrap();
        fs::write(dir.path().join("c.txt"), "green blue blue").unwrap();

        let corpus = Corpus::open(dir.path()).unwrap();
        let vocabulary = vocabulary(&["red", "green"]);
        let vectors = vectorize(&corpus, &vocabulary, ReadPolicy::Skip).unwrap();

        assert_eq!(vectors.ids().collect::<Vec<_>>(), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(vectors.get("a.txt"), Some(&[1.0, 1.0][..]));
        assert_eq!(vectors.get("b.txt"), Some(&[0.0, 0.0][..]));
        assert_eq!(vectors.get("c.txt"), Some(&[0.0, 1.0][..]));

        assert!(vectorize(&corpus, &vocabulary, ReadPolicy::Abort).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn colliding_file_names_still_give_a_loadable_store() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xff.txt")), "red").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xfe.txt")), "green").unwrap();
        fs::write(dir.path().join("b.txt"), "red green").unwrap();

        let corpus = Corpus::open(dir.path()).unwrap();
        let vectors = vectorize(&corpus, &vocabulary(&["red", "green"]), ReadPolicy::Skip).unwrap();
        assert_eq!(vectors.ids().collect::<Vec<_>>(), vec!["b.txt"]);

        let path = dir.path().join("index").join("f_dict.bin");
        crate::storage::save_vectors(&vectors, &path).unwrap();
        assert_eq!(crate::storage::load_vectors(&path).unwrap().len(), 1);
    }
}
