use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::document::{Corpus, ReadPolicy};
use crate::error::Result;
use crate::preprocessing::tokenizer;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("term {0:?} appears more than once")]
pub struct DuplicateTerm(pub String);

/// Mapping from token to a dense index in `0..len()`.
///
/// Indices are assigned in first-seen order and never change. A built
/// vocabulary cannot be extended; use [`VocabularyBuilder`] while scanning.
/// It is serialized as the list of terms in index order, so contiguity
/// holds by construction after a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn from_terms(terms: Vec<String>) -> std::result::Result<Self, DuplicateTerm> {
        let mut index = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(DuplicateTerm(term.clone()));
            }
        }
        Ok(Self { terms, index })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms.iter().enumerate().map(|(i, t)| (t.as_str(), i))
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = DuplicateTerm;

    fn try_from(terms: Vec<String>) -> std::result::Result<Self, Self::Error> {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `term`, assigning the next free one if the term
    /// has not been seen yet.
    pub fn insert(&mut self, term: &str) -> usize {
        if let Some(&i) = self.index.get(term) {
            return i;
        }
        let i = self.terms.len();
        self.terms.push(term.to_string());
        self.index.insert(term.to_string(), i);
        i
    }

    pub fn add_text(&mut self, text: &str) {
        for token in tokenizer::normalize(text).split_whitespace() {
            self.insert(token);
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn build(self) -> Vocabulary {
        Vocabulary {
            terms: self.terms,
            index: self.index,
        }
    }
}

/// Scans every document of the corpus and collects its distinct tokens.
pub fn build_vocabulary(corpus: &Corpus, policy: ReadPolicy) -> Result<Vocabulary> {
    let start = Instant::now();
    info!("Creating vocabulary for files from {}", corpus.root().display());

    let mut builder = VocabularyBuilder::new();
    for (entry, text) in corpus.documents() {
        info!("Processing {}...", entry.id);
        match text {
            Ok(text) => builder.add_text(&text),
            Err(e) => policy.handle(entry, e)?,
        }
    }

    let vocabulary = builder.build();
    info!(
        "Finished indexing, found {} unique words in {:?}",
        vocabulary.len(),
        start.elapsed()
    );
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    fn vocabulary_of(texts: &[&str]) -> Vocabulary {
        let mut builder = VocabularyBuilder::new();
        for text in texts {
            builder.add_text(text);
        }
        builder.build()
    }

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let vocabulary = vocabulary_of(&["The fox. The dog!", "a Fox"]);
        assert_eq!(vocabulary.terms(), &["the", "fox", "dog", "a"]);
        assert_eq!(vocabulary.index_of("the"), Some(0));
        assert_eq!(vocabulary.index_of("a"), Some(3));
        assert_eq!(vocabulary.index_of("cat"), None);
    }

    #[test]
    fn indices_are_contiguous_and_cover_distinct_tokens() {
        let texts = ["one two three two one", "four, five; one", "", "SIX six"];
        let vocabulary = vocabulary_of(&texts);

        let distinct: HashSet<String> = texts.iter().flat_map(|t| tokenizer::tokenize(t)).collect();
        assert_eq!(vocabulary.len(), distinct.len());

        let mut indices: Vec<usize> = vocabulary.iter().map(|(_, i)| i).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..vocabulary.len()).collect::<Vec<_>>());
        for (term, i) in vocabulary.iter() {
            assert_eq!(vocabulary.term(i), Some(term));
        }
    }

    #[test]
    fn from_terms_rejects_duplicates() {
        let err = Vocabulary::from_terms(vec!["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert_eq!(err, DuplicateTerm("a".into()));
    }

    #[test]
    fn builder_insert_is_idempotent() {
        let mut builder = VocabularyBuilder::new();
        assert_eq!(builder.insert("x"), 0);
        assert_eq!(builder.insert("y"), 1);
        assert_eq!(builder.insert("x"), 0);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn skips_unreadable_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha beta").unwrap();
        fs::write(dir.path().join("b.txt"), [0xff, 0xfe, 0xfd]).unwrap();
        fs::write(dir.path().join("c.txt"), "gamma alpha").unwrap();

        let corpus = Corpus::open(dir.path()).unwrap();
        let vocabulary = build_vocabulary(&corpus, ReadPolicy::Skip).unwrap();
        assert_eq!(vocabulary.terms(), &["alpha", "beta", "gamma"]);

        assert!(build_vocabulary(&corpus, ReadPolicy::Abort).is_err());
    }
}
