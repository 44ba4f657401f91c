pub mod corpus;

pub use corpus::{Corpus, CorpusEntry, ReadPolicy};
