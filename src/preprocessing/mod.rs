pub mod tokenizer;
pub mod vocabulary;

pub use vocabulary::{Vocabulary, VocabularyBuilder, build_vocabulary};
