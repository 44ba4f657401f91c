pub mod index;
pub mod search;

pub use index::{IndexSummary, SearchIndex, build_index, create_vocabulary, index_files};
pub use search::{Match, Ranking, rank};
