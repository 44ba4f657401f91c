//! Keyword search over a directory of plain-text documents.
//!
//! Every document becomes a term-frequency vector over a vocabulary shared
//! by the whole corpus. A query is turned into a vector the same way and
//! documents are ranked by cosine similarity.

pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod preprocessing;
pub mod server;
pub mod session;
pub mod storage;

pub use engine::{Match, Ranking, SearchIndex};
pub use error::{Result, SearchError};
