use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_BIND_ADDRESS, DEFAULT_DATA_DIR, IndexPaths};
use crate::document::ReadPolicy;

/// Keyword search over a directory of plain-text files.
#[derive(Debug, Parser)]
#[command(name = "keyword-search", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the index files
    #[arg(long, global = true, env = "KEYWORD_SEARCH_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Vocabulary file name, relative to the data directory
    #[arg(long, global = true)]
    pub vocabulary_file: Option<PathBuf>,

    /// Vector store file name, relative to the data directory
    #[arg(long, global = true)]
    pub vectors_file: Option<PathBuf>,

    /// Print progress while indexing
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect the vocabulary of a corpus and save it
    BuildVocabulary(CorpusArgs),
    /// Vectorize a corpus against the saved vocabulary
    Vectorize(CorpusArgs),
    /// Build the vocabulary and the vectors in one pass
    Index(CorpusArgs),
    /// Run a single query
    Search {
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        /// Show the top matches with their scores
        #[arg(short, long)]
        detailed: bool,
    },
    /// Read queries from standard input
    Interactive,
    /// Serve queries over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
        bind: String,
    },
}

#[derive(Debug, Args)]
pub struct CorpusArgs {
    /// Directory of documents to index
    #[arg(long)]
    pub corpus: PathBuf,

    /// Stop at the first unreadable document instead of skipping it
    #[arg(long)]
    pub abort_on_error: bool,
}

impl CorpusArgs {
    pub fn policy(&self) -> ReadPolicy {
        if self.abort_on_error {
            ReadPolicy::Abort
        } else {
            ReadPolicy::Skip
        }
    }
}

impl Cli {
    pub fn index_paths(&self) -> IndexPaths {
        IndexPaths::resolve(
            &self.data_dir,
            self.vocabulary_file.as_deref(),
            self.vectors_file.as_deref(),
        )
    }

    /// Default log filter; `RUST_LOG` takes precedence when set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}
