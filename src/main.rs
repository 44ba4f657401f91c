use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keyword_search::cli::{Cli, Commands};
use keyword_search::engine::{self, SearchIndex};
use keyword_search::session::{self, output};
use keyword_search::server;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let paths = cli.index_paths();

    match &cli.command {
        Commands::BuildVocabulary(args) => {
            let vocabulary = engine::create_vocabulary(&args.corpus, &paths.vocabulary, args.policy())
                .context("building vocabulary")?;
            println!(
                "Found {} unique words, saved to {}",
                vocabulary.len(),
                paths.vocabulary.display()
            );
        }
        Commands::Vectorize(args) => {
            let vectors = engine::index_files(&args.corpus, &paths, args.policy())
                .context("vectorizing corpus")?;
            println!(
                "Created {} vectors, saved to {}",
                vectors.len(),
                paths.vectors.display()
            );
        }
        Commands::Index(args) => {
            let summary = engine::build_index(&args.corpus, &paths, args.policy()).context("building index")?;
            println!(
                "Indexed {} documents with {} unique words",
                summary.documents, summary.terms
            );
        }
        Commands::Search { query, detailed } => {
            let index = SearchIndex::load(&paths).context("loading index")?;
            let ranking = index.search(&query.join(" "), *detailed);
            if *detailed {
                println!("{}", output::format_matches(&ranking.matches));
            }
            println!("{}", output::format_result(&ranking));
        }
        Commands::Interactive => {
            let index = SearchIndex::load(&paths).context("loading index")?;
            let stdin = io::stdin();
            session::run(&index, stdin.lock(), io::stdout().lock())?;
        }
        Commands::Serve { bind } => {
            let index = SearchIndex::load(&paths).context("loading index")?;
            println!(
                "Loaded {} documents and {} words from {}",
                index.vectors().len(),
                index.vocabulary().len(),
                paths.vectors.display()
            );
            actix_web::rt::System::new().block_on(server::serve(index, bind))?;
        }
    }

    Ok(())
}
