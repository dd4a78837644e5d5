use anyhow::Context;
use bookrec_api::RestApi;
use bookrec_core::{
    ArtifactGroup, DisplayRecord, EngineConfig, MissingMetadataPolicy, Recommendation,
    DEFAULT_NEIGHBORS, DEFAULT_POPULAR_LIMIT,
};
use bookrec_storage::{ArtifactStore, StoreConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Book recommendations from precomputed popularity and similarity artifacts
#[derive(Parser, Debug)]
#[command(name = "bookrec")]
#[command(about = "Popularity-based and collaborative-filtering book recommendations", long_about = None)]
struct Args {
    /// Directory holding popular.json, pt.json, score.json and merged.json
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Similarity matrix file (.json, or .bin for bincode)
    #[arg(long, default_value = "score.json", global = true)]
    similarity_file: PathBuf,

    /// Maximum number of popular books served
    #[arg(long, default_value_t = DEFAULT_POPULAR_LIMIT, global = true)]
    popular_limit: usize,

    /// Number of similar books per query
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEIGHBORS, global = true)]
    neighbors: usize,

    /// What to do when a similar book has no metadata: fail or skip
    #[arg(long, default_value_t = MissingMetadataPolicy::Fail, global = true)]
    on_missing_metadata: MissingMetadataPolicy,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Most popular books
    Popular,
    /// Titles that can be used with `similar`
    Titles,
    /// Books similar to an exact title
    Similar {
        title: String,
    },
    /// Readiness of each artifact group
    Status,
    /// Serve the REST API
    Serve {
        /// HTTP API port
        #[arg(long, default_value_t = 6333)]
        http_port: u16,
    },
}

#[derive(Serialize)]
struct SimilarOutput<'a> {
    title: &'a str,
    recommendations: &'a [Recommendation],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting BookRec v{}", env!("CARGO_PKG_VERSION"));

    let store_config = StoreConfig {
        similarity_file: args.similarity_file.clone(),
        popular_limit: args.popular_limit,
        ..StoreConfig::new(&args.data_dir)
    };
    let engine_config = EngineConfig {
        neighbors: args.neighbors,
        on_missing_metadata: args.on_missing_metadata,
    };

    let store = Arc::new(ArtifactStore::load(store_config));
    let engine = store.engine(engine_config.clone());

    match args.command {
        Command::Popular => {
            let books = engine.popular_books()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(books)?);
            } else {
                println!("Top {} Popular Books", books.len());
                for (rank, book) in books.iter().enumerate() {
                    print_record(rank + 1, book);
                }
            }
        }
        Command::Titles => {
            let titles = engine.titles()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(titles)?);
            } else {
                for title in titles {
                    println!("{}", title);
                }
            }
        }
        Command::Similar { title } => {
            let recommendations = engine
                .recommend_similar(&title)
                .with_context(|| format!("no recommendations for {:?}", title))?;
            if args.json {
                let output = SimilarOutput {
                    title: &title,
                    recommendations: &recommendations,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Books similar to {}", title);
                for (rank, rec) in recommendations.iter().enumerate() {
                    print_record(rank + 1, &rec.record);
                    println!("    Score: {:.4}", rec.score);
                }
            }
        }
        Command::Status => {
            let status = store.status();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                for (group, group_status) in [
                    (ArtifactGroup::Popularity, &status.popularity),
                    (ArtifactGroup::Collaborative, &status.collaborative),
                ] {
                    match &group_status.error {
                        None => println!("{}: ready ({} items)", group, group_status.items),
                        Some(e) => println!("{}: unavailable ({})", group, e),
                    }
                }
            }
        }
        Command::Serve { http_port } => {
            info!("HTTP API: http://localhost:{}/", http_port);
            let sys = actix_web::rt::System::new();
            sys.block_on(RestApi::start(store, engine_config, http_port))?;
            info!("HTTP server stopped");
        }
    }

    Ok(())
}

fn print_record(rank: usize, book: &DisplayRecord) {
    println!("{:>2}. {}", rank, book.title);
    println!("    Author: {}", book.author);
    println!("    Avg Rating: {}", book.display_rating());
    println!("    Total Ratings: {}", book.total_ratings);
}
