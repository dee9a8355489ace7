//! booknet - build entity co-occurrence networks from plain-text books
//!
//! Usage:
//!   booknet entities --url <url> --start "CHAPTER I"
//!   booknet network --file book.txt --start "CHAPTER I" --out out/ --show-names
//!   booknet compare --url <url> --start "CHAPTER I"

mod config;
mod metrics;
mod pipeline;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use extract::{EntityLabel, TaggingScope};
use ingest::BookSource;
use metrics::PipelineStats;
use pipeline::BookRequest;

#[derive(Parser)]
#[command(name = "booknet")]
#[command(about = "Extract named entities from a book and build their co-occurrence network")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// URL of the plain-text book
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    url: Option<String>,

    /// Local copy of the book (.txt or .md)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Text where the book body starts (first occurrence)
    #[arg(long)]
    start: String,

    /// Text where the book body ends (last occurrence)
    #[arg(long, default_value = ingest::DEFAULT_END_MARKER)]
    end: String,

    /// Tag each sentence on its own (`sentence`) or the whole text once (`document`)
    #[arg(long)]
    scope: Option<TaggingScope>,

    /// Entity labels to keep; repeat the flag for several (default PERSON, ORG, GPE)
    #[arg(long = "label")]
    labels: Vec<EntityLabel>,
}

impl SourceArgs {
    fn request(&self) -> BookRequest {
        let source = match (&self.url, &self.file) {
            (Some(url), _) => BookSource::Url(url.clone()),
            (None, Some(path)) => BookSource::File(path.clone()),
            // clap enforces one of the two
            (None, None) => unreachable!("either --url or --file is required"),
        };

        BookRequest {
            source,
            start_marker: self.start.clone(),
            end_marker: self.end.clone(),
        }
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(scope) = self.scope {
            config.extract.scope = scope;
        }
        if !self.labels.is_empty() {
            config.extract.labels = self.labels.clone();
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entity sets found in each sentence as JSON
    Entities {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Build the network and write edges, scores and an SVG picture
    Network {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory; files go to `<out>/<document id>/` (default from config, `out`)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Label nodes with entity names
        #[arg(long)]
        show_names: bool,
    },
    /// Compare per-sentence and whole-document tagging on the same book
    Compare {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    let mut stats = PipelineStats::default();

    match cli.command {
        Commands::Entities { source } => {
            source.apply(&mut config);
            let result =
                pipeline::get_book_entities(&source.request(), &config, &mut stats).await?;

            println!("{}", serde_json::to_string_pretty(&result.entity_sets)?);
            stats.log();
        }
        Commands::Network {
            source,
            out,
            show_names,
        } => {
            source.apply(&mut config);
            if show_names {
                config.render.show_names = true;
            }
            let out_dir = out.unwrap_or_else(|| config.output.dir.clone());

            let result =
                pipeline::get_book_entities(&source.request(), &config, &mut stats).await?;
            let network = pipeline::build_network(&result.entity_sets, &config, &mut stats);
            let out_dir = out_dir.join(&result.document.id);
            let written = pipeline::write_outputs(&out_dir, &network, &config, &mut stats)
                .context("Failed to write outputs")?;

            for path in written {
                println!("{}", path.display());
            }
            if let Some(top) = network.ranking().first() {
                info!(entity = %top.name, score = top.score, "Most central entity");
            }
            stats.log();
        }
        Commands::Compare { source } => {
            source.apply(&mut config);
            let comparison =
                pipeline::compare_book_scopes(&source.request(), &config, &mut stats).await?;

            println!("{}", serde_json::to_string_pretty(&comparison)?);
            println!("Overall match: {}", comparison.overall_match());
            stats.log();
        }
    }

    Ok(())
}
