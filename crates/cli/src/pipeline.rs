use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use extract::{Comparison, EntityExtractor, EntitySet, HeuristicModel, LanguageModel};
use ingest::{BookFetcher, BookSource, Document};
use network::Network;

use crate::config::AppConfig;
use crate::metrics::{PipelineStats, TimedOperation};

/// A book plus the markers that delimit its body.
#[derive(Debug, Clone)]
pub struct BookRequest {
    pub source: BookSource,
    pub start_marker: String,
    pub end_marker: String,
}

#[derive(Debug)]
pub struct BookEntities {
    pub document: Document,
    pub entity_sets: Vec<EntitySet>,
}

fn fetcher(config: &AppConfig) -> Result<BookFetcher> {
    match config.fetch.timeout_secs {
        Some(secs) => Ok(BookFetcher::with_timeout(Duration::from_secs(secs))?),
        None => Ok(BookFetcher::new()),
    }
}

/// Load the book and return its cleaned body.
pub async fn load_clean_text(
    request: &BookRequest,
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Result<(Document, String)> {
    let timer = TimedOperation::start();
    let document = ingest::load_document(&request.source, &fetcher(config)?)
        .await
        .with_context(|| format!("Failed to load book: {}", request.source.describe()))?;
    stats.record_load(timer.elapsed(), document.len());

    let timer = TimedOperation::start();
    let cleaned = ingest::clean(&document, &request.start_marker, &request.end_marker)
        .context("Failed to clean book text")?;
    stats.record_clean(timer.elapsed(), cleaned.len());

    info!(
        doc_id = %document.id,
        source = %document.source,
        cleaned_bytes = cleaned.len(),
        "Book ready for extraction"
    );

    Ok((document, cleaned))
}

/// Load, clean and extract with a model that lives only for this call.
pub async fn get_book_entities(
    request: &BookRequest,
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Result<BookEntities> {
    let model = HeuristicModel::load().context("Failed to load language model")?;
    get_book_entities_with(&model, request, config, stats).await
}

pub async fn get_book_entities_with<M: LanguageModel + ?Sized>(
    model: &M,
    request: &BookRequest,
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Result<BookEntities> {
    let (document, cleaned) = load_clean_text(request, config, stats).await?;

    let timer = TimedOperation::start();
    let entity_sets = EntityExtractor::new(model, config.extract.clone())
        .extract(&cleaned)
        .context("Entity extraction failed")?;
    stats.record_extract(timer.elapsed(), entity_sets.len());

    Ok(BookEntities {
        document,
        entity_sets,
    })
}

/// Run both tagging scopes over the same cleaned text.
pub async fn compare_book_scopes(
    request: &BookRequest,
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Result<Comparison> {
    let model = HeuristicModel::load().context("Failed to load language model")?;
    let (_, cleaned) = load_clean_text(request, config, stats).await?;

    let timer = TimedOperation::start();
    let comparison = extract::compare_scopes(&model, &config.extract.labels, &cleaned)
        .context("Entity extraction failed")?;
    stats.record_extract(timer.elapsed(), comparison.left_len);

    Ok(comparison)
}

pub fn build_network(
    entity_sets: &[EntitySet],
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Network {
    let timer = TimedOperation::start();
    let network = Network::build(entity_sets, &config.pagerank);
    stats.record_network(
        timer.elapsed(),
        network.edges.len(),
        network.graph.node_count(),
        network.graph.edge_count(),
    );
    network
}

/// Write the edge table, scores, picture and stats into `dir`.
pub fn write_outputs(
    dir: &Path,
    network: &Network,
    config: &AppConfig,
    stats: &mut PipelineStats,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let csv_path = dir.join("edges.csv");
    let file = std::fs::File::create(&csv_path)
        .with_context(|| format!("Failed to create {:?}", csv_path))?;
    network.edges.write_csv(file)?;

    let json_path = dir.join("edges.json");
    std::fs::write(&json_path, network.edges.to_json_pretty()?)?;

    let scores_path = dir.join("scores.json");
    std::fs::write(&scores_path, serde_json::to_string_pretty(&network.ranking())?)?;

    let timer = TimedOperation::start();
    let svg = network.render(&config.render).context("Failed to render graph")?;
    stats.record_render(timer.elapsed());
    let svg_path = dir.join("graph.svg");
    std::fs::write(&svg_path, svg)?;

    let stats_path = dir.join("stats.json");
    std::fs::write(&stats_path, serde_json::to_string_pretty(stats)?)?;

    let written = vec![csv_path, json_path, scores_path, svg_path, stats_path];
    info!(dir = %dir.display(), files = written.len(), "Wrote network outputs");

    Ok(written)
}
