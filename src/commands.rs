use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::embeddings::{chunk_documents, provider_from_config};
use crate::index::{LoadOutcome, NewRecord, VectorIndex, storage};
use crate::ingest::DocumentLoader;
use crate::knowledge::{KnowledgeBaseMatcher, MatcherMode};
use crate::query::QueryEngine;
use crate::rag::{AnswerComposer, AnswerStatus, Assistant};
use crate::tools::ToolRecommender;

/// Load documents from `paths`, chunk them and add them to the vector index
#[inline]
pub fn ingest(config: &Config, paths: &[PathBuf], rebuild: bool, recursive: bool) -> Result<()> {
    let provider = provider_from_config(config).context("Failed to set up embedding provider")?;
    let mut index = VectorIndex::new(provider, config.index_path());

    if rebuild {
        // Saved files are only replaced once the new index is saved
        index.reset();
    } else {
        match index.load().context("Failed to load existing index")? {
            LoadOutcome::Loaded { documents } => {
                eprintln!("Appending to existing index ({} chunks)", documents);
            }
            LoadOutcome::Missing => {}
            LoadOutcome::ModelMismatch { stored, current } => {
                anyhow::bail!(
                    "Index was built with {stored} but {current} is configured; rerun with --rebuild"
                );
            }
        }
    }

    let documents = DocumentLoader::default().load_paths(paths, recursive);
    if documents.is_empty() {
        eprintln!("{}", style("No supported documents found.").yellow());
        if rebuild {
            eprintln!("Existing index left unchanged");
        }
        return Ok(());
    }

    let chunks = chunk_documents(&documents, &config.chunking);
    info!(
        "Split {} documents into {} chunks",
        documents.len(),
        chunks.len()
    );

    let batch_size = usize::try_from(config.embedding.batch_size)
        .unwrap_or(1)
        .max(1);
    let progress = ProgressBar::new(chunks.len() as u64).with_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} Embedding chunks")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut inserted = 0;
    for batch in &chunks.into_iter().chunks(batch_size) {
        let records: Vec<NewRecord> = batch.map(NewRecord::from).collect();
        let count = records.len();
        inserted += index.add(records).context("Failed to embed chunks")?;
        progress.inc(count as u64);
    }
    progress.finish_and_clear();

    index.save().context("Failed to save index")?;
    if rebuild {
        eprintln!("{}", style("Replaced existing index").yellow());
    }

    eprintln!(
        "{} Indexed {} chunks from {} documents ({} total)",
        style("✓").green(),
        inserted,
        documents.len(),
        index.len()
    );
    Ok(())
}

/// Answer `query` from the indexed documents
#[inline]
pub fn ask(config: &Config, query: &str, top_k: Option<usize>) -> Result<()> {
    let composer = AnswerComposer::from_config(config)?;
    let response = composer.query_with_top_k(query, top_k.unwrap_or(config.retrieval.top_k));

    match response.status {
        AnswerStatus::FreeMode => eprintln!(
            "{}",
            style("Free mode: showing retrieved context without a language model").dim()
        ),
        AnswerStatus::GenerationFailed => {
            warn!("Language model call failed; showing retrieved context");
        }
        AnswerStatus::Generated | AnswerStatus::NoResults | AnswerStatus::Failed => {}
    }

    println!("{}", response.response);

    if !response.sources.is_empty() {
        println!();
        println!("{}", style("Sources:").bold().yellow());
        for (i, source) in response.sources.iter().enumerate() {
            println!(
                "  {}. {} ({})",
                i + 1,
                style(&source.source_file).cyan(),
                style(format!("{:.3}", source.score)).dim()
            );
        }
    }

    Ok(())
}

#[inline]
pub fn analyze(config: &Config, query: &str) -> Result<()> {
    let engine = QueryEngine::new().with_tentative_floor(config.matching.tentative_floor);
    let analysis = engine.analyze(query);

    println!("{}", style("🔍 Query Analysis").bold().cyan());
    println!("  Intent: {}", style(analysis.intent.as_str()).cyan());
    println!(
        "  Response type: {}",
        style(analysis.response_type.as_str()).cyan()
    );
    println!(
        "  Confidence: {}",
        style(format!("{:.2}", analysis.confidence)).cyan()
    );
    match analysis.best_topic {
        Some(topic) => println!(
            "  Best topic: {} ({:.2})",
            style(topic.label()).green(),
            analysis.best_score
        ),
        None => println!("  Best topic: {}", style("none").dim()),
    }

    if !analysis.topic_scores.is_empty() {
        println!("  Topic scores:");
        for (topic, score) in &analysis.topic_scores {
            println!("    {:<28} {:.2}", topic.label(), score);
        }
    }

    println!("  Keywords: {}", analysis.keywords.iter().join(", "));
    println!("  Enhanced query: {}", style(&analysis.enhanced_query).dim());

    Ok(())
}

/// Answer from the curated knowledge base only
#[inline]
pub fn knowledge(config: &Config, query: &str, basic: bool) -> Result<()> {
    let mode = if basic {
        MatcherMode::Basic
    } else {
        MatcherMode::Smart
    };
    let matcher = KnowledgeBaseMatcher::new(config.matching, mode);
    println!("{}", matcher.respond(query));
    Ok(())
}

#[inline]
pub fn recommend(query: &str, context: Option<&str>, top_k: usize) -> Result<()> {
    let result = ToolRecommender::new().recommend(query, context, top_k);

    if result.recommendations.is_empty() {
        println!(
            "No tools matched \"{}\" ({} evaluated).",
            result.query, result.total_tools_evaluated
        );
        return Ok(());
    }

    println!("{}", style("🔧 Recommended Tools").bold().cyan());
    println!();
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!(
            "{}. {} {}",
            i + 1,
            style(rec.tool.name).bold(),
            style(format!("(relevance {:.2})", rec.relevance_score)).dim()
        );
        println!("   ID: {}", style(rec.tool.id).cyan());
        println!(
            "   Complexity: {} | Time: {}",
            rec.tool.complexity, rec.tool.implementation_time
        );
        println!("   {}", rec.reasoning);
        println!();
    }

    Ok(())
}

#[inline]
pub fn plan(tool_ids: &[String]) -> Result<()> {
    let plan = ToolRecommender::new().generate_implementation_plan(tool_ids)?;

    println!("{}", style("📋 Implementation Plan").bold().cyan());
    println!();

    for (i, phase) in plan.phases.iter().enumerate() {
        println!(
            "{}",
            style(format!("Phase {}: {} complexity", i + 1, phase.complexity))
                .bold()
                .yellow()
        );
        for tool in &phase.tools {
            println!("  • {} ({})", tool.name, tool.implementation_time);
        }
    }

    if !plan.unknown_tools.is_empty() {
        println!();
        println!(
            "{} Unknown tool ids: {}",
            style("⚠").yellow(),
            plan.unknown_tools.iter().join(", ")
        );
    }

    println!();
    println!("{}", style("Considerations:").bold());
    for consideration in &plan.considerations {
        println!("  - {}", consideration);
    }

    Ok(())
}

/// Browse the tool catalog, optionally by category or search term
#[inline]
pub fn list_tools(category: Option<&str>, search: Option<&str>) -> Result<()> {
    let recommender = ToolRecommender::new();
    let tools = match search {
        Some(term) => recommender.search_tools(term),
        None => recommender.list_tools(category),
    };

    if tools.is_empty() {
        println!("No tools found.");
        println!("Categories: {}", recommender.categories().iter().join(", "));
        return Ok(());
    }

    println!("Quality Tools ({} total):", tools.len());
    println!();
    for tool in tools {
        println!("🔧 {} ({})", style(tool.name).bold(), style(tool.id).cyan());
        println!("   Category: {}", tool.category);
        println!(
            "   Complexity: {} | Time: {}",
            tool.complexity, tool.implementation_time
        );
        println!("   {}", tool.description);
        println!();
    }

    Ok(())
}

/// Full layered reply: documents, knowledge base and tool suggestions
#[inline]
pub fn chat(config: &Config, query: &str) -> Result<()> {
    let mut assistant = Assistant::from_config(config)?;
    let reply = assistant.reply(query);
    println!("{}", reply.render());
    Ok(())
}

#[inline]
pub fn show_status(config: &Config) -> Result<()> {
    let composer = AnswerComposer::from_config(config)?;
    let stats = composer.stats();

    println!("{}", style("📊 Quality Assistant Status").bold().cyan());
    println!();
    println!("Index:");
    println!("  Directory: {}", config.index_path().display());
    println!("  Chunks: {}", style(stats.index.document_count).cyan());
    println!(
        "  Embedding model: {} ({} dims)",
        style(&stats.index.model).cyan(),
        stats.index.dimension
    );
    println!("  Top K: {}", stats.top_k);
    println!();
    println!("Answer generation:");
    match &stats.llm_model {
        Some(model) => println!("  Model: {}", style(model).green()),
        None => println!(
            "  {}",
            style("Free mode (no language model configured)").yellow()
        ),
    }

    if stats.index.document_count == 0 {
        println!();
        println!("Use 'quality-rag ingest <paths>' to index documents.");
    }

    Ok(())
}

#[inline]
pub fn clear_index(config: &Config) -> Result<()> {
    let dir = config.index_path();
    if !storage::artifacts_present(&dir) {
        println!("No index found in {}", dir.display());
        return Ok(());
    }
    storage::remove_artifacts(&dir).context("Failed to clear index")?;
    println!("{} Index cleared", style("✓").green());
    Ok(())
}
