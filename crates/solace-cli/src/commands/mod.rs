//! Command handlers and dispatch.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use solace_core::entities::KnowledgeChunk;

use crate::cli::{Commands, GlobalFlags};

pub mod affect;
pub mod embed;
pub mod fixtures;
pub mod glossary;
pub mod normalize;
pub mod parse;
pub mod score;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &solace_config::SolaceConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Normalize(args) => normalize::handle(&args, flags),
        Commands::Parse(command) => parse::handle(&command, config, flags),
        Commands::Fixtures(args) => fixtures::handle(&args, flags),
        Commands::Embed(args) => embed::handle(args, config, flags).await,
        Commands::Glossary(command) => glossary::handle(&command, flags),
        Commands::Affect(command) => affect::handle(&command, config, flags).await,
        Commands::Score(command) => score::handle(&command, flags),
    }
}

/// Envelope written by `slc parse` around the chunk array.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkDocument {
    pub meta: ChunkDocumentMeta,
    pub chunks: Vec<KnowledgeChunk>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkDocumentMeta {
    pub source_file: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub total_chunks: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChunkFile {
    Envelope { chunks: Vec<KnowledgeChunk> },
    Plain(Vec<KnowledgeChunk>),
}

/// Load chunks from a parse envelope or a bare JSON array.
pub fn load_chunks(path: &Path) -> anyhow::Result<Vec<KnowledgeChunk>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: ChunkFile = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a chunk file", path.display()))?;
    Ok(match file {
        ChunkFile::Envelope { chunks } | ChunkFile::Plain(chunks) => chunks,
    })
}

/// Write a value as pretty JSON, creating parent directories as needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// `<output_dir>/<input stem><suffix>.json`.
pub fn derived_output(output_dir: &str, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    PathBuf::from(output_dir).join(format!("{stem}{suffix}.json"))
}

/// Sibling path: `<input stem><suffix>.<ext>`.
pub fn sibling_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("txt");
    input.with_file_name(format!("{stem}{suffix}.{ext}"))
}
