//! Handle `slc parse research|rewiring|deductible`.

use anyhow::Context;
use serde::Serialize;
use solace_core::entities::KnowledgeChunk;
use solace_protocol::stats::ParseStats;
use solace_protocol::{deductible, research, rewiring};

use crate::cli::GlobalFlags;
use crate::cli::commands::{ParseArgs, ParseCommands};
use crate::commands::{ChunkDocument, ChunkDocumentMeta};
use crate::output;

#[derive(Serialize)]
struct ParseResponse {
    output: String,
    stats: ParseStats,
}

pub fn handle(
    command: &ParseCommands,
    config: &solace_config::SolaceConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (args, parser_name) = match command {
        ParseCommands::Research(args) => (args, "research"),
        ParseCommands::Rewiring(args) => (args, "rewiring"),
        ParseCommands::Deductible(args) => (args, "deductible"),
    };

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let source_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input")
        .to_string();

    let chunks = run_parser(parser_name, &content, &source_name)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let stats = ParseStats::compute(&chunks);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| super::derived_output(&config.general.output_dir, &args.input, "-parsed"));

    let document = ChunkDocument {
        meta: ChunkDocumentMeta {
            source_file: source_name,
            generated_at: chrono::Utc::now(),
            total_chunks: chunks.len(),
        },
        chunks,
    };
    super::save_json(&output_path, &document)?;

    output::output(
        &ParseResponse {
            output: output_path.display().to_string(),
            stats,
        },
        flags.format,
    )
}

fn run_parser(
    parser_name: &str,
    content: &str,
    source_name: &str,
) -> Result<Vec<KnowledgeChunk>, solace_protocol::ProtocolError> {
    match parser_name {
        "rewiring" => rewiring::parse_rewiring_protocols(content, source_name),
        "deductible" => deductible::parse_deductible_practices(content, source_name),
        _ => research::parse_research_protocols(content),
    }
}
