//! Handle `slc glossary dedupe|validate|inject|repair`.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use solace_core::entities::GlossaryEntry;
use solace_glossary::repair::{self, RepairStrategy};
use solace_glossary::{dedupe, readability, tooltip};

use crate::cli::GlobalFlags;
use crate::cli::commands::{
    GlossaryCommands, GlossaryDedupeArgs, GlossaryInjectArgs, GlossaryRepairArgs,
    GlossaryValidateArgs,
};
use crate::output;

pub fn handle(command: &GlossaryCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        GlossaryCommands::Dedupe(args) => handle_dedupe(args, flags),
        GlossaryCommands::Validate(args) => handle_validate(args, flags),
        GlossaryCommands::Inject(args) => handle_inject(args, flags),
        GlossaryCommands::Repair(args) => handle_repair(args, flags),
    }
}

fn load_glossary(path: &Path) -> anyhow::Result<Vec<GlossaryEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a glossary array", path.display()))
}

fn handle_dedupe(args: &GlossaryDedupeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let glossary = load_glossary(&args.input)?;
    let (deduped, report) = dedupe::dedupe_glossary(glossary);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling_output(&args.input, "-deduped"));
    super::save_json(&output_path, &deduped)?;

    output::output(&report, flags.format)
}

fn handle_validate(args: &GlossaryValidateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chunks = super::load_chunks(&args.input)?;
    let metrics: Vec<_> = chunks.iter().map(readability::validate_chunk).collect();
    let mut report = readability::ValidationReport::from_metrics(metrics);

    if let Some(limit) = flags.limit {
        report.flagged.truncate(limit as usize);
    }
    output::output(&report, flags.format)
}

#[derive(Serialize)]
struct InjectResponse {
    chunks_updated: usize,
    tooltips_added: usize,
    output: String,
}

fn handle_inject(args: &GlossaryInjectArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut chunks = super::load_chunks(&args.input)?;
    let (glossary, _) = dedupe::dedupe_glossary(load_glossary(&args.glossary)?);

    let mut chunks_updated = 0usize;
    let mut tooltips_added = 0usize;
    for chunk in &mut chunks {
        let (injected, terms) = tooltip::inject_tooltips(&chunk.text, &glossary);
        if !terms.is_empty() {
            chunk.text = injected;
            chunks_updated += 1;
            tooltips_added += terms.len();
        }
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling_output(&args.input, "-tooltips"));
    super::save_json(&output_path, &chunks)?;

    output::output(
        &InjectResponse {
            chunks_updated,
            tooltips_added,
            output: output_path.display().to_string(),
        },
        flags.format,
    )
}

#[derive(Serialize)]
struct RepairResponse {
    simplified: usize,
    tooltips_removed: usize,
    unchanged: usize,
    output: String,
}

fn handle_repair(args: &GlossaryRepairArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut chunks = super::load_chunks(&args.input)?;

    let mut simplified = 0usize;
    let mut removed = 0usize;
    let mut unchanged = 0usize;
    for chunk in &mut chunks {
        let outcome = repair::repair_text(&chunk.text, args.max_grade);
        match outcome.strategy {
            RepairStrategy::SimplifyDefinitions => simplified += 1,
            RepairStrategy::RemoveComplexTooltips => removed += 1,
            RepairStrategy::NoChange => unchanged += 1,
        }
        if outcome.improved {
            chunk.text = outcome.text;
        }
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling_output(&args.input, "-repaired"));
    super::save_json(&output_path, &chunks)?;

    output::output(
        &RepairResponse {
            simplified,
            tooltips_removed: removed,
            unchanged,
            output: output_path.display().to_string(),
        },
        flags.format,
    )
}
