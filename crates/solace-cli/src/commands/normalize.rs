//! Handle `slc normalize`.

use anyhow::Context;
use serde::Serialize;
use solace_protocol::normalize::normalize_with_report;

use crate::cli::GlobalFlags;
use crate::cli::commands::NormalizeArgs;
use crate::output;

#[derive(Serialize)]
struct NormalizeResponse {
    input: String,
    output: String,
    original_chars: usize,
    normalized_chars: usize,
}

pub fn handle(args: &NormalizeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let (normalized, report) = normalize_with_report(&raw);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling_output(&args.input, "-normalized"));
    std::fs::write(&output_path, normalized)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    output::output(
        &NormalizeResponse {
            input: args.input.display().to_string(),
            output: output_path.display().to_string(),
            original_chars: report.original_chars,
            normalized_chars: report.normalized_chars,
        },
        flags.format,
    )
}
