//! Handle `slc fixtures`.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use solace_protocol::fixtures;

use crate::cli::GlobalFlags;
use crate::cli::commands::FixturesArgs;
use crate::output;

#[derive(Serialize)]
struct FixturesResponse {
    written: Vec<String>,
    skipped: Vec<String>,
}

pub fn handle(args: &FixturesArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.research.is_some() || args.rewiring.is_some() || args.deductible.is_some(),
        "pass at least one of --research, --rewiring, --deductible"
    );

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let mut written = Vec::new();
    let mut skipped = Vec::new();

    let mut run = |input: Option<&PathBuf>,
                   name: &str,
                   extract: &dyn Fn(&str) -> Option<String>|
     -> anyhow::Result<()> {
        let Some(input) = input else { return Ok(()) };
        let content = std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        match extract(&content) {
            Some(fixture) => {
                let path = args.output_dir.join(name);
                std::fs::write(&path, fixture)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written.push(path.display().to_string());
            }
            None => skipped.push(format!("{}: no recognizable structure", input.display())),
        }
        Ok(())
    };

    let count = args.count;
    run(
        args.research.as_ref(),
        "test-research-protocols.md",
        &|content| fixtures::research_fixture(content, count),
    )?;
    run(args.rewiring.as_ref(), "test-rewiring.txt", &|content| {
        fixtures::rewiring_fixture(content)
    })?;
    run(
        args.deductible.as_ref(),
        "test-deductible.md",
        &|content| fixtures::deductible_fixture(content, count),
    )?;

    output::output(&FixturesResponse { written, skipped }, flags.format)
}
