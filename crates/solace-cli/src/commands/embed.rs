//! Handle `slc embed`.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use solace_embeddings::{EmbeddingEngine, pipeline};

use crate::cli::GlobalFlags;
use crate::cli::commands::EmbedArgs;
use crate::output;

#[derive(Serialize)]
struct EmbedResponse {
    total_chunks: usize,
    model: String,
    dimension: usize,
    output: String,
}

pub async fn handle(
    args: EmbedArgs,
    config: &solace_config::SolaceConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut chunks = Vec::new();
    for input in &args.inputs {
        let mut loaded = super::load_chunks(input)?;
        tracing::debug!(input = %input.display(), count = loaded.len(), "loaded chunks");
        chunks.append(&mut loaded);
    }
    anyhow::ensure!(!chunks.is_empty(), "no chunks found in the input files");

    let total = chunks.len();
    let batch_size = args.batch_size.unwrap_or(config.embeddings.batch_size);
    let cache_dir = config.embeddings.resolved_cache_dir();
    let show_download = config.embeddings.show_download_progress && !flags.quiet;

    let bar = if flags.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} chunks embedded")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // The ONNX engine is synchronous; keep it off the async runtime.
    let progress = bar.clone();
    let embedded = tokio::task::spawn_blocking(move || {
        let mut engine = EmbeddingEngine::new(cache_dir, show_download)?;
        pipeline::embed_chunks(&mut engine, chunks, batch_size, |done, _| {
            progress.set_position(done as u64);
        })
    })
    .await
    .context("embedding task panicked")??;
    bar.finish_and_clear();

    let output_path = args.output.clone().unwrap_or_else(|| {
        std::path::PathBuf::from(&config.general.output_dir).join("chunks-embedded.json")
    });
    super::save_json(&output_path, &embedded)?;

    output::output(
        &EmbedResponse {
            total_chunks: embedded.len(),
            model: solace_embeddings::MODEL_NAME.to_string(),
            dimension: EmbeddingEngine::dimension(),
            output: output_path.display().to_string(),
        },
        flags.format,
    )
}
