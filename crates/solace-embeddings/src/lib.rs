//! # solace-embeddings
//!
//! Local embedding generation for Solace using fastembed (ONNX runtime).
//!
//! Generates 384-dimensional vectors for knowledge chunks and search queries
//! without requiring any external API keys. The hosted search index stores
//! these vectors; this crate only produces them.
//!
//! ## Model
//!
//! Uses [`AllMiniLML6V2`](fastembed::EmbeddingModel::AllMiniLML6V2)
//! (sentence-transformers/all-MiniLM-L6-v2):
//! - 384-dimensional output vectors
//! - Mean pooling (no query/passage prefix needed)
//! - ~80MB model size, downloaded on first use into the configured cache dir
//!
//! ## Async usage
//!
//! The fastembed ONNX runtime is synchronous. When calling from async code,
//! wrap calls in `tokio::task::spawn_blocking`.

pub mod error;
pub mod pipeline;

pub use error::EmbeddingError;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use std::path::PathBuf;

/// Name recorded on embedded chunks, matching the hosted index config.
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Seam between the pipeline and the ONNX engine, so pipelines test without
/// a model download.
pub trait Embedder {
    /// Embed a batch of texts, one vector per input.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails.
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Local embedding engine backed by fastembed (ONNX runtime).
///
/// # Thread safety
///
/// [`TextEmbedding::embed`] requires `&mut self`. To use from multiple
/// threads, wrap in a `Mutex` or create one engine per thread.
pub struct EmbeddingEngine {
    model: TextEmbedding,
}

impl EmbeddingEngine {
    /// Create a new embedding engine with the `AllMiniLML6V2` model.
    ///
    /// Downloads the model on first run (~80MB) into `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX
    /// initialization fails.
    pub fn new(cache_dir: PathBuf, show_download_progress: bool) -> Result<Self, EmbeddingError> {
        let model = TextEmbedding::try_new(
            TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(show_download_progress),
        )
        .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self { model })
    }

    /// Embed a single text. Returns a 384-dim vector.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails, or
    /// [`EmbeddingError::EmptyResult`] if the model returns no embeddings.
    pub fn embed_single(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut results = self.embed_batch(vec![text.to_string()])?;
        results.pop().ok_or(EmbeddingError::EmptyResult)
    }

    /// Embedding vector dimensionality (always 384 for `AllMiniLML6V2`).
    #[must_use]
    pub const fn dimension() -> usize {
        384
    }
}

impl Embedder for EmbeddingEngine {
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))
    }
}
