//! Embedding engine configuration.

use serde::{Deserialize, Serialize};

/// Default batch size for embedding generation.
const fn default_batch_size() -> usize {
    100
}

const fn default_show_download_progress() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingsConfig {
    /// Model cache directory. Empty means `~/.solace/cache/fastembed`.
    #[serde(default)]
    pub cache_dir: String,

    /// Number of texts embedded per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Whether to show the model download progress bar on first run.
    #[serde(default = "default_show_download_progress")]
    pub show_download_progress: bool,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            cache_dir: String::new(),
            batch_size: default_batch_size(),
            show_download_progress: default_show_download_progress(),
        }
    }
}

impl EmbeddingsConfig {
    /// Resolved cache directory, falling back to the home-dir default.
    pub fn resolved_cache_dir(&self) -> std::path::PathBuf {
        if self.cache_dir.is_empty() {
            dirs::home_dir().map_or_else(
                || std::path::PathBuf::from(".fastembed_cache"),
                |home| home.join(".solace").join("cache").join("fastembed"),
            )
        } else {
            std::path::PathBuf::from(&self.cache_dir)
        }
    }
}
