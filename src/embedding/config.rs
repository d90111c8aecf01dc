use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Embedding dimensionality. Both bundled providers produce 384-wide
    /// vectors; changing this only affects the hash provider.
    pub dimension: usize,
    /// Where the MiniLM model files are cached. `None` uses the fastembed
    /// default cache location.
    pub cache_dir: Option<PathBuf>,
    /// Show a progress bar while the model downloads on first use.
    pub show_download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: 384,
            cache_dir: None,
            show_download_progress: false,
        }
    }
}
