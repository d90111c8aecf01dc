pub mod config;
pub mod hash_provider;
pub mod minilm;
pub mod similarity;
pub mod text;

use std::sync::Arc;

pub use config::EmbeddingConfig;
pub use hash_provider::HashEmbeddingProvider;
pub use minilm::MiniLmProvider;
pub use similarity::{cosine_similarity, cosine_similarity_batch};
pub use text::{build_opportunity_text, build_profile_text};

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding model initialization failed: {0}")]
    ModelInit(String),
    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Text-to-vector provider behind the ranking pipeline.
///
/// Implementations must be pure functions of their text input: the same
/// text always maps to the same vector for a given provider version.
///
/// Blank-input policy (unified across single and batch paths): an empty or
/// whitespace-only text embeds to the all-zero vector and never reaches the
/// underlying model. The zero vector scores 0.0 cosine similarity against
/// everything, so blank inputs rank on their remaining facets alone.
pub trait EmbeddingProvider: Send + Sync {
    /// Implementation name ("minilm", "hash").
    fn name(&self) -> &'static str;

    /// Model/generation marker. Bump when the produced vectors change.
    fn version(&self) -> &str;

    /// Embedding dimensionality.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed many texts, order-preserving. Providers with a real inference
    /// session should override this with true batching.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Build a provider by name. Unknown names fall back to MiniLM.
pub fn create_provider(name: &str, config: EmbeddingConfig) -> Arc<dyn EmbeddingProvider> {
    match name {
        "hash" => Arc::new(HashEmbeddingProvider::new(config)),
        "minilm" => Arc::new(MiniLmProvider::new(config)),
        other => {
            tracing::warn!(provider = other, "unknown embedding provider; using minilm");
            Arc::new(MiniLmProvider::new(config))
        }
    }
}

/// Read the embedding configuration from `TENDER_*` environment variables.
pub fn load_config_from_env() -> EmbeddingConfig {
    EmbeddingConfig {
        dimension: std::env::var("TENDER_EMBEDDING_DIMENSION")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(384),
        cache_dir: std::env::var_os("TENDER_MODEL_CACHE_DIR").map(Into::into),
        show_download_progress: std::env::var("TENDER_MODEL_DOWNLOAD_PROGRESS")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false),
    }
}

/// Construct the process-wide provider from the environment. Intended to be
/// called once at host startup, with the result injected into every
/// [`crate::matching::MatchingEngine`].
pub fn provider_from_env() -> Arc<dyn EmbeddingProvider> {
    let name = std::env::var("TENDER_EMBEDDING_PROVIDER").unwrap_or_else(|_| "minilm".into());
    create_provider(&name, load_config_from_env())
}
