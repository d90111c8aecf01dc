use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::OnceCell;
use tracing::info;

use super::{EmbeddingConfig, EmbeddingError, EmbeddingProvider};

/// all-MiniLM-L6-v2 output width. Fixed by the model, not configurable.
const MINILM_DIMENSION: usize = 384;

/// Sentence embedding provider backed by all-MiniLM-L6-v2 via ONNX.
///
/// The session is expensive to build (model download on first run, runtime
/// initialization after), so it is created lazily on the first non-blank
/// embed and reused for the process lifetime. `OnceCell::get_or_try_init`
/// blocks concurrent first callers, so the model is never constructed
/// twice. Initialization failure is returned to the caller unchanged; there
/// is no zero-vector fallback.
pub struct MiniLmProvider {
    config: EmbeddingConfig,
    session: OnceCell<Mutex<TextEmbedding>>,
}

impl MiniLmProvider {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            session: OnceCell::new(),
        }
    }

    fn session(&self) -> Result<&Mutex<TextEmbedding>, EmbeddingError> {
        self.session.get_or_try_init(|| {
            info!(model = "all-MiniLM-L6-v2", "loading embedding model");
            let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_show_download_progress(self.config.show_download_progress);
            if let Some(dir) = &self.config.cache_dir {
                options = options.with_cache_dir(dir.clone());
            }

            let model = TextEmbedding::try_new(options)
                .map_err(|err| EmbeddingError::ModelInit(err.to_string()))?;
            info!(model = "all-MiniLM-L6-v2", "embedding model ready");
            Ok(Mutex::new(model))
        })
    }

    fn run_inference(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let session = self.session()?;
        let session = session
            .lock()
            .map_err(|_| EmbeddingError::Inference("embedding session poisoned".into()))?;
        session
            .embed(texts, None)
            .map_err(|err| EmbeddingError::Inference(err.to_string()))
    }

    fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; MINILM_DIMENSION]
    }
}

impl EmbeddingProvider for MiniLmProvider {
    fn name(&self) -> &'static str {
        "minilm"
    }

    fn version(&self) -> &str {
        "all-MiniLM-L6-v2"
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Ok(self.zero_vector());
        }

        let mut vectors = self.run_inference(vec![text])?;
        vectors.pop().ok_or_else(|| {
            EmbeddingError::Inference("model returned no embedding for one input".into())
        })
    }

    /// Single inference call for all non-blank inputs; blank inputs are
    /// spliced back in as zero vectors so the output stays order-preserving.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let non_blank: Vec<(usize, &str)> = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| (i, text.as_str()))
            .collect();

        let mut output: Vec<Vec<f32>> = texts.iter().map(|_| self.zero_vector()).collect();
        if non_blank.is_empty() {
            return Ok(output);
        }

        let vectors = self.run_inference(non_blank.iter().map(|(_, t)| *t).collect())?;
        if vectors.len() != non_blank.len() {
            return Err(EmbeddingError::Inference(format!(
                "model returned {} embeddings for {} inputs",
                vectors.len(),
                non_blank.len()
            )));
        }

        for ((index, _), vector) in non_blank.into_iter().zip(vectors) {
            output[index] = vector;
        }
        Ok(output)
    }
}
