use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{EmbeddingConfig, EmbeddingError, EmbeddingProvider};

/// Fixed seeds for deterministic hashing.
/// Changing either value changes every embedding; bump `version()` with it.
const HASH_SEED_K0: u64 = 0x7e4d_01c2_55aa_9b38;
const HASH_SEED_K1: u64 = 0x1f86_c9d4_e072_6a5d;

/// Deterministic feature-hashing embedding provider.
///
/// Lowercased whitespace tokens are sign-hashed into a fixed-width vector
/// and L2-normalized. No model files, no startup cost, stable across
/// processes and Rust versions (SipHash-1-3 with fixed keys). Used by the
/// test suite and by deployments that opt out of ONNX inference.
pub struct HashEmbeddingProvider {
    config: EmbeddingConfig,
}

impl HashEmbeddingProvider {
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut config = config;
        config.dimension = config.dimension.max(1);
        Self { config }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }

    fn embed_tokens(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.config.dimension];

        for raw in text.split_whitespace() {
            let token = raw.to_lowercase();
            let idx = self.hash_token(&token);
            // Sign hashing keeps colliding tokens from only accumulating.
            let sign = if self.hash_token(&format!("{token}_sign")) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_tokens(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::cosine_similarity;

    fn provider() -> HashEmbeddingProvider {
        HashEmbeddingProvider::new(EmbeddingConfig::default())
    }

    #[test]
    fn same_text_embeds_identically() {
        let provider = provider();
        let a = provider.embed("Senior Rust engineer in Berlin").unwrap();
        let b = provider.embed("Senior Rust engineer in Berlin").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn vectors_are_l2_normalized() {
        let provider = provider();
        let vector = provider.embed("python sql airflow").unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn blank_text_embeds_to_zero_vector() {
        let provider = provider();
        assert!(provider.embed("").unwrap().iter().all(|&v| v == 0.0));
        assert!(provider.embed("   \t\n").unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        let provider = provider();
        let lower = provider.embed("rust postgres").unwrap();
        let mixed = provider.embed("Rust POSTGRES").unwrap();
        assert_eq!(lower, mixed);
    }

    #[test]
    fn overlapping_texts_are_more_similar_than_disjoint_ones() {
        let provider = provider();
        let query = provider.embed("rust backend aws kubernetes").unwrap();
        let close = provider.embed("rust aws platform work").unwrap();
        let far = provider.embed("watercolor portrait painting").unwrap();

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn dimension_floor_is_one() {
        let provider = HashEmbeddingProvider::new(EmbeddingConfig {
            dimension: 0,
            ..EmbeddingConfig::default()
        });
        assert_eq!(provider.dimension(), 1);
    }
}
