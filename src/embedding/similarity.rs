/// Raw cosine similarity in [-1.0, 1.0].
///
/// Zero-norm vectors (the blank-text embedding) score 0.0 instead of
/// dividing by zero. Rescaling to [0, 1] is the ranking pipeline's job.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// One query against N candidates, order-preserving.
///
/// Element-wise identical to calling [`cosine_similarity`] per candidate;
/// callers may rely on that equivalence.
pub fn cosine_similarity_batch(query: &[f32], candidates: &[Vec<f32>]) -> Vec<f32> {
    candidates
        .iter()
        .map(|candidate| cosine_similarity(query, candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let a = vec![0.6, 0.8, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vectors_score_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let other = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn dimension_mismatch_scores_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn batch_matches_pairwise_in_order() {
        let query = vec![0.3, -0.2, 0.9];
        let candidates = vec![
            vec![0.3, -0.2, 0.9],
            vec![-1.0, 0.5, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![2.0, 2.0, 2.0],
        ];

        let batch = cosine_similarity_batch(&query, &candidates);

        assert_eq!(batch.len(), candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            assert_eq!(batch[i], cosine_similarity(&query, candidate));
        }
    }

    #[test]
    fn empty_candidate_list_yields_empty_scores() {
        assert!(cosine_similarity_batch(&[1.0, 0.0], &[]).is_empty());
    }
}
