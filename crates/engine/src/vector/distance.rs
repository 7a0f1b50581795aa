//! Similarity functions for embedding vectors.
//!
//! Scores are "higher = more similar". Computation is single-threaded so the
//! same inputs always yield bit-identical scores, which keeps ranking
//! tie-breaks reproducible. Vectors are used as-is, never normalized in place.

/// Cosine similarity: dot(a,b) / (||a|| * ||b||)
///
/// Range: [-1, 1] for non-zero vectors.
/// Returns 0.0 if either vector has zero norm, so a zero vector scores 0
/// against everything (itself included) and nothing divides by zero.
///
/// Sums are accumulated in f64: finite f32 components near the top of
/// their range would overflow an f32 accumulator and yield NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Dimension mismatch in similarity computation"
    );

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// L2 norm (Euclidean length)
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt() as f32
}
