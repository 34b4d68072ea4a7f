use crate::*;

/// Shannon entropy in bits. Zero-weight actions contribute nothing.
pub fn entropy(strategy: &[Probability]) -> f64 {
    strategy
        .iter()
        .filter(|p| **p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}
