use crate::*;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Cleans a submitted policy into a distribution.
///
/// Returns `None` when the raw weights do not sum to a finite positive
/// value, so the caller can substitute a fallback. Otherwise negative
/// weights are clamped to zero and the rest rescaled.
pub fn normalize(policy: &[Probability]) -> Option<Policy> {
    let total = policy.iter().sum::<Probability>();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let weights = policy.iter().map(|p| p.max(0.0)).collect::<Vec<_>>();
    let sum = weights.iter().sum::<Probability>();
    Some(weights.into_iter().map(|w| w / sum).collect())
}

/// Draws one action index proportionally to `policy`.
pub fn sample(policy: &[Probability], rng: &mut impl Rng) -> Action {
    match WeightedIndex::new(policy) {
        Ok(distribution) => distribution.sample(rng),
        Err(_) => rng.random_range(0..policy.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn normalize_rescales() {
        assert_eq!(normalize(&[2.0, 2.0]), Some(vec![0.5, 0.5]));
        assert_eq!(normalize(&[0.0, 3.0]), Some(vec![0.0, 1.0]));
    }
    #[test]
    fn normalize_clamps_negatives_when_total_is_positive() {
        assert_eq!(normalize(&[-1.0, 2.0]), Some(vec![0.0, 1.0]));
    }
    #[test]
    fn normalize_rejects_cancelling_weights() {
        assert_eq!(normalize(&[1.0, -1.0]), None);
    }
    #[test]
    fn normalize_rejects_non_finite_weights() {
        assert_eq!(normalize(&[f64::NAN, 1.0]), None);
        assert_eq!(normalize(&[f64::INFINITY, 1.0]), None);
    }
    #[test]
    fn normalize_rejects_degenerate() {
        assert_eq!(normalize(&[0.0, 0.0]), None);
        assert_eq!(normalize(&[-1.0, -2.0]), None);
        assert_eq!(normalize(&[]), None);
    }
    #[test]
    fn one_hot_always_samples_its_action() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1_000 {
            assert_eq!(sample(&[0.0, 1.0], rng), 1);
        }
    }
    #[test]
    fn uniform_samples_are_balanced() {
        let ref mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
        let trials = 10_000;
        let ones = (0..trials).filter(|_| sample(&[0.5, 0.5], rng) == 1).count();
        let freq = ones as f64 / trials as f64;
        assert!((freq - 0.5).abs() < 0.03, "frequency {}", freq);
    }
}
