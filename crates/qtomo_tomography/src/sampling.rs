//! Outcome sampling
//!
//! Gantree: L5_Tomography → OutcomeSampler
//!
//! Draws outcome indices from a discrete distribution and bins them.

use qtomo_core::Histogram;
use rand::Rng;

/// Draw `num_samples` outcome indices from `probs`.
///
/// Each uniform draw maps to the first index whose cumulative probability
/// exceeds it; round-off past the last bin lands on the last index.
/// Gantree: sample_outcomes(p, N, rng) -> Vec<usize> // 결과 샘플링
pub fn sample_outcomes<R: Rng + ?Sized>(probs: &[f64], num_samples: usize, rng: &mut R) -> Vec<usize> {
    if probs.is_empty() {
        log::warn!("sampling from an empty distribution");
        return Vec::new();
    }

    let cdf: Vec<f64> = probs
        .iter()
        .scan(0.0, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect();
    let last = cdf.len() - 1;

    log::debug!("sampling {} outcomes over {} bins", num_samples, probs.len());
    (0..num_samples)
        .map(|_| {
            let r: f64 = rng.gen();
            cdf.partition_point(|&c| c <= r).min(last)
        })
        .collect()
}

/// Count occurrences of each outcome, with at least `num_bins` bins
/// Gantree: make_histogram(outcomes, n) -> Histogram // 빈도 집계
pub fn make_histogram(outcomes: &[usize], num_bins: usize) -> Histogram {
    let len = outcomes
        .iter()
        .map(|&o| o + 1)
        .max()
        .unwrap_or(0)
        .max(num_bins);
    let mut histogram = vec![0u64; len];
    for &o in outcomes {
        histogram[o] += 1;
    }
    histogram
}

/// Sample and bin in one step
pub fn sample_histogram<R: Rng + ?Sized>(probs: &[f64], num_samples: usize, rng: &mut R) -> Histogram {
    make_histogram(&sample_outcomes(probs, num_samples, rng), probs.len())
}

/// Histogram normalized by its total count
pub fn normalize_histogram(histogram: &[u64]) -> Vec<f64> {
    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return vec![0.0; histogram.len()];
    }
    histogram.iter().map(|&c| c as f64 / total as f64).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_make_histogram_min_length() {
        assert_eq!(make_histogram(&[0, 2, 2], 4), vec![1, 0, 2, 0]);
        assert_eq!(make_histogram(&[], 2), vec![0, 0]);
    }

    #[test]
    fn test_make_histogram_extends_past_min_length() {
        assert_eq!(make_histogram(&[3], 2), vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_degenerate_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcomes = sample_outcomes(&[0.0, 0.0, 1.0], 200, &mut rng);
        assert!(outcomes.iter().all(|&o| o == 2));
    }

    #[test]
    fn test_round_off_clamps_to_last_bin() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Sums slightly below 1
        let outcomes = sample_outcomes(&[0.5, 0.5 - 1e-12], 1000, &mut rng);
        assert!(outcomes.iter().all(|&o| o < 2));
    }

    #[test]
    fn test_empty_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(sample_outcomes(&[], 10, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_histogram_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let hist = sample_histogram(&[0.25; 4], 1000, &mut rng);
        assert_eq!(hist.len(), 4);
        assert_eq!(hist.iter().sum::<u64>(), 1000);
    }

    #[test]
    fn test_normalize_histogram() {
        assert_eq!(normalize_histogram(&[1, 3]), vec![0.25, 0.75]);
        assert_eq!(normalize_histogram(&[0, 0]), vec![0.0, 0.0]);
    }
}
