//! # QTOMO Tomography
//!
//! Outcome sampling, readout-error simulation and assignment-probability
//! estimation for tomography experiments.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qtomo_tomography // L5: Tomography (완료)
//!     L5_Tomography // 토모그래피 유틸리티 (완료)
//!         OutcomeSampler // 결과 샘플링/히스토그램 (완료)
//!         Readout // 판독 오류/할당 확률 (완료)
//!         Preparation // 기저 상태 준비/라벨 (완료)
//!         SamplingConfig // 설정 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qtomo_tomography::prelude::*;
//! use qtomo_backend::StateVectorSimulator;
//! use ndarray::array;
//!
//! let config = SamplingConfig::default().with_seed(42).with_samples(1000);
//! let mut rng = config.rng();
//!
//! let sim = StateVectorSimulator::new();
//! let preps = basis_state_preps(&[0]);
//! let readout = array![[0.95, 0.1], [0.05, 0.9]];
//!
//! let outcomes = sample_bad_readout(&preps[1], config.num_samples, &readout, &sim, &mut rng).unwrap();
//! let histogram = make_histogram(&outcomes, 2);
//! assert_eq!(histogram.iter().sum::<u64>(), 1000);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Outcome sampling (Gantree: L5_Tomography → OutcomeSampler)
pub mod sampling;

/// Readout error (Gantree: L5_Tomography → Readout)
pub mod readout;

/// Basis-state preparation (Gantree: L5_Tomography → Preparation)
pub mod preparation;

/// Configuration (Gantree: L5_Tomography → SamplingConfig)
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SamplingConfig;
pub use preparation::{basis_labels, basis_state_preps};
pub use readout::{
    bad_readout_distribution, estimate_assignment_probs, measure_assignment_counts,
    sample_bad_readout, sample_bad_readout_with,
};
pub use sampling::{make_histogram, sample_outcomes};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qtomo_tomography::prelude::*;
    //! ```

    pub use crate::config::SamplingConfig;
    pub use crate::preparation::{basis_labels, basis_state_preps};
    pub use crate::readout::{
        bad_readout_distribution, estimate_assignment_probs, measure_assignment_counts,
        sample_bad_readout, sample_bad_readout_with,
    };
    pub use crate::sampling::{make_histogram, normalize_histogram, sample_histogram, sample_outcomes};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2, Axis};
    use qtomo_backend::StateVectorSimulator;
    use qtomo_operator::prelude::*;

    #[test]
    fn test_sampled_histogram_approximates_distribution() {
        let probs = [0.9, 0.05, 0.03, 0.02];
        let config = SamplingConfig::default().with_seed(2024);
        let mut rng = config.rng();

        let outcomes = sample_outcomes(&probs, config.num_samples, &mut rng);
        let histogram = make_histogram(&outcomes, probs.len());
        let freqs = normalize_histogram(&histogram);
        for (f, p) in freqs.iter().zip(probs) {
            assert_abs_diff_eq!(*f, p, epsilon = 0.01);
        }
    }

    #[test]
    fn test_assignment_probs_reproduce_counts() {
        let counts = array![
            [812u64, 101, 60, 27],
            [95, 780, 30, 95],
            [70, 20, 850, 60],
            [5, 70, 90, 835]
        ];
        let a = estimate_assignment_probs(&counts);
        let totals = counts.mapv(|c| c as f64).sum_axis(Axis(1)).insert_axis(Axis(1));
        let back = &a.t() * &totals;
        for (x, c) in back.iter().zip(counts.iter()) {
            assert_abs_diff_eq!(*x, *c as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_noisy_readout_recovers_assignment_matrix() {
        let sim = StateVectorSimulator::new();
        let single = array![[0.95, 0.08], [0.05, 0.92]];
        let readout = Array2::from_shape_fn((4, 4), |(k, j)| {
            single[[k >> 1, j >> 1]] * single[[k & 1, j & 1]]
        });
        let mut rng = SamplingConfig::default().with_seed(7).rng();

        let counts = measure_assignment_counts(&[0, 1], 20_000, |program, n| {
            sample_bad_readout(program, n, &readout, &sim, &mut rng)
        })
        .unwrap();
        let estimate = estimate_assignment_probs(&counts);

        // Symmetric per-qubit readout is invariant under qubit relabelling
        for (e, r) in estimate.iter().zip(readout.iter()) {
            assert_abs_diff_eq!(*e, *r, epsilon = 0.01);
        }
    }

    #[test]
    fn test_assignment_matrix_builds_valid_povm() {
        let counts = array![[90u64, 10], [15, 85]];
        let a = estimate_assignment_probs(&counts);
        let povm = make_diagonal_povm(&povm_pi_basis(), &a).unwrap();
        assert!(povm.is_complete());

        let labels = basis_labels(1);
        assert_eq!(povm_pi_basis().labels(), labels.as_slice());
    }
}
