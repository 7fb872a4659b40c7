//! Constants for QTOMO
//!
//! Gantree: L0_Foundation → Constants
//!
//! Numerical tolerances and sampling defaults.

// ============================================================================
// Tolerance Constants
// Gantree: tolerance // 수치 허용오차
// ============================================================================

pub mod tolerance {
    //! Numerical tolerances for operator and probability comparisons

    /// Frobenius-norm tolerance for operator equality
    /// Gantree: EPS: f64 = 1e-8
    pub const EPS: f64 = 1e-8;

    /// Relative tolerance used by `allclose`
    pub const RTOL: f64 = 1e-5;

    /// Absolute tolerance used by `allclose`
    pub const ATOL: f64 = 1e-8;

    /// Tolerance for a probability vector summing to 1
    pub const PROBABILITY_SUM_TOL: f64 = 1e-6;

    /// `|a - b| <= ATOL + RTOL * |b|`, elementwise closeness as numpy defines it
    #[inline]
    pub fn allclose(a: f64, b: f64) -> bool {
        (a - b).abs() <= ATOL + RTOL * b.abs()
    }
}

// ============================================================================
// Sampling Constants
// Gantree: sampling // 샘플링 상수
// ============================================================================

pub mod sampling {
    //! Defaults for outcome sampling

    /// Default number of samples per distribution
    /// Gantree: DEFAULT_SAMPLES: usize = 10000
    pub const DEFAULT_SAMPLES: usize = 10_000;

    /// Largest qubit count the dense simulator accepts
    pub const MAX_SIMULATED_QUBITS: usize = 16;

    /// Amplitudes below this magnitude are treated as zero in bar plots
    pub const HISTOGRAM_THRESHOLD: f64 = 0.001;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::tolerance::*;

    #[test]
    fn test_allclose() {
        assert!(allclose(1.0, 1.0 + 1e-9));
        assert!(allclose(1.0, 1.0 + 5e-6));
        assert!(!allclose(1.0, 1.1));
        assert!(!allclose(0.0, 1e-6));
    }
}
