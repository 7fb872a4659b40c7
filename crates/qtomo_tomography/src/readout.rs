//! Readout error
//!
//! Gantree: L5_Tomography → Readout
//!
//! Sampling through an imperfect readout and estimating the assignment
//! probabilities that describe it.
//!
//! Convention: `A[observed][prepared]`, so columns of an assignment matrix
//! sum to 1 and the observed distribution is `A · p_true`.

use crate::preparation::{basis_state_preps, outcome_index};
use crate::sampling::{make_histogram, sample_outcomes};
use ndarray::{Array1, Array2, Axis};
use qtomo_backend::WavefunctionSimulator;
use qtomo_core::{Program, QubitId, TomoError, TomoResult};
use rand::Rng;

// ============================================================================
// Bad Readout
// ============================================================================

/// Observed distribution `A · |ψ|²` for the state `program` prepares
/// Gantree: bad_readout_distribution(program, A, cxn) -> Result<Array1> // 오류 분포
pub fn bad_readout_distribution(
    program: &Program,
    assignment_probs: &Array2<f64>,
    cxn: &dyn WavefunctionSimulator,
) -> TomoResult<Array1<f64>> {
    let (rows, cols) = assignment_probs.dim();
    if rows != cols {
        return Err(TomoError::NotSquare { rows, cols });
    }

    let probs = cxn.wavefunction(program)?.probabilities();
    if cols != probs.len() {
        return Err(TomoError::DimensionMismatch {
            expected: probs.len(),
            actual: cols,
        });
    }
    Ok(assignment_probs.dot(&probs))
}

/// Sample through a bad readout, handing the corrupted distribution to
/// `sampler`
pub fn sample_bad_readout_with<F>(
    program: &Program,
    num_samples: usize,
    assignment_probs: &Array2<f64>,
    cxn: &dyn WavefunctionSimulator,
    sampler: F,
) -> TomoResult<Vec<usize>>
where
    F: FnOnce(&[f64], usize) -> Vec<usize>,
{
    let distribution = bad_readout_distribution(program, assignment_probs, cxn)?;
    log::debug!(
        "sampling {} readouts from {} via {}",
        num_samples,
        program.len(),
        cxn.name()
    );
    Ok(sampler(&distribution.to_vec(), num_samples))
}

/// Sample `num_samples` outcomes of `program` as seen through the
/// assignment matrix
/// Gantree: sample_bad_readout(program, N, A, cxn, rng) -> Result<Vec<usize>> // 오류 판독
pub fn sample_bad_readout<R: Rng + ?Sized>(
    program: &Program,
    num_samples: usize,
    assignment_probs: &Array2<f64>,
    cxn: &dyn WavefunctionSimulator,
    rng: &mut R,
) -> TomoResult<Vec<usize>> {
    sample_bad_readout_with(program, num_samples, assignment_probs, cxn, |p, n| {
        sample_outcomes(p, n, rng)
    })
}

// ============================================================================
// Assignment Probabilities
// ============================================================================

/// Assignment matrix from counts with rows = prepared, columns = observed.
///
/// Each row is divided by its total and the result transposed. A row with
/// no counts yields NaN entries.
/// Gantree: estimate_assignment_probs(counts) -> Array2 // 할당 확률 추정
pub fn estimate_assignment_probs(counts: &Array2<u64>) -> Array2<f64> {
    let counts = counts.mapv(|c| c as f64);
    let totals = counts.sum_axis(Axis(1)).insert_axis(Axis(1));
    (counts / &totals).reversed_axes()
}

/// Count matrix for every basis-state preparation of `qubits`.
///
/// `run` executes a program and returns wavefunction-indexed outcomes;
/// they are relabelled over `qubits` so row `j` and column `k` follow
/// [`crate::preparation::basis_labels`].
/// Gantree: measure_assignment_counts(qubits, N, run) -> Result<Array2<u64>> // 할당 실험
pub fn measure_assignment_counts<F>(
    qubits: &[QubitId],
    num_samples: usize,
    mut run: F,
) -> TomoResult<Array2<u64>>
where
    F: FnMut(&Program, usize) -> TomoResult<Vec<usize>>,
{
    let dim = 1usize << qubits.len();
    let mut counts = Array2::zeros((dim, dim));

    for (prepared, program) in basis_state_preps(qubits).iter().enumerate() {
        let observed: Vec<usize> = run(program, num_samples)?
            .into_iter()
            .map(|i| outcome_index(i, qubits))
            .collect();
        let histogram = make_histogram(&observed, dim);
        counts.row_mut(prepared).assign(&Array1::from(histogram));
    }
    Ok(counts)
}

// ============================================================================
// Tests
// ============================================================================
