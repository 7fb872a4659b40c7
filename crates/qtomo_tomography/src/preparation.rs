//! Basis-state preparation
//!
//! Gantree: L5_Tomography → Preparation
//!
//! Programs preparing every computational basis state of a qubit set, and
//! the matching outcome labels.

use qtomo_core::{Bitstring, Gate, Program, QubitId};

/// All length-`n` bitstrings in lexicographic order
/// Gantree: basis_labels(n) -> Vec<String> // 기저 라벨
pub fn basis_labels(n: usize) -> Vec<String> {
    Bitstring::all(n).map(|b| b.to_string()).collect()
}

/// One program per basis state of `qubits`, applying `I` or `X` to each.
///
/// Programs follow the label order of [`basis_labels`], the first listed
/// qubit varying slowest.
/// Gantree: basis_state_preps(qubits) -> Vec<Program> // 기저 상태 준비
pub fn basis_state_preps(qubits: &[QubitId]) -> Vec<Program> {
    Bitstring::all(qubits.len())
        .map(|bits| {
            bits.iter()
                .zip(qubits)
                .map(|(flip, &q)| if flip { Gate::X(q) } else { Gate::I(q) })
                .collect::<Program>()
        })
        .collect()
}

/// Outcome index over `qubits` (first listed most significant) for a
/// wavefunction index where bit `q` holds qubit `q`
pub fn outcome_index(wavefunction_index: usize, qubits: &[QubitId]) -> usize {
    qubits
        .iter()
        .fold(0, |acc, &q| (acc << 1) | ((wavefunction_index >> q) & 1))
}

// ============================================================================
// Tests
// ============================================================================
