//! Standard operators, states and bases
//!
//! Gantree: L2_Operator → States
//!
//! Pauli matrices, computational-basis projectors and the bases built from
//! them.

use crate::basis::OperatorBasis;
use crate::operator::{self, dagger, Operator, C_I, C_ONE, C_ZERO};
use ndarray::{array, Array2};
use qtomo_core::TomoResult;
use std::f64::consts::FRAC_1_SQRT_2;

// ============================================================================
// Single-Qubit Operators
// ============================================================================

/// Identity
pub fn qi() -> Operator {
    operator::identity(2)
}

/// Pauli X
pub fn qx() -> Operator {
    array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]]
}

/// Pauli Y
pub fn qy() -> Operator {
    array![[C_ZERO, -C_I], [C_I, C_ZERO]]
}

/// Pauli Z
pub fn qz() -> Operator {
    array![[C_ONE, C_ZERO], [C_ZERO, -C_ONE]]
}

/// Ground state `|0⟩⟨0|`
/// Gantree: GS // 바닥 상태
pub fn ground_state() -> Operator {
    array![[C_ONE, C_ZERO], [C_ZERO, C_ZERO]]
}

/// Excited state `|1⟩⟨1|`
/// Gantree: ES // 들뜬 상태
pub fn excited_state() -> Operator {
    array![[C_ZERO, C_ZERO], [C_ZERO, C_ONE]]
}

// ============================================================================
// Bases
// ============================================================================

/// Normalized single-qubit Pauli basis `{I, X, Y, Z} / √2`
/// Gantree: PAULI_BASIS // 파울리 기저
pub fn pauli_basis() -> OperatorBasis {
    let ops = vec![("I", qi()), ("X", qx()), ("Y", qy()), ("Z", qz())];
    OperatorBasis::new(
        ops.into_iter()
            .map(|(l, op)| (l, operator::scale(&op, FRAC_1_SQRT_2)))
            .collect(),
    )
    .expect("single-qubit Pauli operators share dimension 2")
}

/// Computational-basis projectors `{"0": |0⟩⟨0|, "1": |1⟩⟨1|}`
/// Gantree: POVM_PI_BASIS // 투영 기저
pub fn povm_pi_basis() -> OperatorBasis {
    OperatorBasis::new(vec![("0", ground_state()), ("1", excited_state())])
        .expect("projectors share dimension 2")
}

/// Pauli basis on `n` qubits, `4^n` elements labelled `"IX…"`
pub fn n_qubit_pauli_basis(n: usize) -> TomoResult<OperatorBasis> {
    pauli_basis().pow(n)
}

/// Projector basis on `n` qubits, `2^n` elements labelled by bitstring
pub fn n_qubit_pi_basis(n: usize) -> TomoResult<OperatorBasis> {
    povm_pi_basis().pow(n)
}

// ============================================================================
// State Builders
// ============================================================================

/// `|0…0⟩⟨0…0|` on `n` qubits
pub fn n_qubit_ground_state(n: usize) -> TomoResult<Operator> {
    let gs = ground_state();
    operator::tensor_all(std::iter::repeat(&gs).take(n))
}

/// States `U ρ U†` for each preparation `U`
/// Gantree: generated_states(ρ, preps) -> Vec<Operator> // 준비 상태
pub fn generated_states(initial_state: &Operator, preparations: &[Operator]) -> Vec<Operator> {
    preparations
        .iter()
        .map(|u| u.dot(initial_state).dot(&dagger(u)))
        .collect()
}

/// Real parts of a complex matrix, e.g. a Pauli transfer matrix for plotting
pub fn real_part(m: &Array2<num_complex::Complex64>) -> Array2<f64> {
    m.mapv(|z| z.re)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{frobenius_distance, is_hermitian, tensor};
    use qtomo_core::tolerance::EPS;

    #[test]
    fn test_paulis_are_hermitian() {
        for op in [qi(), qx(), qy(), qz()] {
            assert!(is_hermitian(&op));
        }
    }

    #[test]
    fn test_pauli_algebra() {
        // XY = iZ
        let xy = qx().dot(&qy());
        let iz = qz().mapv(|z| z * C_I);
        assert!(frobenius_distance(&xy, &iz) < EPS);
    }

    #[test]
    fn test_generated_states() {
        let states = generated_states(&ground_state(), &[qx(), qy(), qz()]);
        assert!(frobenius_distance(&states[0], &excited_state()) < EPS);
        assert!(frobenius_distance(&states[1], &excited_state()) < EPS);
        assert!(frobenius_distance(&states[2], &ground_state()) < EPS);
    }

    #[test]
    fn test_n_qubit_ground_state() {
        let gs2 = n_qubit_ground_state(2).unwrap();
        let expected = tensor(&ground_state(), &ground_state());
        assert!(frobenius_distance(&gs2, &expected) < EPS);
        assert!(n_qubit_ground_state(0).is_err());
    }

    #[test]
    fn test_pi_basis_labels() {
        let basis = n_qubit_pi_basis(2).unwrap();
        assert_eq!(basis.labels(), &["00", "01", "10", "11"]);
        assert!(basis.ops().iter().all(operator::is_projector));
    }

    #[test]
    fn test_n_qubit_pauli_basis_size() {
        assert_eq!(n_qubit_pauli_basis(1).unwrap().dim(), 4);
        assert_eq!(n_qubit_pauli_basis(2).unwrap().dim(), 16);
    }
}
