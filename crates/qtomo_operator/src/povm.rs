//! Diagonal POVMs
//!
//! Gantree: L3_Measurement → DiagonalPovm
//!
//! Readout modelled as a confusion-rate matrix acting on ideal projectors.
//! `C[k][j]` is the probability of reporting outcome `k` when the ideal
//! projective measurement yields `j`, so every column of `C` sums to 1.

use crate::basis::OperatorBasis;
use crate::operator::{self, Operator};
use ndarray::{Array2, Axis};
use qtomo_core::{tolerance, TomoError, TomoResult};

/// POVM whose elements are diagonal in the projector basis
/// Gantree: DiagonalPovm // 대각 POVM
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalPovm {
    /// Ideal projectors `π_j`
    pi_basis: OperatorBasis,

    /// Confusion-rate matrix `C`
    confusion_rate_matrix: Array2<f64>,

    /// Effects `E_k = Σ_j C[k][j] π_j`
    ops: Vec<Operator>,
}

impl DiagonalPovm {
    /// Projector basis the POVM was built from
    pub fn pi_basis(&self) -> &OperatorBasis {
        &self.pi_basis
    }

    /// Confusion-rate matrix
    pub fn confusion_rate_matrix(&self) -> &Array2<f64> {
        &self.confusion_rate_matrix
    }

    /// POVM effects, one per outcome
    pub fn ops(&self) -> &[Operator] {
        &self.ops
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Outcome probabilities `tr(E_k ρ)`
    pub fn probabilities(&self, rho: &Operator) -> TomoResult<Vec<f64>> {
        let d = operator::square_dim(rho)?;
        if d != self.pi_basis.op_dim() {
            return Err(TomoError::DimensionMismatch {
                expected: self.pi_basis.op_dim(),
                actual: d,
            });
        }
        Ok(self
            .ops
            .iter()
            .map(|e| operator::trace(&e.dot(rho)).re)
            .collect())
    }

    /// Effects sum to the identity
    pub fn is_complete(&self) -> bool {
        let d = self.pi_basis.op_dim();
        let total = self
            .ops
            .iter()
            .fold(Array2::zeros((d, d)), |acc: Operator, e| acc + e);
        operator::frobenius_distance(&total, &operator::identity(d)) < tolerance::EPS
    }
}

/// Build a diagonal POVM from projectors and a confusion-rate matrix.
///
/// Columns are checked for normalization first, then entries for range;
/// the two failures are reported independently.
/// Gantree: make_diagonal_povm(π, C) -> Result<DiagonalPovm> // POVM 생성
pub fn make_diagonal_povm(
    pi_basis: &OperatorBasis,
    confusion_rate_matrix: &Array2<f64>,
) -> TomoResult<DiagonalPovm> {
    let (rows, cols) = confusion_rate_matrix.dim();
    if rows != cols {
        return Err(TomoError::NotSquare { rows, cols });
    }
    if cols != pi_basis.dim() {
        return Err(TomoError::DimensionMismatch {
            expected: pi_basis.dim(),
            actual: cols,
        });
    }

    validate_confusion_rate_matrix(confusion_rate_matrix)?;

    let d = pi_basis.op_dim();
    let ops = confusion_rate_matrix
        .rows()
        .into_iter()
        .map(|pjs| {
            pi_basis
                .ops()
                .iter()
                .zip(pjs.iter())
                .fold(Array2::zeros((d, d)), |acc: Operator, (pi_j, &pjk)| {
                    acc + operator::scale(pi_j, pjk)
                })
        })
        .collect();

    Ok(DiagonalPovm {
        pi_basis: pi_basis.clone(),
        confusion_rate_matrix: confusion_rate_matrix.clone(),
        ops,
    })
}

/// Columns sum to 1, then entries lie in [0, 1]
pub fn validate_confusion_rate_matrix(crm: &Array2<f64>) -> TomoResult<()> {
    for (column, sum) in crm.sum_axis(Axis(0)).iter().enumerate() {
        if !tolerance::allclose(*sum, 1.0) {
            log::debug!("confusion-rate column {column} sums to {sum}");
            return Err(TomoError::CrmUnnormalized { column, sum: *sum });
        }
    }
    for ((row, col), &value) in crm.indexed_iter() {
        if !(0.0..=1.0).contains(&value) {
            log::debug!("confusion-rate entry ({row}, {col}) = {value}");
            return Err(TomoError::CrmValue { row, col, value });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::frobenius_distance;
    use crate::states::{ground_state, n_qubit_pi_basis, povm_pi_basis};
    use approx::assert_relative_eq;
    use ndarray::array;
    use qtomo_core::tolerance::EPS;

    #[test]
    fn test_identity_crm_reproduces_projectors() {
        let pi_basis = povm_pi_basis();
        let povm = make_diagonal_povm(&pi_basis, &Array2::eye(2)).unwrap();
        assert!(frobenius_distance(&povm.ops()[0], &pi_basis.ops()[0]) < EPS);
        assert!(frobenius_distance(&povm.ops()[1], &pi_basis.ops()[1]) < EPS);
    }

    #[test]
    fn test_unnormalized_crm() {
        let crm = array![[0.8, 0.0], [0.3, 1.0]];
        let err = make_diagonal_povm(&povm_pi_basis(), &crm).unwrap_err();
        assert!(matches!(err, TomoError::CrmUnnormalized { column: 0, .. }));
    }

    #[test]
    fn test_out_of_range_crm() {
        // Columns sum to 1, entries do not lie in [0, 1]
        let crm = array![[0.8, -0.1], [0.2, 1.1]];
        let err = make_diagonal_povm(&povm_pi_basis(), &crm).unwrap_err();
        assert!(matches!(err, TomoError::CrmValue { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_shape_mismatch() {
        let crm: Array2<f64> = Array2::eye(3);
        let err = make_diagonal_povm(&povm_pi_basis(), &crm).unwrap_err();
        assert!(matches!(err, TomoError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_noisy_povm_probabilities() {
        let crm = array![[0.9, 0.2], [0.1, 0.8]];
        let povm = make_diagonal_povm(&povm_pi_basis(), &crm).unwrap();
        assert!(povm.is_complete());

        let probs = povm.probabilities(&ground_state()).unwrap();
        assert_relative_eq!(probs[0], 0.9, epsilon = 1e-12);
        assert_relative_eq!(probs[1], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_two_qubit_povm_is_complete() {
        let basis = n_qubit_pi_basis(2).unwrap();
        let single = array![[0.95, 0.1], [0.05, 0.9]];
        let crm = Array2::from_shape_fn((4, 4), |(k, j)| {
            single[[k >> 1, j >> 1]] * single[[k & 1, j & 1]]
        });
        let povm = make_diagonal_povm(&basis, &crm).unwrap();
        assert_eq!(povm.len(), 4);
        assert!(povm.is_complete());
    }
}
