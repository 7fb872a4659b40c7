//! Operator bases
//!
//! Gantree: L2_Operator → OperatorBasis
//!
//! A labelled, ordered collection of operators on a common Hilbert space,
//! used to express states, measurements and processes as coefficient
//! vectors and transfer matrices.

use crate::operator::{self, dagger, hs_inner, tensor, vec_op, Operator};
use crate::superop::{sprepost, Superoperator};
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use qtomo_core::{tolerance, TomoError, TomoResult};
use std::fmt;

/// Labelled operator basis
/// Gantree: OperatorBasis // 연산자 기저
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorBasis {
    /// Element labels, in order
    labels: Vec<String>,

    /// Element operators, all `d × d`
    ops: Vec<Operator>,
}

impl OperatorBasis {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from `(label, operator)` pairs
    /// Gantree: new(pairs) -> Result<Self> // 생성+검증
    pub fn new<L: Into<String>>(labels_ops: Vec<(L, Operator)>) -> TomoResult<Self> {
        if labels_ops.is_empty() {
            return Err(TomoError::EmptyBasis);
        }
        let (labels, ops): (Vec<String>, Vec<Operator>) = labels_ops
            .into_iter()
            .map(|(label, op)| (label.into(), op))
            .unzip();

        let d = operator::square_dim(&ops[0])?;
        for op in &ops[1..] {
            let di = operator::square_dim(op)?;
            if di != d {
                return Err(TomoError::DimensionMismatch {
                    expected: d,
                    actual: di,
                });
            }
        }
        Ok(Self { labels, ops })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of basis elements
    pub fn dim(&self) -> usize {
        self.ops.len()
    }

    /// Hilbert space dimension the operators act on
    pub fn op_dim(&self) -> usize {
        self.ops[0].nrows()
    }

    /// Element labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Element operators
    pub fn ops(&self) -> &[Operator] {
        &self.ops
    }

    /// Iterate over `(label, operator)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operator)> {
        self.labels.iter().map(String::as_str).zip(self.ops.iter())
    }

    /// Look up an element by label
    pub fn get(&self, label: &str) -> TomoResult<&Operator> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| &self.ops[i])
            .ok_or_else(|| TomoError::LabelNotFound(label.to_string()))
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Tensor product basis. Labels are concatenated; `self` varies slowest.
    /// Gantree: product(&self, &other) -> Self // 텐서곱 기저
    pub fn product(&self, other: &OperatorBasis) -> OperatorBasis {
        let mut labels = Vec::with_capacity(self.dim() * other.dim());
        let mut ops = Vec::with_capacity(self.dim() * other.dim());
        for (l1, op1) in self.iter() {
            for (l2, op2) in other.iter() {
                labels.push(format!("{l1}{l2}"));
                ops.push(tensor(op1, op2));
            }
        }
        Self { labels, ops }
    }

    /// `n`-fold tensor power
    pub fn pow(&self, n: usize) -> TomoResult<OperatorBasis> {
        if n == 0 {
            return Err(TomoError::InvalidConfig(
                "operator basis power must be >= 1".to_string(),
            ));
        }
        Ok((1..n).fold(self.clone(), |acc, _| acc.product(self)))
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Gram matrix `G[i][j] = tr(B_i† B_j)`
    pub fn metric(&self) -> Array2<Complex64> {
        let n = self.dim();
        Array2::from_shape_fn((n, n), |(i, j)| hs_inner(&self.ops[i], &self.ops[j]))
    }

    /// Metric equals the identity within tolerance
    pub fn is_orthonormal(&self) -> bool {
        let g = self.metric();
        let id: Array2<Complex64> = Array2::eye(self.dim());
        operator::frobenius_distance(&g, &id) < tolerance::EPS
    }

    /// Every element is Hermitian
    pub fn all_hermitian(&self) -> bool {
        self.ops.iter().all(operator::is_hermitian)
    }

    /// Coefficients `tr(B_i† op)` of an operator
    pub fn project_op(&self, op: &Operator) -> TomoResult<Array1<Complex64>> {
        self.check_op_dim(op)?;
        Ok(self.ops.iter().map(|b| hs_inner(b, op)).collect())
    }

    /// Matrix whose columns are the vectorized basis elements (`d² × n`)
    pub fn basis_transform(&self) -> Array2<Complex64> {
        let d2 = self.op_dim() * self.op_dim();
        let mut t = Array2::zeros((d2, self.dim()));
        for (k, op) in self.ops.iter().enumerate() {
            t.column_mut(k).assign(&vec_op(op));
        }
        t
    }

    // ========================================================================
    // Superoperators
    // ========================================================================

    /// Transfer matrix `R[i][j] = tr(B_i† S(B_j))`, i.e. `T† S T`
    /// Gantree: transfer_matrix(&self, S) -> Array2 // 전달 행렬
    pub fn transfer_matrix(&self, superop: &Superoperator) -> TomoResult<Array2<Complex64>> {
        self.check_superop_dim(superop)?;
        let t = self.basis_transform();
        Ok(dagger(&t).dot(superop).dot(&t))
    }

    /// Superoperator `T R T†` from a transfer matrix
    pub fn super_from_tm(&self, tm: &Array2<Complex64>) -> TomoResult<Superoperator> {
        if !self.is_orthonormal() {
            return Err(TomoError::NotOrthonormal);
        }
        if tm.dim() != (self.dim(), self.dim()) {
            return Err(TomoError::DimensionMismatch {
                expected: self.dim(),
                actual: tm.nrows(),
            });
        }
        let t = self.basis_transform();
        Ok(t.dot(tm).dot(&dagger(&t)))
    }

    /// Superoperator basis `ρ ↦ B_j ρ B_k†`, labelled `"(j,k)"`
    pub fn super_basis(&self) -> OperatorBasis {
        let mut labels = Vec::with_capacity(self.dim() * self.dim());
        let mut ops = Vec::with_capacity(self.dim() * self.dim());
        for (lj, opj) in self.iter() {
            for (lk, opk) in self.iter() {
                labels.push(format!("({lj},{lk})"));
                ops.push(sprepost(opj, &dagger(opk)));
            }
        }
        Self { labels, ops }
    }

    // ========================================================================
    // Validation Helpers
    // ========================================================================

    fn check_op_dim(&self, op: &Operator) -> TomoResult<()> {
        let d = operator::square_dim(op)?;
        if d != self.op_dim() {
            return Err(TomoError::DimensionMismatch {
                expected: self.op_dim(),
                actual: d,
            });
        }
        Ok(())
    }

    fn check_superop_dim(&self, superop: &Superoperator) -> TomoResult<()> {
        let d = operator::square_dim(superop)?;
        let d2 = self.op_dim() * self.op_dim();
        if d != d2 {
            return Err(TomoError::DimensionMismatch {
                expected: d2,
                actual: d,
            });
        }
        Ok(())
    }
}

impl fmt::Display for OperatorBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<span[{}]>", self.labels.join(","))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{pauli_basis, qx, qy, qz};
    use crate::superop::to_super;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_empty() {
        let empty: Vec<(String, Operator)> = Vec::new();
        assert_eq!(OperatorBasis::new(empty), Err(TomoError::EmptyBasis));
    }

    #[test]
    fn test_new_rejects_mixed_dims() {
        let err = OperatorBasis::new(vec![
            ("a", operator::identity(2)),
            ("b", operator::identity(4)),
        ])
        .unwrap_err();
        assert!(matches!(err, TomoError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_pauli_basis_is_orthonormal() {
        let basis = pauli_basis();
        assert_eq!(basis.dim(), 4);
        assert!(basis.is_orthonormal());
        assert!(basis.all_hermitian());
    }

    #[test]
    fn test_get_by_label() {
        let basis = pauli_basis();
        let x = basis.get("X").unwrap();
        assert!(operator::frobenius_distance(x, &operator::scale(&qx(), 0.5f64.sqrt())) < 1e-12);
        assert!(matches!(basis.get("Q"), Err(TomoError::LabelNotFound(_))));
    }

    #[test]
    fn test_product_labels_order() {
        let basis = pauli_basis();
        let two = basis.product(&basis);
        assert_eq!(two.dim(), 16);
        assert_eq!(two.labels()[0], "II");
        assert_eq!(two.labels()[1], "IX");
        assert_eq!(two.labels()[4], "XI");
        assert_eq!(two.labels()[15], "ZZ");
        assert!(two.is_orthonormal());
    }

    #[test]
    fn test_pow() {
        let basis = pauli_basis();
        assert_eq!(basis.pow(1).unwrap(), basis);
        assert_eq!(basis.pow(3).unwrap().dim(), 64);
        assert!(basis.pow(0).is_err());
    }

    #[test]
    fn test_project_op_recovers_coefficients() {
        let basis = pauli_basis();
        // Z = sqrt(2) * (Z/sqrt(2))
        let coeffs = basis.project_op(&qz()).unwrap();
        assert_relative_eq!(coeffs[3].re, 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(coeffs[0].norm(), 0.0, epsilon = 1e-12);
        assert!(basis.project_op(&operator::identity(4)).is_err());
    }

    #[test]
    fn test_transfer_matrix_of_x() {
        let basis = pauli_basis();
        let ptm = basis.transfer_matrix(&to_super(&qx())).unwrap();
        let expected = [1.0, 1.0, -1.0, -1.0];
        for i in 0..4 {
            for j in 0..4 {
                let want = if i == j { expected[i] } else { 0.0 };
                assert_relative_eq!(ptm[[i, j]].re, want, epsilon = 1e-12);
                assert_relative_eq!(ptm[[i, j]].im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_super_from_tm_roundtrip() {
        let basis = pauli_basis();
        let s = to_super(&qy());
        let tm = basis.transfer_matrix(&s).unwrap();
        let back = basis.super_from_tm(&tm).unwrap();
        assert!(operator::frobenius_distance(&back, &s) < 1e-10);
    }

    #[test]
    fn test_super_basis() {
        let basis = pauli_basis();
        let sb = basis.super_basis();
        assert_eq!(sb.dim(), 16);
        assert_eq!(sb.labels()[1], "(I,X)");
        assert_eq!(sb.op_dim(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(pauli_basis().to_string(), "<span[I,X,Y,Z]>");
    }
}
