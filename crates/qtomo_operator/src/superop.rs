//! Superoperators
//!
//! Gantree: L2_Operator → Superoperator
//!
//! Linear maps on operators, as `d² × d²` matrices acting on
//! column-stacked operators.

use crate::basis::OperatorBasis;
use crate::operator::{self, dagger, tensor, unvec_op, vec_op, Operator};
use ndarray::Array2;
use num_complex::Complex64;
use qtomo_core::{TomoError, TomoResult};

/// Superoperator matrix (d² × d²)
pub type Superoperator = Array2<Complex64>;

/// `ρ ↦ A ρ`
pub fn spre(a: &Operator) -> Superoperator {
    tensor(&operator::identity(a.nrows()), a)
}

/// `ρ ↦ ρ B`
pub fn spost(b: &Operator) -> Superoperator {
    tensor(&b.t().to_owned(), &operator::identity(b.nrows()))
}

/// `ρ ↦ A ρ B`, i.e. `Bᵀ ⊗ A`
/// Gantree: sprepost(A, B) -> Superoperator // 좌우곱
pub fn sprepost(a: &Operator, b: &Operator) -> Superoperator {
    tensor(&b.t().to_owned(), a)
}

/// Unitary channel `ρ ↦ U ρ U†`
/// Gantree: to_super(U) -> Superoperator // 유니터리 채널
pub fn to_super(u: &Operator) -> Superoperator {
    sprepost(u, &dagger(u))
}

/// Apply a superoperator to an operator
pub fn apply(superop: &Superoperator, rho: &Operator) -> TomoResult<Operator> {
    let v = vec_op(rho);
    if superop.ncols() != v.len() {
        return Err(TomoError::DimensionMismatch {
            expected: superop.ncols(),
            actual: v.len(),
        });
    }
    unvec_op(&superop.dot(&v))
}

/// Choi matrix `J = Σ_ab |a⟩⟨b| ⊗ S(|a⟩⟨b|)` of a superoperator
pub fn super_to_choi(superop: &Superoperator) -> TomoResult<Operator> {
    let d2 = operator::square_dim(superop)?;
    let d = (d2 as f64).sqrt().round() as usize;
    if d * d != d2 {
        return Err(TomoError::DimensionMismatch {
            expected: d * d,
            actual: d2,
        });
    }
    let mut choi = Array2::zeros((d2, d2));
    for a in 0..d {
        for b in 0..d {
            let mut unit = Array2::zeros((d, d));
            unit[[a, b]] = operator::C_ONE;
            let image = apply(superop, &unit)?;
            choi = choi + tensor(&unit, &image);
        }
    }
    Ok(choi)
}

/// Choi matrix from a transfer matrix in an orthonormal basis:
/// `J = Σ_jk R[j][k] · conj(B_k) ⊗ B_j`
/// Gantree: choi_matrix(R, basis) -> Operator // 초이 행렬
pub fn choi_matrix(ptm: &Array2<Complex64>, basis: &OperatorBasis) -> TomoResult<Operator> {
    if !basis.is_orthonormal() {
        return Err(TomoError::NotOrthonormal);
    }
    let n = basis.dim();
    if ptm.dim() != (n, n) {
        return Err(TomoError::DimensionMismatch {
            expected: n,
            actual: ptm.nrows(),
        });
    }
    let d2 = basis.op_dim() * basis.op_dim();
    let mut choi = Array2::zeros((d2, d2));
    for (j, bj) in basis.ops().iter().enumerate() {
        for (k, bk) in basis.ops().iter().enumerate() {
            let r = ptm[[j, k]];
            if r.norm() == 0.0 {
                continue;
            }
            choi = choi + tensor(&bk.mapv(|z| z.conj()), bj).mapv(|z| z * r);
        }
    }
    Ok(choi)
}

// ============================================================================
// Tests
// ============================================================================
