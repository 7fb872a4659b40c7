//! Dense complex operators
//!
//! Gantree: L2_Operator → OperatorOps
//!
//! Operators are `d × d` complex matrices. Vectorization is column
//! stacking: `vec(ρ)[i + j·d] = ρ[i, j]`, so that
//! `vec(A ρ B) = (Bᵀ ⊗ A) vec(ρ)`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use qtomo_core::{tolerance, TomoError, TomoResult};

/// Dense complex operator (d × d)
pub type Operator = Array2<Complex64>;

/// Complex zero
pub const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex one
pub const C_ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Imaginary unit
pub const C_I: Complex64 = Complex64::new(0.0, 1.0);

// ============================================================================
// Construction
// ============================================================================

/// Identity operator of dimension `d`
pub fn identity(d: usize) -> Operator {
    Array2::eye(d)
}

/// Build an operator from row-major complex entries
pub fn from_rows(rows: &[&[Complex64]]) -> TomoResult<Operator> {
    let n = rows.len();
    let mut op = Array2::zeros((n, n));
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(TomoError::NotSquare {
                rows: n,
                cols: row.len(),
            });
        }
        for (j, &z) in row.iter().enumerate() {
            op[[i, j]] = z;
        }
    }
    Ok(op)
}

/// Lift a real matrix to a complex one
pub fn from_real(m: &Array2<f64>) -> Operator {
    m.mapv(|x| Complex64::new(x, 0.0))
}

/// Multiply every entry by a real factor
pub fn scale(op: &Operator, factor: f64) -> Operator {
    op.mapv(|z| z * factor)
}

// ============================================================================
// Algebra
// ============================================================================

/// Kronecker (tensor) product `a ⊗ b`
/// Gantree: tensor(a, b) -> Operator // 텐서곱
pub fn tensor(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// Tensor product of a sequence, left to right
pub fn tensor_all<'a>(ops: impl IntoIterator<Item = &'a Operator>) -> TomoResult<Operator> {
    let mut iter = ops.into_iter();
    let first = iter.next().ok_or(TomoError::EmptyBasis)?.clone();
    Ok(iter.fold(first, |acc, op| tensor(&acc, op)))
}

/// Conjugate transpose
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Trace
pub fn trace(m: &Array2<Complex64>) -> Complex64 {
    m.diag().iter().sum()
}

/// Hilbert-Schmidt inner product `tr(a† b)`
pub fn hs_inner(a: &Operator, b: &Operator) -> Complex64 {
    a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum()
}

/// Frobenius norm `sqrt(Σ |m_ij|²)`
pub fn frobenius_norm(m: &Array2<Complex64>) -> f64 {
    m.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Frobenius distance between two operators of equal shape
pub fn frobenius_distance(a: &Operator, b: &Operator) -> f64 {
    frobenius_norm(&(a - b))
}

// ============================================================================
// Predicates
// ============================================================================

/// Check `m` is square and return its dimension
pub fn square_dim(m: &Array2<Complex64>) -> TomoResult<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(TomoError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// `m == m†` within tolerance
/// Gantree: is_hermitian(m) -> bool // 에르미트 판별
pub fn is_hermitian(m: &Array2<Complex64>) -> bool {
    square_dim(m).is_ok() && frobenius_distance(m, &dagger(m)) < tolerance::EPS
}

/// Hermitian and idempotent (`m·m == m`)
pub fn is_projector(m: &Array2<Complex64>) -> bool {
    is_hermitian(m) && frobenius_distance(&m.dot(m), m) < tolerance::EPS
}

// ============================================================================
// Representations
// ============================================================================

/// Real embedding `[[Re Z, -Im Z], [Im Z, Re Z]]`
pub fn to_realimag(z: &Array2<Complex64>) -> Array2<f64> {
    let (r, c) = z.dim();
    Array2::from_shape_fn((2 * r, 2 * c), |(i, j)| {
        let entry = z[[i % r, j % c]];
        match (i < r, j < c) {
            (true, true) | (false, false) => entry.re,
            (true, false) => -entry.im,
            (false, true) => entry.im,
        }
    })
}

/// Column-stacking vectorization
pub fn vec_op(m: &Operator) -> Array1<Complex64> {
    let (r, c) = m.dim();
    Array1::from_shape_fn(r * c, |k| m[[k % r, k / r]])
}

/// Inverse of [`vec_op`] for a `d × d` operator
pub fn unvec_op(v: &Array1<Complex64>) -> TomoResult<Operator> {
    let d = (v.len() as f64).sqrt().round() as usize;
    if d * d != v.len() {
        return Err(TomoError::DimensionMismatch {
            expected: d * d,
            actual: v.len(),
        });
    }
    Ok(Array2::from_shape_fn((d, d), |(i, j)| v[i + j * d]))
}

/// Outer product `|ψ⟩⟨ψ|`
pub fn to_density_matrix(psi: &Array1<Complex64>) -> Operator {
    let d = psi.len();
    Array2::from_shape_fn((d, d), |(i, j)| psi[i] * psi[j].conj())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sigma_x() -> Operator {
        from_rows(&[&[C_ZERO, C_ONE], &[C_ONE, C_ZERO]]).unwrap()
    }

    fn sigma_y() -> Operator {
        from_rows(&[&[C_ZERO, -C_I], &[C_I, C_ZERO]]).unwrap()
    }

    #[test]
    fn test_tensor_shape_and_entries() {
        let x = sigma_x();
        let id = identity(2);
        let xi = tensor(&x, &id);
        assert_eq!(xi.dim(), (4, 4));
        // X ⊗ I swaps the high bit
        assert_eq!(xi[[0, 2]], C_ONE);
        assert_eq!(xi[[1, 3]], C_ONE);
        assert_eq!(xi[[0, 1]], C_ZERO);
    }

    #[test]
    fn test_tensor_all_matches_pairwise() {
        let x = sigma_x();
        let y = sigma_y();
        let chained = tensor_all([&x, &y, &x]).unwrap();
        let manual = tensor(&tensor(&x, &y), &x);
        assert!(frobenius_distance(&chained, &manual) < 1e-12);
        assert!(tensor_all(std::iter::empty()).is_err());
    }

    #[test]
    fn test_trace_and_norm() {
        let id = identity(4);
        assert_relative_eq!(trace(&id).re, 4.0);
        assert_relative_eq!(frobenius_norm(&id), 2.0);
    }

    #[test]
    fn test_hermitian_and_projector() {
        assert!(is_hermitian(&sigma_y()));
        assert!(!is_projector(&sigma_x()));
        let p0 = from_rows(&[&[C_ONE, C_ZERO], &[C_ZERO, C_ZERO]]).unwrap();
        assert!(is_projector(&p0));
        let not_herm = from_rows(&[&[C_ZERO, C_ONE], &[C_ZERO, C_ZERO]]).unwrap();
        assert!(!is_hermitian(&not_herm));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = from_rows(&[&[C_ONE, C_ZERO], &[C_ONE]]).unwrap_err();
        assert!(matches!(err, TomoError::NotSquare { .. }));
    }

    #[test]
    fn test_to_realimag() {
        let y = sigma_y();
        let r = to_realimag(&y);
        assert_eq!(r.dim(), (4, 4));
        // Im(Y)[0,1] = -1 sits in the lower-left block
        assert_relative_eq!(r[[2, 1]], -1.0);
        // -Im(Y)[0,1] sits in the upper-right block
        assert_relative_eq!(r[[0, 3]], 1.0);
        assert_relative_eq!(r[[0, 0]], 0.0);
    }

    #[test]
    fn test_vec_is_column_stacking() {
        let m = from_rows(&[
            &[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
            &[Complex64::new(3.0, 0.0), Complex64::new(4.0, 0.0)],
        ])
        .unwrap();
        let v = vec_op(&m);
        let re: Vec<f64> = v.iter().map(|z| z.re).collect();
        assert_eq!(re, vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(unvec_op(&v).unwrap(), m);
    }

    #[test]
    fn test_hs_inner_matches_trace() {
        let x = sigma_x();
        let y = sigma_y();
        let direct = trace(&dagger(&x).dot(&y));
        let fast = hs_inner(&x, &y);
        assert_relative_eq!((direct - fast).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(hs_inner(&x, &x).re, 2.0);
    }

    #[test]
    fn test_density_matrix() {
        let psi = Array1::from(vec![C_ZERO, C_ONE]);
        let rho = to_density_matrix(&psi);
        assert!(is_projector(&rho));
        assert_eq!(rho[[1, 1]], C_ONE);
    }
}
