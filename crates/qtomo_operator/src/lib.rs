//! # QTOMO Operator
//!
//! Dense operators, operator bases, superoperators and diagonal POVMs.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qtomo_operator // L2+L3: Operator + Measurement (완료)
//!     L2_Operator // 연산자 대수 (완료)
//!         OperatorOps // 텐서곱/대거/트레이스 (완료)
//!         OperatorBasis // 라벨 기저 (완료)
//!         Superoperator // 초연산자 (완료)
//!         States // 파울리/바닥 상태 (완료)
//!     L3_Measurement // 측정 (완료)
//!         DiagonalPovm // 대각 POVM (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qtomo_operator::prelude::*;
//!
//! let two_qubit = pauli_basis().product(&pauli_basis());
//! assert_eq!(two_qubit.dim(), 16);
//! assert_eq!(two_qubit.labels()[5], "XX");
//!
//! let ptm = pauli_basis().transfer_matrix(&to_super(&qx())).unwrap();
//! assert!((ptm[[3, 3]].re + 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Operator algebra (Gantree: L2_Operator → OperatorOps)
pub mod operator;

/// Operator bases (Gantree: L2_Operator → OperatorBasis)
pub mod basis;

/// Superoperators (Gantree: L2_Operator → Superoperator)
pub mod superop;

/// Standard operators and bases (Gantree: L2_Operator → States)
pub mod states;

/// Diagonal POVMs (Gantree: L3_Measurement → DiagonalPovm)
pub mod povm;

// ============================================================================
// Re-exports
// ============================================================================

pub use basis::OperatorBasis;
pub use operator::Operator;
pub use povm::{make_diagonal_povm, DiagonalPovm};
pub use superop::Superoperator;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qtomo_operator::prelude::*;
    //! ```

    pub use crate::basis::OperatorBasis;
    pub use crate::operator::{
        dagger, frobenius_distance, frobenius_norm, is_hermitian, is_projector, tensor,
        to_density_matrix, trace, Operator,
    };
    pub use crate::povm::{make_diagonal_povm, DiagonalPovm};
    pub use crate::states::{
        excited_state, generated_states, ground_state, n_qubit_ground_state,
        n_qubit_pauli_basis, n_qubit_pi_basis, pauli_basis, povm_pi_basis, qi, qx, qy, qz,
    };
    pub use crate::superop::{choi_matrix, sprepost, to_super, Superoperator};
}

// ============================================================================
// Integration Tests
// ============================================================================
