//! # QTOMO Core
//!
//! Core types, errors, gates and programs for the QTOMO tomography toolkit.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qtomo_core // L0+L1: Foundation + Program (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 허용오차/샘플링 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Program // 프로그램 구조 (완료)
//!         Gate // 게이트 enum (완료)
//!         Program // 명령 목록 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qtomo_core::prelude::*;
//!
//! let mut program = Program::new();
//! program.inst(Gate::X(0)).inst(Gate::I(1));
//!
//! assert_eq!(program.out(), "X 0\nI 1\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Quantum gates (Gantree: L1_Program → Gate)
pub mod gate;

/// Gate programs (Gantree: L1_Program → Program)
pub mod program;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{sampling, tolerance};
pub use error::{TomoError, TomoResult};
pub use gate::Gate;
pub use program::Program;
pub use types::{Angle, Bitstring, Histogram, ProbabilityVector, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qtomo_core::prelude::*;
    //! ```

    pub use crate::constants::{sampling, tolerance};
    pub use crate::error::{TomoError, TomoResult};
    pub use crate::gate::Gate;
    pub use crate::program::Program;
    pub use crate::types::{Angle, Bitstring, Histogram, ProbabilityVector, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
