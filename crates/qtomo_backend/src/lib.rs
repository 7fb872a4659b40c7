//! # QTOMO Backend
//!
//! Wavefunction connection abstraction and an ideal simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qtomo_backend // L4: Backend (완료)
//!     L4_Backend // 연결 계층 (완료)
//!         ConnectionTrait // 파동함수 질의 인터페이스 (완료)
//!         StateVectorSimulator // 이상적 시뮬레이터 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qtomo_backend::prelude::*;
//! use qtomo_core::{Gate, Program};
//!
//! let sim = StateVectorSimulator::new();
//! let program = Program::from_gates([Gate::H(0), Gate::Cnot(0, 1)]);
//!
//! let wf = sim.wavefunction(&program).unwrap();
//! let probs = wf.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Connection types and trait (Gantree: L4_Backend → ConnectionTrait)
pub mod connection;

/// State-vector simulator (Gantree: L4_Backend → StateVectorSimulator)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Wavefunction, WavefunctionSimulator};
pub use simulator::StateVectorSimulator;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qtomo_backend::prelude::*;
    //! ```

    pub use crate::connection::{Wavefunction, WavefunctionSimulator};
    pub use crate::simulator::StateVectorSimulator;
}

// ============================================================================
// Integration Tests
// ============================================================================
