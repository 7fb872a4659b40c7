//! Quantum gate definitions for QTOMO
//!
//! Gantree: L1_Program → Gate
//!
//! Gate instructions used by state-preparation and measurement programs,
//! rendered in Quil syntax.

use crate::error::{TomoError, TomoResult};
use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Identity gate
    /// Gantree: I(QubitId) // 항등
    I(QubitId),

    /// Pauli-X gate (NOT)
    /// Gantree: X(QubitId) // 파울리 X
    X(QubitId),

    /// Pauli-Y gate
    /// Gantree: Y(QubitId) // 파울리 Y
    Y(QubitId),

    /// Pauli-Z gate
    /// Gantree: Z(QubitId) // 파울리 Z
    Z(QubitId),

    /// Hadamard gate
    H(QubitId),

    /// S gate (sqrt(Z))
    S(QubitId),

    /// T gate (fourth root of Z)
    T(QubitId),

    // ========================================================================
    // Single-Qubit Parameterized Rotation Gates
    // ========================================================================
    /// Rotation around X-axis
    Rx(QubitId, Angle),

    /// Rotation around Y-axis
    Ry(QubitId, Angle),

    /// Rotation around Z-axis
    Rz(QubitId, Angle),

    /// Phase gate diag(1, e^{iλ})
    Phase(QubitId, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT
    /// Gantree: CNOT(QubitId, QubitId) // ctrl, tgt
    Cnot(QubitId, QubitId),

    /// Controlled-Z
    Cz(QubitId, QubitId),

    /// SWAP gate
    Swap(QubitId, QubitId),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<QubitId> // 관련 큐비트
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Gate::I(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::H(q)
            | Gate::S(q)
            | Gate::T(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _)
            | Gate::Phase(q, _) => vec![q],

            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => vec![a, b],
        }
    }

    /// Rotation angle, if any
    pub fn angle(&self) -> Option<Angle> {
        match *self {
            Gate::Rx(_, a) | Gate::Ry(_, a) | Gate::Rz(_, a) | Gate::Phase(_, a) => Some(a),
            _ => None,
        }
    }

    /// Quil mnemonic
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I(_) => "I",
            Gate::X(_) => "X",
            Gate::Y(_) => "Y",
            Gate::Z(_) => "Z",
            Gate::H(_) => "H",
            Gate::S(_) => "S",
            Gate::T(_) => "T",
            Gate::Rx(_, _) => "RX",
            Gate::Ry(_, _) => "RY",
            Gate::Rz(_, _) => "RZ",
            Gate::Phase(_, _) => "PHASE",
            Gate::Cnot(_, _) => "CNOT",
            Gate::Cz(_, _) => "CZ",
            Gate::Swap(_, _) => "SWAP",
        }
    }

    /// Check angle finiteness and qubit distinctness
    pub fn validate(&self) -> TomoResult<()> {
        if let Some(angle) = self.angle() {
            if !angle.is_finite() {
                return Err(TomoError::InvalidAngle(angle));
            }
        }
        if let Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) = *self {
            if a == b {
                return Err(TomoError::RepeatedQubit(self.to_quil()));
            }
        }
        Ok(())
    }

    /// Convert to a Quil instruction (no trailing newline)
    /// Gantree: to_quil(&self) -> String // Quil 변환
    pub fn to_quil(&self) -> String {
        let qubits: Vec<String> = self.qubits().iter().map(|q| q.to_string()).collect();
        match self.angle() {
            Some(angle) => format!("{}({}) {}", self.name(), angle, qubits.join(" ")),
            None => format!("{} {}", self.name(), qubits.join(" ")),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_quil())
    }
}

// ============================================================================
// Tests
// ============================================================================
