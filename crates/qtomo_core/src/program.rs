//! Gate programs for QTOMO
//!
//! Gantree: L1_Program → Program
//!
//! An ordered list of gate instructions. Programs carry no fixed register
//! size; the qubits they touch are derived from their instructions.

use crate::error::{TomoError, TomoResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Gate program
/// Gantree: Program // 프로그램 구조체
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Instruction sequence
    /// Gantree: instructions: Vec<Gate> // 게이트 목록
    instructions: Vec<Gate>,
}

impl Program {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a vector of gates
    pub fn from_gates(gates: impl IntoIterator<Item = Gate>) -> Self {
        Self {
            instructions: gates.into_iter().collect(),
        }
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append an instruction
    /// Gantree: inst(&mut, Gate) -> &mut Self // 명령 추가
    pub fn inst(&mut self, gate: Gate) -> &mut Self {
        self.instructions.push(gate);
        self
    }

    /// Append an instruction, consuming self
    pub fn with(mut self, gate: Gate) -> Self {
        self.instructions.push(gate);
        self
    }

    /// Append all instructions of another program
    pub fn extend(&mut self, other: &Program) -> &mut Self {
        self.instructions.extend_from_slice(&other.instructions);
        self
    }

    /// Get instructions
    pub fn instructions(&self) -> &[Gate] {
        &self.instructions
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if program is empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    // ========================================================================
    // Program Analysis
    // ========================================================================

    /// Qubits touched by the program, ascending
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        self.instructions.iter().flat_map(|g| g.qubits()).collect()
    }

    /// Register size needed to run the program (highest qubit + 1)
    pub fn num_qubits(&self) -> usize {
        self.qubits().iter().next_back().map_or(0, |&q| q + 1)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate every instruction and check it fits in `num_qubits`
    /// Gantree: validate(&self, n) -> Result // 검증
    pub fn validate(&self, num_qubits: usize) -> TomoResult<()> {
        for gate in &self.instructions {
            gate.validate()?;
            for qubit in gate.qubits() {
                if qubit >= num_qubits {
                    return Err(TomoError::GateQubitMismatch { qubit, num_qubits });
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Quil Output
    // ========================================================================

    /// Render as Quil text, every instruction followed by a newline
    /// Gantree: out(&self) -> String // Quil 출력
    pub fn out(&self) -> String {
        self.instructions
            .iter()
            .map(|g| format!("{}\n", g.to_quil()))
            .collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.out())
    }
}

impl FromIterator<Gate> for Program {
    fn from_iter<T: IntoIterator<Item = Gate>>(iter: T) -> Self {
        Self::from_gates(iter)
    }
}

// ============================================================================
// Tests
// ============================================================================
