//! Error types for QTOMO
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by every QTOMO crate.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QTOMO
/// Gantree: TomoError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TomoError {
    // ========================================================================
    // Confusion-Rate Matrix Errors
    // ========================================================================
    /// Confusion-rate matrix column does not sum to 1
    /// Gantree: CrmUnnormalized{{column,sum}} // 열 합 != 1
    #[error("Unnormalized confusion-rate matrix: column {column} sums to {sum}, expected 1")]
    CrmUnnormalized { column: usize, sum: f64 },

    /// Confusion-rate matrix entry outside [0, 1]
    /// Gantree: CrmValue{{row,col,value}} // 값 범위
    #[error("Confusion-rate matrix entry ({row}, {col}) = {value} is outside [0, 1]")]
    CrmValue { row: usize, col: usize, value: f64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Probability vector does not sum to 1
    #[error("Probability vector sums to {0}, expected 1")]
    UnnormalizedProbabilities(f64),

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Invalid angle
    #[error("Invalid angle {0}: must be finite")]
    InvalidAngle(f64),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Shape Errors
    // ========================================================================
    /// Shapes of two operands do not agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Matrix must be square
    #[error("Matrix must be square, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Operator basis without elements
    #[error("Operator basis is empty")]
    EmptyBasis,

    /// Basis label lookup failed
    #[error("Label '{0}' not found in operator basis")]
    LabelNotFound(String),

    /// Operation requires an orthonormal basis
    #[error("Operator basis is not orthonormal")]
    NotOrthonormal,

    // ========================================================================
    // Program Errors
    // ========================================================================
    /// Program references a qubit the target cannot hold
    #[error("Program references qubit {qubit} but target has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Two-qubit gate on a single qubit
    #[error("Gate '{0}' acts twice on the same qubit")]
    RepeatedQubit(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Connection failed to produce a wavefunction
    #[error("Backend error: {0}")]
    BackendError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QTOMO operations
/// Gantree: TomoResult<T> // type alias
pub type TomoResult<T> = Result<T, TomoError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for TomoError {
    fn from(err: serde_json::Error) -> Self {
        TomoError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for TomoError {
    fn from(err: std::io::Error) -> Self {
        TomoError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl TomoError {
    /// Check if error came from confusion-rate matrix validation
    pub fn is_crm_error(&self) -> bool {
        matches!(
            self,
            TomoError::CrmUnnormalized { .. } | TomoError::CrmValue { .. }
        )
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        self.is_crm_error()
            || matches!(
                self,
                TomoError::InvalidProbability(_)
                    | TomoError::UnnormalizedProbabilities(_)
                    | TomoError::QubitOutOfRange { .. }
                    | TomoError::InvalidBitstring(_)
                    | TomoError::InvalidAngle(_)
                    | TomoError::InvalidConfig(_)
            )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TomoError::InvalidProbability(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_crm_unnormalized_display() {
        let err = TomoError::CrmUnnormalized {
            column: 0,
            sum: 1.1,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unnormalized"));
        assert!(msg.contains("column 0"));
    }

    #[test]
    fn test_crm_value_display() {
        let err = TomoError::CrmValue {
            row: 1,
            col: 1,
            value: 1.1,
        };
        assert!(err.to_string().contains("(1, 1)"));
        assert!(err.to_string().contains("1.1"));
    }

    #[test]
    fn test_is_crm_error() {
        assert!(TomoError::CrmValue {
            row: 0,
            col: 0,
            value: -0.1
        }
        .is_crm_error());
        assert!(!TomoError::EmptyBasis.is_crm_error());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(TomoError::InvalidProbability(1.5).is_validation_error());
        assert!(TomoError::CrmUnnormalized { column: 1, sum: 0.9 }.is_validation_error());
        assert!(!TomoError::BackendError("test".into()).is_validation_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TomoError = io.into();
        assert!(matches!(err, TomoError::FileError(_)));
    }
}
