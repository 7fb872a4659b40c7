//! Wavefunction connection types and traits
//!
//! Gantree: L4_Backend → ConnectionTrait
//!
//! Defines the interface through which tomography routines obtain the
//! amplitudes a program prepares.

use ndarray::Array1;
use num_complex::Complex64;
use qtomo_core::{Bitstring, Program, ProbabilityVector, TomoError, TomoResult};
use std::fmt;

/// Amplitudes of an `n`-qubit pure state
///
/// Index bit `k` (least significant first) holds the state of qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavefunction {
    /// `2^n` complex amplitudes
    pub amplitudes: Array1<Complex64>,
}

impl Wavefunction {
    /// Wrap amplitudes; the length must be a power of two
    pub fn new(amplitudes: Array1<Complex64>) -> TomoResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(TomoError::DimensionMismatch {
                expected: len.next_power_of_two().max(1),
                actual: len,
            });
        }
        Ok(Self { amplitudes })
    }

    /// `|0…0⟩` on `num_qubits` qubits
    pub fn zeros(num_qubits: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << num_qubits);
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Outcome probabilities `|ψ_i|²`
    /// Gantree: probabilities(&self) -> Array1<f64> // 측정 확률
    pub fn probabilities(&self) -> Array1<f64> {
        self.amplitudes.mapv(|a| a.norm_sqr())
    }

    /// Probabilities as a validated distribution
    pub fn distribution(&self) -> TomoResult<ProbabilityVector> {
        ProbabilityVector::new(self.probabilities().to_vec())
    }

    /// Amplitude of a basis state written most significant qubit first
    pub fn amplitude(&self, bitstring: &Bitstring) -> TomoResult<Complex64> {
        if bitstring.len() != self.num_qubits() {
            return Err(TomoError::DimensionMismatch {
                expected: self.num_qubits(),
                actual: bitstring.len(),
            });
        }
        Ok(self.amplitudes[bitstring.to_usize()])
    }

    /// Squared norm, 1 for a physical state
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }
}

impl fmt::Display for Wavefunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_qubits();
        let mut first = true;
        for (i, a) in self.amplitudes.iter().enumerate() {
            if a.norm_sqr() < 1e-12 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(
                f,
                "({:.4}{:+.4}i)|{}>",
                a.re,
                a.im,
                Bitstring::from_index(i, n)
            )?;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Connection answering wavefunction queries
/// Gantree: WavefunctionSimulator // 연결 인터페이스
pub trait WavefunctionSimulator {
    /// Connection name
    fn name(&self) -> &str;

    /// Amplitudes prepared by `program`
    /// Gantree: wavefunction(program) -> Result<Wavefunction>
    fn wavefunction(&self, program: &Program) -> TomoResult<Wavefunction>;

    /// Wavefunctions for several programs
    fn wavefunctions(&self, programs: &[Program]) -> TomoResult<Vec<Wavefunction>> {
        programs.iter().map(|p| self.wavefunction(p)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn bell() -> Wavefunction {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        Wavefunction::new(array![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(h, 0.0)
        ])
        .unwrap()
    }

    #[test]
    fn test_wavefunction_new_rejects_bad_length() {
        let err = Wavefunction::new(Array1::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            TomoError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_zeros() {
        let wf = Wavefunction::zeros(3);
        assert_eq!(wf.num_qubits(), 3);
        assert_eq!(wf.amplitudes.len(), 8);
        assert_relative_eq!(wf.norm_sqr(), 1.0);
    }

    #[test]
    fn test_probabilities() {
        let probs = bell().probabilities();
        assert_relative_eq!(probs[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(probs[3], 0.5, epsilon = 1e-12);
        assert!(bell().distribution().is_ok());
    }

    #[test]
    fn test_amplitude_lookup() {
        let wf = bell();
        let a = wf.amplitude(&Bitstring::parse("11").unwrap()).unwrap();
        assert_relative_eq!(a.re, std::f64::consts::FRAC_1_SQRT_2);
        assert!(wf.amplitude(&Bitstring::parse("1").unwrap()).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Wavefunction::zeros(2).to_string(),
            "(1.0000+0.0000i)|00>"
        );
    }
}
