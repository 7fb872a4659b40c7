//! Core types for QTOMO
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and validated wrappers shared by the sampling,
//! readout and plotting layers.

use crate::constants::tolerance;
use crate::error::{TomoError, TomoResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Outcome histogram: counts indexed by outcome
/// Gantree: Histogram // pub type Histogram = Vec<u64>
pub type Histogram = Vec<u64>;

// ============================================================================
// ProbabilityVector
// ============================================================================

/// Distribution over measurement outcomes, entries in [0, 1] summing to 1
/// Gantree: ProbabilityVector // 확률 벡터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector(Vec<f64>);

impl ProbabilityVector {
    /// Create with validation of range and normalization
    pub fn new(probs: Vec<f64>) -> TomoResult<Self> {
        if let Some(&p) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(TomoError::InvalidProbability(p));
        }
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > tolerance::PROBABILITY_SUM_TOL {
            return Err(TomoError::UnnormalizedProbabilities(sum));
        }
        Ok(Self(probs))
    }

    /// Normalize non-negative weights into a distribution
    pub fn from_weights(weights: &[f64]) -> TomoResult<Self> {
        if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(TomoError::InvalidProbability(w));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(TomoError::UnnormalizedProbabilities(total));
        }
        Ok(Self(weights.iter().map(|w| w / total).collect()))
    }

    /// Uniform distribution over `n` outcomes
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the probabilities
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume into the underlying vector
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for ProbabilityVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Bitstring labelling a computational basis state, most significant bit first
/// Gantree: Bitstring // 비트열 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from string (e.g., "0110")
    pub fn parse(s: &str) -> TomoResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(TomoError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Binary expansion of `index` padded to `width` bits
    /// Gantree: from_index(i, n) -> Self // 인덱스 → 비트열
    pub fn from_index(index: usize, width: usize) -> Self {
        let bits = (0..width)
            .rev()
            .map(|k| (index >> k) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// All `2^width` bitstrings in lexicographic order
    pub fn all(width: usize) -> impl Iterator<Item = Bitstring> {
        (0..1usize << width).map(move |i| Self::from_index(i, width))
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over bits, leftmost first
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Convert back to the outcome index
    pub fn to_usize(&self) -> usize {
        self.bits
            .iter()
            .rev()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| 1 << i)
            .sum()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_probability_vector_normalized() {
        let pv = ProbabilityVector::new(vec![0.25, 0.25, 0.5]).unwrap();
        assert_eq!(pv.len(), 3);
        assert_relative_eq!(pv.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_probability_vector_rejects_bad_sum() {
        let err = ProbabilityVector::new(vec![0.5, 0.6]).unwrap_err();
        assert!(matches!(err, TomoError::UnnormalizedProbabilities(_)));
    }

    #[test]
    fn test_probability_vector_rejects_negative() {
        let err = ProbabilityVector::new(vec![1.5, -0.5]).unwrap_err();
        assert!(matches!(err, TomoError::InvalidProbability(_)));
    }

    #[test]
    fn test_from_weights() {
        let pv = ProbabilityVector::from_weights(&[1.0, 3.0]).unwrap();
        assert_relative_eq!(pv[0], 0.25);
        assert_relative_eq!(pv[1], 0.75);
        assert!(ProbabilityVector::from_weights(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_bitstring_from_index() {
        assert_eq!(Bitstring::from_index(1, 2).to_string(), "01");
        assert_eq!(Bitstring::from_index(2, 2).to_string(), "10");
        assert_eq!(Bitstring::from_index(5, 4).to_string(), "0101");
    }

    #[test]
    fn test_bitstring_roundtrip_index() {
        for i in 0..8 {
            assert_eq!(Bitstring::from_index(i, 3).to_usize(), i);
        }
    }

    #[test]
    fn test_bitstring_all_order() {
        let labels: Vec<String> = Bitstring::all(2).map(|b| b.to_string()).collect();
        assert_eq!(labels, vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn test_bitstring_parse() {
        let bs = Bitstring::parse("0110").unwrap();
        assert_eq!(bs.to_usize(), 6);
        assert_eq!(bs.iter().filter(|&b| b).count(), 2);
        assert!(Bitstring::parse("01a").is_err());
    }
}
