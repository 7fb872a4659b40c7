//! Sampling configuration
//!
//! Gantree: L5_Tomography → SamplingConfig
//!
//! Sample counts, seeding and plotting threshold shared by the sampling
//! routines.

use qtomo_core::{sampling, TomoError, TomoResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Sampling configuration
/// Gantree: SamplingConfig // 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of samples per distribution
    /// Gantree: num_samples: usize // 샘플 수 (10000)
    pub num_samples: usize,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    #[serde(default)]
    pub seed: Option<u64>,

    /// Bars below this magnitude are drawn transparent
    /// Gantree: histogram_threshold: f64 // 표시 임계값 (0.001)
    #[serde(default = "default_threshold")]
    pub histogram_threshold: f64,
}

fn default_threshold() -> f64 {
    sampling::HISTOGRAM_THRESHOLD
}

impl SamplingConfig {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set sample count
    pub fn with_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set histogram threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.histogram_threshold = threshold;
        self
    }

    // ========================================================================
    // RNG
    // ========================================================================

    /// Generator for the samplers, seeded when a seed is set
    /// Gantree: rng(&self) -> ChaCha8Rng // 난수 생성기
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> TomoResult<()> {
        if self.num_samples == 0 {
            return Err(TomoError::InvalidConfig(
                "num_samples must be > 0".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.histogram_threshold) {
            return Err(TomoError::InvalidConfig(format!(
                "histogram_threshold must be in [0, 1), got {}",
                self.histogram_threshold
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> TomoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> TomoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> TomoResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read from a JSON file
    pub fn load(path: impl AsRef<Path>) -> TomoResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            num_samples: sampling::DEFAULT_SAMPLES,
            seed: None,
            histogram_threshold: sampling::HISTOGRAM_THRESHOLD,
        }
    }
}

impl fmt::Display for SamplingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SamplingConfig(samples={}, seed={:?}, threshold={})",
            self.num_samples, self.seed, self.histogram_threshold
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
