//! # Generation Module
//!
//! Procedural dungeon layout and content placement.
//!
//! Generation is deterministic: every roll draws from a `StdRng` seeded
//! through the [`GenerationConfig`], so a seed fully reproduces a dungeon.
//! Generators implement the [`Generator`] trait, which pairs generation with
//! a validation pass over the produced content.

pub mod dungeon;

pub use dungeon::*;

use crate::{Catalog, DelveError, DelveResult, Difficulty};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// # Examples
///
/// ```
/// use delve::{Difficulty, GenerationConfig};
///
/// let config = GenerationConfig::new(10, 10, Difficulty::Normal, 42);
/// assert!(config.validate().is_ok());
///
/// let bad = GenerationConfig::new(0, 10, Difficulty::Normal, 42);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Grid width in rooms
    pub width: u32,
    /// Grid height in rooms
    pub height: u32,
    /// Difficulty label; scales elite odds and trap damage
    pub difficulty: Difficulty,
    /// Random seed for reproducible generation
    pub seed: u64,
}

impl GenerationConfig {
    /// Creates a generation configuration.
    pub fn new(width: u32, height: u32, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            width,
            height,
            difficulty,
            seed,
        }
    }

    /// Creates a configuration for testing: a 10x10 Normal dungeon.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(10, 10, Difficulty::Normal, seed)
    }

    /// Checks the dimensions, failing fast on an empty grid.
    pub fn validate(&self) -> DelveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DelveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of cells sampled for content placement.
    pub fn placement_samples(&self) -> u32 {
        self.width * self.height / 4
    }
}

/// Trait for procedural generators.
///
/// Pairs generation with a validation pass so callers can assert the
/// produced content meets structural requirements.
pub trait Generator<T> {
    /// Generates content using the provided configuration, archetype
    /// catalog, and random number generator.
    fn generate(
        &self,
        config: &GenerationConfig,
        catalog: &Catalog,
        rng: &mut StdRng,
    ) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = GenerationConfig::new(8, 6, Difficulty::Hard, 12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.placement_samples(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_grid() {
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let config = GenerationConfig::new(w, h, Difficulty::Normal, 1);
            assert!(matches!(
                config.validate(),
                Err(DelveError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_rng_creation_is_deterministic() {
        use rand::Rng;

        let config = GenerationConfig::for_testing(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
