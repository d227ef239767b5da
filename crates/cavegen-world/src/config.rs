//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::curve::SpreadCurve;

/// Default side length of a generated map.
pub const DEFAULT_MAP_SIZE: usize = 128;

/// Parameters for a full generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // === Seeding ===
    /// Map side length in cells
    pub size: usize,
    /// Flat solid probability used when no spread curve is set
    pub initial_density: f32,
    /// RNG seed (None = random)
    pub seed: Option<u64>,

    // === Automaton ===
    /// Number of refinement generations
    pub refinement_steps: u32,
    /// A solid cell survives with at least this many solid neighbours
    pub min_threshold: f32,
    /// An open cell turns solid with more than this many solid neighbours
    pub max_threshold: f32,

    // === Cleanup ===
    /// Solid regions up to this size are opened (0 = keep all)
    pub max_pillar_size: usize,
    /// Smallest accepted main chamber
    pub min_cave_size: usize,
    /// Largest accepted main chamber (None = unbounded)
    pub max_cave_size: Option<usize>,
    /// Attempts before settling for a chamber outside the accepted range
    pub max_attempts: u32,

    /// Radial solid probability (None = flat `initial_density`)
    pub spread_curve: Option<SpreadCurve>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAP_SIZE,
            initial_density: 0.4,
            seed: None,

            refinement_steps: 4,
            min_threshold: 3.0,
            max_threshold: 4.0,

            max_pillar_size: 0,
            min_cave_size: 0,
            max_cave_size: None,
            max_attempts: 10,

            spread_curve: None,
        }
    }
}

impl GeneratorConfig {
    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.size = self.size.clamp(15, 250);
        self.initial_density = self.initial_density.clamp(0.0, 1.0);

        // A 3x3 window has 8 neighbours.
        self.min_threshold = self.min_threshold.clamp(0.0, 8.0);
        self.max_threshold = self.max_threshold.clamp(0.0, 8.0);

        self.refinement_steps = self.refinement_steps.min(64);
        self.max_attempts = self.max_attempts.max(1);
        if let Some(max) = self.max_cave_size.as_mut() {
            if self.min_cave_size > *max {
                std::mem::swap(&mut self.min_cave_size, max);
            }
        }
    }

    /// Checks if a chamber of `size` cells is in the accepted range.
    #[must_use]
    pub fn accepts(&self, size: usize) -> bool {
        size >= self.min_cave_size && self.max_cave_size.map_or(true, |max| size <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.size, 128);
        assert_eq!(config.refinement_steps, 4);
        assert!(config.spread_curve.is_none());
        assert!(config.accepts(0));
        assert!(config.accepts(usize::MAX));
    }

    #[test]
    fn test_config_validation() {
        let mut config = GeneratorConfig {
            size: 4,
            initial_density: 1.5,
            max_threshold: 12.0,
            min_cave_size: 500,
            max_cave_size: Some(100),
            max_attempts: 0,
            ..Default::default()
        };

        config.validate();

        assert_eq!(config.size, 15);
        assert!((config.initial_density - 1.0).abs() < f32::EPSILON);
        assert!((config.max_threshold - 8.0).abs() < f32::EPSILON);
        assert_eq!((config.min_cave_size, config.max_cave_size), (100, Some(500)));
        assert_eq!(config.max_attempts, 1);
        assert!(config.accepts(300));
        assert!(!config.accepts(99));
    }

    #[test]
    fn test_config_toml_partial() {
        let config: GeneratorConfig = toml::from_str(
            "size = 64\nrefinement_steps = 6\n[spread_curve]\nkeys = [[0.0, 0.3], [1.0, 0.7]]\n",
        )
        .expect("valid toml");
        assert_eq!(config.size, 64);
        assert_eq!(config.refinement_steps, 6);
        assert!((config.initial_density - 0.4).abs() < f32::EPSILON);
        let curve = config.spread_curve.expect("curve set");
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_config_toml_curve_keys_out_of_order() {
        let config: GeneratorConfig =
            toml::from_str("[spread_curve]\nkeys = [[1.0, 1.0], [0.0, 0.0]]\n").expect("valid toml");
        let curve = config.spread_curve.expect("curve set");
        assert_eq!(curve, SpreadCurve::new(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-5);
        assert!((curve.evaluate(2.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_config_toml_rejects_nan_curve_time() {
        let result = toml::from_str::<GeneratorConfig>("[spread_curve]\nkeys = [[nan, 0.5]]\n");
        assert!(result.is_err());
    }
}
