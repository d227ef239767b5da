//! Engine configuration.
//!
//! Wraps the generator pipeline settings together with driver options.
//! Configuration can be loaded from and saved to a TOML file.

use cavegen_world::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "cavegen.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Debug Settings ===
    /// Dump the finished map to stdout
    pub print_map: bool,

    // === Generation ===
    /// Pipeline settings
    pub generator: GeneratorConfig,
}

impl EngineConfig {
    /// Resolves the config file path: the given argument, else
    /// `cavegen.toml` in the working directory.
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.generator.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavegen_world::SpreadCurve;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.print_map);
        assert_eq!(config.generator.size, 128);
        assert_eq!(config.generator.refinement_steps, 4);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        // Set invalid values
        config.generator.size = 10_000;
        config.generator.min_threshold = -2.0;

        config.validate();

        // Should be clamped
        assert_eq!(config.generator.size, 250);
        assert!(config.generator.min_threshold.abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("test_config.toml");

        // Create and save config
        let mut config = EngineConfig::default();
        config.print_map = true;
        config.generator.seed = Some(12345);
        config.generator.max_cave_size = Some(4000);
        config.generator.spread_curve = Some(SpreadCurve::default());

        config.save_to(&config_path).expect("Failed to save config");

        // Load and verify
        let loaded = EngineConfig::load_from(&config_path);
        assert!(loaded.print_map);
        assert_eq!(loaded.generator, config.generator);
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(EngineConfig::resolve_path(None), PathBuf::from("cavegen.toml"));
        assert_eq!(
            EngineConfig::resolve_path(Some("maps/big.toml".into())),
            PathBuf::from("maps/big.toml")
        );
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/cavegen.toml");
        // Should return defaults
        assert_eq!(config.generator.size, 128);
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "generator = [not toml").expect("Failed to write");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config.generator.size, 128);
    }

    #[test]
    fn test_config_toml_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("print_map"));
        assert!(toml_str.contains("[generator]"));
        assert!(toml_str.contains("refinement_steps"));
    }
}
