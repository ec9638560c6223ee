//! Combat configuration loader.

use std::path::Path;

use tactics_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file.
    ///
    /// Missing keys fall back to their defaults, so an empty file yields
    /// `CombatConfig::default()`.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.initiative_min > config.initiative_max {
            anyhow::bail!(
                "initiative_min ({}) exceeds initiative_max ({})",
                config.initiative_min,
                config.initiative_max
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "move_cost_per_tile = 3\ninitiative_seed = 42\nmin_action_points_to_act = 1"
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.move_cost_per_tile, 3);
        assert_eq!(config.initiative_seed, Some(42));
        assert_eq!(config.min_action_points_to_act, 1);
        assert_eq!(config.initiative_max, CombatConfig::DEFAULT_INITIATIVE_MAX);
    }

    #[test]
    fn inverted_initiative_range_is_rejected() {
        let err = ConfigLoader::parse("initiative_min = 5\ninitiative_max = 2").unwrap_err();
        assert!(err.to_string().contains("initiative_min"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
