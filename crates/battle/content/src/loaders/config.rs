//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`BattleConfig`] from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a [`BattleConfig`] from TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid battle config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("lookahead = 8\n").unwrap();
        assert_eq!(config.lookahead, 8);
        assert_eq!(config.default_skill_rank, BattleConfig::DEFAULT_SKILL_RANK);
        assert_eq!(config.status_duration, BattleConfig::DEFAULT_STATUS_DURATION);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let error = ConfigLoader::parse("lookahead = 0\n").unwrap_err();
        assert!(error.to_string().contains("Invalid battle config"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lookahead = 12").unwrap();
        writeln!(file, "rank_change_invalidates = true").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.lookahead, 12);
        assert!(config.rank_change_invalidates);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/battle.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), BattleConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/battle.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/battle.toml"));
    }
}
