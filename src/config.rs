// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::Organisation;

pub const ENV_CONFIG_PATH: &str = "BOARD_CONFIG_PATH";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
const DEFAULT_CONFIG_PATH: &str = "config/board.toml";

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Repository whose contributors carry the primary-source flag.
    pub primary_repo: String,
    pub secondary_repo: String,
    /// Classification priority order; exactly one entry should be
    /// marked `core`.
    pub organisations: Vec<Organisation>,
    #[serde(default = "default_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// From $GITHUB_TOKEN, never from the config file. Absent token
    /// means the refresh pipeline is disabled entirely.
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

impl BoardConfig {
    /// Load from an explicit TOML path; the token comes from the
    /// environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading board config from {}", path.display()))?;
        let mut cfg: BoardConfig = toml::from_str(&content)
            .with_context(|| format!("parsing board config {}", path.display()))?;
        cfg.token = std::env::var(ENV_TOKEN).ok().filter(|t| !t.trim().is_empty());
        Ok(cfg)
    }

    /// Load using $BOARD_CONFIG_PATH, falling back to config/board.toml.
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
primary_repo = "acme/widget"
secondary_repo = "acme/widget-site"

[[organisations]]
id = "acme"
name = "Acme Core Team"
url = "https://github.com/acme"
core = true

[[organisations]]
id = "oaksoft"
name = "Oaksoft"
url = "https://github.com/oaksoft"
"#;

    #[test]
    fn parses_orgs_in_file_order_with_defaults() {
        let cfg: BoardConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.primary_repo, "acme/widget");
        assert_eq!(cfg.organisations.len(), 2);
        assert!(cfg.organisations[0].core);
        assert!(!cfg.organisations[1].core);
        assert_eq!(cfg.refresh_interval_secs, DEFAULT_REFRESH_INTERVAL_SECS);
        assert_eq!(cfg.api_base, "https://api.github.com");
    }

    #[serial_test::serial]
    #[test]
    fn token_comes_from_env_and_blank_counts_as_absent() {
        let dir = std::env::temp_dir().join("board-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("board.toml");
        fs::write(&path, SAMPLE).unwrap();

        std::env::set_var(ENV_TOKEN, "  ");
        let cfg = BoardConfig::load_from(&path).unwrap();
        assert!(cfg.token.is_none());

        std::env::set_var(ENV_TOKEN, "ghp_example");
        let cfg = BoardConfig::load_from(&path).unwrap();
        assert_eq!(cfg.token.as_deref(), Some("ghp_example"));

        std::env::remove_var(ENV_TOKEN);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = BoardConfig::load_from(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }

    #[test]
    fn bundled_config_parses() {
        let cfg: BoardConfig = toml::from_str(include_str!("../config/board.toml")).unwrap();
        assert_eq!(cfg.organisations.iter().filter(|o| o.core).count(), 1);
    }
}
