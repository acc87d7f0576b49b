//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level askscale configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskscaleConfig {
    /// Item catalog TOML file.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Content pools TOML file.
    #[serde(default = "default_pools")]
    pub pools: PathBuf,
    /// Fixed seed for reproducible selection. Unset means a fresh draw per run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Report format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("data/catalog.toml")
}
fn default_pools() -> PathBuf {
    PathBuf::from("data/pools.toml")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for AskscaleConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            pools: default_pools(),
            seed: None,
            default_format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `askscale.toml` in the current directory
/// 2. `~/.config/askscale/config.toml`
///
/// Environment variable overrides: `ASKSCALE_CATALOG`, `ASKSCALE_POOLS`,
/// `ASKSCALE_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<AskscaleConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("askscale.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AskscaleConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AskscaleConfig::default(),
    };

    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `ASKSCALE_*` overrides read through `lookup`.
fn apply_overrides(
    mut config: AskscaleConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AskscaleConfig> {
    if let Some(catalog) = lookup("ASKSCALE_CATALOG") {
        config.catalog = PathBuf::from(catalog);
    }
    if let Some(pools) = lookup("ASKSCALE_POOLS") {
        config.pools = PathBuf::from(pools);
    }
    if let Some(seed) = lookup("ASKSCALE_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("ASKSCALE_SEED is not a valid seed: {seed}"))?;
        config.seed = Some(seed);
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("askscale"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = AskscaleConfig::default();
        assert_eq!(config.catalog, PathBuf::from("data/catalog.toml"));
        assert_eq!(config.default_format, "text");
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: AskscaleConfig = toml::from_str("seed = 42\ndefault_format = \"json\"\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.default_format, "json");
        assert_eq!(config.pools, PathBuf::from("data/pools.toml"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/no/such/askscale.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "catalog = \"my/catalog.toml\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.catalog, PathBuf::from("my/catalog.toml"));
    }

    #[test]
    fn overrides_take_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ASKSCALE_POOLS", "other/pools.toml"),
            ("ASKSCALE_SEED", " 7 "),
        ]);
        let config = apply_overrides(AskscaleConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.pools, PathBuf::from("other/pools.toml"));
        assert_eq!(config.catalog, PathBuf::from("data/catalog.toml"));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn invalid_seed_override_fails() {
        let result = apply_overrides(AskscaleConfig::default(), |k| {
            (k == "ASKSCALE_SEED").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
