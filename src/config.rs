use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaybookConfig {
    pub database: Option<String>,
    /// Seed reference tables when the database is initialized
    pub seed: Option<bool>,
}

impl StaybookConfig {
    pub fn seed_enabled(&self) -> bool {
        self.seed.unwrap_or(true)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("staybook.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".staybook").join("staybook.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StaybookConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StaybookConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &StaybookConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database path: explicit flag, then config file, then the default location
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&StaybookConfig>, base: &Path) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| default_database_path_in(base))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
