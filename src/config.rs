use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct AutoloaderConfig {
    pub general: GeneralConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    pub plugins_dir: String,
    pub state_dir: String,
}

impl AutoloaderConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let defaults = include_str!("../config/default.toml");
        let mut config: AutoloaderConfig = toml::from_str(defaults)?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "mu-autoloader") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = toml::from_str(&user_str)?; // TODO: deep merge instead of full replace
            }
        }

        config.general.plugins_dir = expand_tilde(config.general.plugins_dir)?;
        config.general.state_dir = expand_tilde(config.general.state_dir)?;

        Ok(config)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.plugins_dir)
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.state_dir)
    }
}

fn expand_tilde(path: String) -> Result<String> {
    if !path.starts_with('~') {
        return Ok(path);
    }

    let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(path.replacen('~', &home.to_string_lossy(), 1))
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
