use crate::models::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "label-verify";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes the JSON configuration file
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `<platform config dir>/label-verify/config.json`
    ///
    /// Nothing is created until the first save.
    pub fn new() -> Result<Self, String> {
        let base = dirs::config_dir().ok_or("Could not locate the platform config directory")?;
        Ok(Self::with_path(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    /// Manager for an explicit config file, e.g. from `--config`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Validate and write `config` as pretty JSON
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        config.validate()?;

        fs::create_dir_all(self.parent_dir()).map_err(|e| {
            format!("Cannot create {}: {}", self.parent_dir().display(), e)
        })?;

        let body = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Cannot serialize configuration: {}", e))?;
        fs::write(&self.path, body)
            .map_err(|e| format!("Cannot write {}: {}", self.path.display(), e))?;

        info!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }

    /// Read the configuration, falling back to defaults when no file exists
    ///
    /// A file that exists but does not parse or validate is an error rather
    /// than a silent fallback.
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_exists() {
            debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| format!("Cannot read {}: {}", self.path.display(), e))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid config file {}: {}", self.path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn config_file_path(&self) -> &Path {
        &self.path
    }

    pub fn config_exists(&self) -> bool {
        self.path.is_file()
    }
}
