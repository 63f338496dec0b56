use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;
use std::path::PathBuf;

/// Config manager for an explicit path, or the platform default
pub fn init_config_manager(path: Option<PathBuf>) -> Result<ConfigManager, String> {
    match path {
        Some(path) => Ok(ConfigManager::with_path(path)),
        None => ConfigManager::new(),
    }
}

/// Load configuration (defaults when no file exists)
pub fn load_config(manager: &ConfigManager) -> Result<AppConfig, String> {
    manager.load()
}

/// Pretty JSON of the effective configuration
pub fn show_config(manager: &ConfigManager) -> Result<String, String> {
    let config = manager.load()?;
    serde_json::to_string_pretty(&config).map_err(|e| format!("Failed to serialize config: {}", e))
}

/// Get config file path
pub fn get_config_path(manager: &ConfigManager) -> String {
    manager.config_file_path().to_string_lossy().to_string()
}

/// Write the default configuration unless a file already exists
pub fn init_config(manager: &ConfigManager, force: bool) -> Result<String, String> {
    if manager.config_exists() && !force {
        return Err(format!(
            "Config file already exists at {} (use --force to overwrite)",
            get_config_path(manager)
        ));
    }

    manager.save(&AppConfig::default())?;
    Ok(format!("Wrote default configuration to {}", get_config_path(manager)))
}
