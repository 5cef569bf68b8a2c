//! Settings file loader.

use std::path::Path;

use super::{
    ConfigError,
    LocaleSettings,
};

/// Name of the settings file at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".spectra-locale.json";

/// Load and validate the settings of a workspace.
///
/// Without a settings file the defaults are used.
///
/// # Errors
/// - File read error
/// - JSON parse error
/// - Validation errors
pub fn load_settings(workspace_root: &Path) -> Result<LocaleSettings, ConfigError> {
    tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

    let settings =
        load_from_workspace(workspace_root)?.map_or_else(LocaleSettings::default, |ws| {
            tracing::debug!("Loaded workspace settings: {:?}", ws);
            ws
        });

    settings.validate().map_err(ConfigError::ValidationErrors)?;

    tracing::debug!("Settings loaded successfully: {:?}", settings);
    Ok(settings)
}

/// Read the settings file of the workspace root, if any.
///
/// # Returns
/// - `Ok(Some(settings))`: settings file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<LocaleSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LocaleSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
