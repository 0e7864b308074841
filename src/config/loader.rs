//! Loader for controller config files (RON or JSON).

use ron::Options;
use ron::extensions::Extensions;
use std::fs;
use std::path::Path;

use super::ControllerConfig;

/// A config file that could not be read, parsed or validated.
#[derive(Debug)]
pub struct ConfigLoadError {
    /// Path or label of the offending source.
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "controller config {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// `Option` fields may be written bare, without `Some(..)`.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse, validate and normalize a RON config. `file` only labels errors.
pub fn parse_ron_config(contents: &str, file: &str) -> Result<ControllerConfig, ConfigLoadError> {
    let config: ControllerConfig = ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    checked(config, file)
}

/// Parse, validate and normalize a JSON config. `file` only labels errors.
pub fn parse_json_config(contents: &str, file: &str) -> Result<ControllerConfig, ConfigLoadError> {
    let config: ControllerConfig =
        serde_json::from_str(contents).map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    checked(config, file)
}

/// Load a config file, picking the format from its extension (`.json`, else RON).
pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json_config(&contents, &file_name),
        _ => parse_ron_config(&contents, &file_name),
    }
}

fn checked(config: ControllerConfig, file: &str) -> Result<ControllerConfig, ConfigLoadError> {
    config.checked().map_err(|e| ConfigLoadError {
        file: file.to_string(),
        message: format!("Validation error: {}", e),
    })
}
