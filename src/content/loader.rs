//! Loader for the RON configuration file read before the app starts.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::{Path, PathBuf};

use super::data::GameConfig;
use super::validation::validate_config;

/// Error type for configuration loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a configuration from RON text.
pub fn parse_config(file: &str, contents: &str) -> Result<GameConfig, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let config = parse_config(&file_name, &contents)?;

    let issues = validate_config(&config);
    if !issues.is_empty() {
        let message = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigLoadError {
            file: file_name,
            message: format!("Validation failed: {}", message),
        });
    }

    Ok(config)
}

/// Where the active configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the path; compiled defaults are in use.
    Missing(PathBuf),
    /// The file was rejected; compiled defaults are in use.
    Rejected(ConfigLoadError),
}

impl GameConfig {
    /// Load the configuration, falling back to compiled defaults when the file
    /// is missing, unreadable or invalid. Nothing is logged here because this
    /// runs before the app installs its logger; see [`ConfigSource::report`].
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref();

        if !path.exists() {
            return (Self::default(), ConfigSource::Missing(path.to_path_buf()));
        }

        match load_config(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => (Self::default(), ConfigSource::Rejected(e)),
        }
    }
}

impl ConfigSource {
    pub fn report(&self, config: &GameConfig) {
        match self {
            ConfigSource::File(path) => info!(
                "Loaded config v{} from {:?} (base_speed={}, scale={})",
                config.schema_version,
                path,
                config.controller.base_speed,
                config.scene.render_scale
            ),
            ConfigSource::Missing(path) => {
                warn!("Config not found at {:?}, using defaults", path)
            }
            ConfigSource::Rejected(e) => error!("{}, using defaults", e),
        }
    }
}
