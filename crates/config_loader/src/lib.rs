//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `SessionBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("session.toml")).unwrap();
//! println!("Simulator log: {}", blueprint.simulator.log_path.display());
//! ```

mod parser;
mod validator;

pub use contracts::SessionBlueprint;
pub use parser::ConfigFormat;

use contracts::SessionError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SessionBlueprint, SessionError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<SessionBlueprint, SessionError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Serialize a SessionBlueprint to TOML
    pub fn to_toml(blueprint: &SessionBlueprint) -> Result<String, SessionError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| SessionError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a SessionBlueprint to JSON
    pub fn to_json(blueprint: &SessionBlueprint) -> Result<String, SessionError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| SessionError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, SessionError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            SessionError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            SessionError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, SessionError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
