//! Generator configuration.
//!
//! Values come from three layers, highest precedence first:
//! 1. Environment variables (`IQSGEN_` prefix)
//! 2. A YAML configuration file
//! 3. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use iqsgen_compile::MAX_OPTIMIZATION_LEVEL;

/// Settings shared by both generator entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name of the `iqs::QubitRegister` variable in the emitted calls.
    #[serde(default = "default_register")]
    pub register: String,

    /// Program template file.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Marker separating the three template fragments.
    #[serde(default = "default_template_marker")]
    pub template_marker: String,

    /// C++ identifier substituted for `pi` in rotation angles.
    #[serde(default = "default_pi_constant")]
    pub pi_constant: String,

    /// Default output file for the generated program.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Optimization level used when lowering circuits (0-2).
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,
}

fn default_register() -> String {
    "psi".to_string()
}

fn default_template_path() -> PathBuf {
    PathBuf::from("inicio.qasm")
}

fn default_template_marker() -> String {
    crate::template::DEFAULT_TEMPLATE_MARKER.to_string()
}

fn default_pi_constant() -> String {
    "M_PI".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("qasm.cpp")
}

fn default_optimization_level() -> u8 {
    1
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            register: default_register(),
            template_path: default_template_path(),
            template_marker: default_template_marker(),
            pi_constant: default_pi_constant(),
            output_path: default_output_path(),
            optimization_level: default_optimization_level(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::IoError(format!("{}: {e}", path.as_ref().display()))
        })?;

        let config: GeneratorConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    /// 3. Validate the result
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            GeneratorConfig::default()
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `IQSGEN_*` environment variables into this configuration.
    ///
    /// Only variables that are set override the current values.
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("IQSGEN_REGISTER") {
            self.register = v;
        }
        if let Some(v) = var("IQSGEN_TEMPLATE") {
            self.template_path = PathBuf::from(v);
        }
        if let Some(v) = var("IQSGEN_TEMPLATE_MARKER") {
            self.template_marker = v;
        }
        if let Some(v) = var("IQSGEN_PI_CONSTANT") {
            self.pi_constant = v;
        }
        if let Some(v) = var("IQSGEN_OUTPUT") {
            self.output_path = PathBuf::from(v);
        }
        if let Some(v) = var("IQSGEN_OPTIMIZATION_LEVEL") {
            if let Ok(level) = v.parse() {
                self.optimization_level = level;
            }
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_cpp_identifier(&self.register) {
            return Err(ConfigError::ValidationError(format!(
                "Register name '{}' is not a valid C++ identifier",
                self.register
            )));
        }

        if !is_cpp_identifier(&self.pi_constant) {
            return Err(ConfigError::ValidationError(format!(
                "Pi constant '{}' is not a valid C++ identifier",
                self.pi_constant
            )));
        }

        if self.template_marker.is_empty() {
            return Err(ConfigError::ValidationError(
                "Template marker must not be empty".to_string(),
            ));
        }

        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(ConfigError::ValidationError(format!(
                "Optimization level {} is above the maximum of {MAX_OPTIMIZATION_LEVEL}",
                self.optimization_level
            )));
        }

        Ok(())
    }
}

/// Whether `name` can be used as a C++ variable or macro name.
pub(crate) fn is_cpp_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The configuration file is not valid YAML for this schema.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value is out of range or malformed.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
