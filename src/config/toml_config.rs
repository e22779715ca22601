use crate::config::ConverterConfig;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: Option<PathBuf>,
    /// Fixed report file name inside `directory`, instead of "<title>.xlsx".
    pub file_name: Option<String>,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` references; undefined variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_directory(&self) -> Option<PathBuf> {
        self.output.directory.clone()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.output.file_name.as_deref()
    }

    pub fn to_converter_config(&self) -> ConverterConfig {
        let output_dir = self
            .output
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        ConverterConfig {
            input: self.input.path.clone(),
            output: self.file_name().map(|name| output_dir.join(name)),
            output_dir,
            overwrite: self.output.overwrite,
            verbose: self.logging.verbose,
            log_json: self.logging.json,
            monitor: self.monitoring.enabled,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
            validate_file_extension("input.path", path, &["xlsx"])?;
        }

        if let Some(directory) = &self.output.directory {
            validate_path("output.directory", directory)?;
        }

        if let Some(name) = &self.output.file_name {
            validate_non_empty_string("output.file_name", name)?;
            validate_file_extension("output.file_name", Path::new(name), &["xlsx"])?;
        }

        Ok(())
    }
}
