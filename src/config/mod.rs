pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_required_field, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Settings for one conversion run after command line and file are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub overwrite: bool,
    pub verbose: bool,
    pub log_json: bool,
    pub monitor: bool,
}

impl ConverterConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            output_dir: PathBuf::from("."),
            ..Self::default()
        }
    }
}

impl ConfigProvider for ConverterConfig {
    fn input_path(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn overwrite(&self) -> bool {
        self.overwrite
    }
}

impl Validate for ConverterConfig {
    fn validate(&self) -> Result<()> {
        let input = validate_required_field("input", &self.input)?;
        validate_path("input", input)?;
        validate_file_extension("input", input, &["xlsx"])?;

        if let Some(output) = &self.output {
            validate_path("output", output)?;
            validate_file_extension("output", output, &["xlsx"])?;
        }

        validate_path("output_dir", &self.output_dir)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ticketleo-converter", version)]
#[command(about = "Converts a Ticketleo reservation export into a sorted, print-ready xlsx report")]
pub struct CliConfig {
    /// Ticketleo export (.xlsx)
    pub input: Option<PathBuf>,

    /// Report file; defaults to "<title>.xlsx" in the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for reports named after the export title [default: .]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replace an existing report file
    #[arg(short, long)]
    pub force: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log time, throughput and memory per conversion phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    /// Parse and sort only, print the result as JSON and write nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command line values win; the file fills in whatever was not given.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> ConverterConfig {
        let base = file.map(TomlConfig::to_converter_config).unwrap_or_default();

        let output_dir = self
            .output_dir
            .clone()
            .or_else(|| file.and_then(TomlConfig::output_directory))
            .unwrap_or_else(|| PathBuf::from("."));

        let output = self.output.clone().or_else(|| {
            file.and_then(TomlConfig::file_name)
                .map(|name| output_dir.join(name))
        });

        ConverterConfig {
            input: self.input.clone().or(base.input),
            output,
            output_dir,
            overwrite: self.force || base.overwrite,
            verbose: self.verbose || base.verbose,
            log_json: self.log_json || base.log_json,
            monitor: self.monitor || base.monitor,
        }
    }
}
