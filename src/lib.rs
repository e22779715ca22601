pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, ConverterConfig};

pub use crate::core::{etl::EtlEngine, pipeline::ReportPipeline};
pub use utils::error::{ConvertError, Result};
