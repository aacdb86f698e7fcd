use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::{self, OutputFormat};

const ENV_PREFIX: &str = "GENVER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub commands: CommandConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub app_name: String,
    pub package: String,
    pub file_name: String,
    pub directory: PathBuf,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub log: String,
    pub hostname: String,
    /// Falls back to the output format's toolchain when unset
    pub toolchain: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            app_name: "foo".to_string(),
            package: "main".to_string(),
            file_name: "version".to_string(),
            directory: PathBuf::from("."),
            format: "rust".to_string(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            log: "git log --stat".to_string(),
            hostname: "hostname".to_string(),
            toolchain: None,
        }
    }
}

impl Config {
    /// Layer defaults, the optional config file and `GENVER_*` environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

impl OutputConfig {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }

    /// Destination of the generated file, with the format's extension
    pub fn output_path(&self) -> PathBuf {
        let file_name = output::add_file_extension(&self.file_name, &self.output_format());
        self.directory.join(file_name)
    }
}

impl CommandConfig {
    pub fn toolchain_command(&self, format: &OutputFormat) -> String {
        self.toolchain
            .clone()
            .unwrap_or_else(|| format.toolchain_command().to_string())
    }
}
