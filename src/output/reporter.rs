use super::*;
use crate::metadata::BuildMetadata;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::source::SourceGenerator;

pub struct Reporter {
    format: OutputFormat,
    output_path: PathBuf,
}

impl Reporter {
    pub fn new(format: OutputFormat, output_path: &Path) -> Self {
        Self {
            format,
            output_path: output_path.to_path_buf(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn generate_report(&mut self, metadata: &BuildMetadata) -> Result<()> {
        let content = match self.format {
            OutputFormat::Rust | OutputFormat::Go => {
                let mut generator = SourceGenerator::new(&self.format)?;
                generator.generate(metadata).await?
            }
            OutputFormat::Json => serde_json::to_string_pretty(metadata)?,
        };

        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;
        info!("Generated file saved to {}", self.output_path.display());
        Ok(())
    }
}
