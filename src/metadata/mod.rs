use chrono::{DateTime, Local};
use serde::Serialize;

pub mod collector;
pub mod command;

pub use collector::MetadataCollector;

use crate::git::ContributorList;

/// Everything embedded into the generated file.
#[derive(Debug, Clone, Serialize)]
pub struct BuildMetadata {
    pub app_name: String,
    pub package: String,
    pub version: String,
    pub build_host: String,
    pub toolchain_version: String,
    pub timestamp: DateTime<Local>,
    pub contributors: ContributorList,
}

impl BuildMetadata {
    /// Build time as embedded in the generated constants, with a numeric UTC offset
    pub fn build_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }

    /// Full-precision timestamp for the generated file header
    pub fn generated_at(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S%.f %z").to_string()
    }
}
