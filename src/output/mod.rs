use anyhow::Result;

pub mod reporter;
pub mod source;

pub use reporter::Reporter;

use crate::metadata::BuildMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rust,
    Go,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => OutputFormat::Rust,
            "go" | "golang" => OutputFormat::Go,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Rust,
        }
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Rust => ".rs",
            OutputFormat::Go => ".go",
            OutputFormat::Json => ".json",
        }
    }

    /// Embedded template rendering this format, if it is template based
    pub fn template_name(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Rust => Some("rust.tera"),
            OutputFormat::Go => Some("go.tera"),
            OutputFormat::Json => None,
        }
    }

    /// Command reporting the toolchain the generated file is built with
    pub fn toolchain_command(&self) -> &'static str {
        match self {
            OutputFormat::Go => "go version",
            OutputFormat::Rust | OutputFormat::Json => "rustc --version",
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = format.extension();

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

pub trait OutputGenerator {
    async fn generate(&mut self, metadata: &BuildMetadata) -> Result<String>;
}
