use super::*;
use crate::metadata::BuildMetadata;
use anyhow::Result;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.tera"]
struct Templates;

/// Renders build metadata as source code through the embedded templates.
pub struct SourceGenerator {
    tera: Tera,
    template: &'static str,
}

impl SourceGenerator {
    pub fn new(format: &OutputFormat) -> Result<Self> {
        let template = format
            .template_name()
            .ok_or_else(|| anyhow::anyhow!("{:?} output is not template based", format))?;

        let mut tera = Tera::default();

        // Load templates from embedded resources
        for file in Templates::iter() {
            let template_name = file.as_ref();
            let template_content = Templates::get(template_name)
                .ok_or_else(|| anyhow::anyhow!("Template {} not found", template_name))?;
            let template_str = std::str::from_utf8(&template_content.data)
                .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in template {}: {}", template_name, e))?;

            tera.add_raw_template(template_name, template_str)
                .map_err(|e| anyhow::anyhow!("Failed to add template {}: {}", template_name, e))?;
        }

        tera.register_filter("rust_str", Self::rust_str_filter);
        tera.register_filter("go_str", Self::go_str_filter);

        Ok(Self { tera, template })
    }

    fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
        value
            .as_str()
            .ok_or_else(|| tera::Error::msg(format!("Filter `{}` expects a string", filter)))
    }

    /// Debug formatting of `str` is a valid Rust string literal.
    fn rust_str_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let s = Self::string_arg(value, "rust_str")?;
        Ok(Value::String(format!("{:?}", s)))
    }

    /// JSON string escaping is accepted by Go's interpreted string literals.
    fn go_str_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let s = Self::string_arg(value, "go_str")?;
        let quoted = serde_json::to_string(s).map_err(tera::Error::json)?;
        Ok(Value::String(quoted))
    }

    fn prepare_template_context(&self, metadata: &BuildMetadata) -> Context {
        let mut context = Context::new();

        context.insert("generated_at", &metadata.generated_at());
        context.insert("build_time", &metadata.build_time());
        context.insert("package", &metadata.package);
        context.insert("app_name", &metadata.app_name);
        context.insert("version", &metadata.version);
        context.insert("toolchain_version", &metadata.toolchain_version);
        context.insert("build_host", &metadata.build_host);
        context.insert("contributors", &metadata.contributors);

        context
    }
}

impl OutputGenerator for SourceGenerator {
    async fn generate(&mut self, metadata: &BuildMetadata) -> Result<String> {
        let context = self.prepare_template_context(metadata);

        self.tera
            .render(self.template, &context)
            .map_err(|e| anyhow::anyhow!("Failed to render template {}: {:?}", self.template, e))
    }
}
