//! The generated service `Config` file and writing it into a crate

use crate::context::CodegenContext;
use crate::customize::{BoxedConfigCustomization, DecoratorRegistry, ServiceConfigSection};
use crate::dependency::{merge_dependencies, CargoDependency};
use crate::error::CodegenError;
use crate::template::indent;
use std::path::{Path, PathBuf};

/// A source file produced by the generator, plus the crates it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the generated crate's root.
    pub path: PathBuf,
    pub content: String,
    pub dependencies: Vec<CargoDependency>,
}

pub fn write_generated_files(files: &[GeneratedFile], crate_dir: &Path) -> Result<(), std::io::Error> {
    for file in files {
        let path = crate_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.content)?;
    }
    Ok(())
}

/// Renders `src/config.rs` for a service.
///
/// The file always holds a `Config` struct and its `Builder`; every
/// customization is asked for each [`ServiceConfigSection`] and its fragments
/// are spliced in, in customization order.
pub struct ServiceConfigGenerator {
    service_name: String,
    customizations: Vec<BoxedConfigCustomization>,
}

impl ServiceConfigGenerator {
    pub fn new(service_name: impl Into<String>, customizations: Vec<BoxedConfigCustomization>) -> Self {
        Self {
            service_name: service_name.into(),
            customizations,
        }
    }

    /// Generator whose customizations come from folding `registry` over an empty list.
    pub fn from_registry(ctx: &CodegenContext, registry: &DecoratorRegistry) -> Self {
        let customizations = registry.config_customizations(ctx, Vec::new());
        Self::new(ctx.service.name(), customizations)
    }

    pub fn customizations(&self) -> &[BoxedConfigCustomization] {
        &self.customizations
    }

    pub fn generate(&self) -> Result<GeneratedFile, CodegenError> {
        let mut dependencies = Vec::new();
        let mut sections: [Vec<String>; 5] = Default::default();

        for (parts, section) in sections.iter_mut().zip(ServiceConfigSection::ALL) {
            for customization in &self.customizations {
                if let Some(fragment) = customization.section(section)? {
                    tracing::trace!(
                        customization = customization.name(),
                        %section,
                        "spliced config fragment"
                    );
                    parts.push(fragment.code);
                    dependencies.extend(fragment.dependencies);
                }
            }
        }

        let [config_struct, config_impl, builder_struct, builder_impl, builder_build] = sections;

        let content = format!(
            r#"//! Service configuration for `{service}`

/// Configuration for a `{service}` client or server.
pub struct Config {{
{config_struct}}}

impl Config {{
    /// Constructs a config builder.
    pub fn builder() -> Builder {{
        Builder::default()
    }}
{config_impl}}}

/// Builder for [`Config`].
#[derive(Default)]
pub struct Builder {{
{builder_struct}}}

impl Builder {{
    /// Constructs a config builder.
    pub fn new() -> Self {{
        Self::default()
    }}
{builder_impl}
    /// Builds a [`Config`].
    pub fn build(self) -> Config {{
        Config {{
{builder_build}        }}
    }}
}}
"#,
            service = self.service_name,
            config_struct = splice(&config_struct, 4, false),
            config_impl = splice(&config_impl, 4, true),
            builder_struct = splice(&builder_struct, 4, false),
            builder_impl = splice(&builder_impl, 4, true),
            builder_build = splice(&builder_build, 12, false),
        );

        tracing::debug!(
            service = %self.service_name,
            customizations = self.customizations.len(),
            "generated service config"
        );

        Ok(GeneratedFile {
            path: PathBuf::from("src/config.rs"),
            content,
            dependencies: merge_dependencies(&dependencies),
        })
    }
}

/// Indent and join fragments for one section. Item sections get a blank line
/// before each fragment; field sections are packed.
fn splice(parts: &[String], spaces: usize, items: bool) -> String {
    let mut out = String::new();
    for part in parts {
        if items {
            out.push('\n');
        }
        out.push_str(&indent(part, spaces));
        out.push('\n');
    }
    out
}
