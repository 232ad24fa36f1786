//! Run configuration loaded from `shapegen.toml`

use crate::dependency::{CargoDependency, DependencyLocation};
use crate::target::CodegenTarget;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shapegen_model::ShapeId;
use std::fs;
use std::path::Path;

pub const DEFAULT_RUNTIME_CRATE: &str = "shapegen-runtime";
pub const DEFAULT_RUNTIME_VERSION: &str = "0.1";

/// Main configuration structure for shapegen.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenConfig {
    pub codegen: CodegenSettings,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Settings for a single generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenSettings {
    /// Service shape to generate, e.g. `example.chat#ChatService`
    pub service: ShapeId,

    #[serde(default)]
    pub target: CodegenTarget,

    #[serde(default)]
    pub modules: ModulePaths,
}

/// Where generated items live inside the generated crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePaths {
    #[serde(default = "default_model_module")]
    pub model: String,
    #[serde(default = "default_input_module")]
    pub input: String,
    #[serde(default = "default_output_module")]
    pub output: String,
    #[serde(default = "default_error_module")]
    pub error: String,
    #[serde(default = "default_operation_module")]
    pub operation: String,
}

fn default_model_module() -> String {
    "crate::model".to_string()
}

fn default_input_module() -> String {
    "crate::input".to_string()
}

fn default_output_module() -> String {
    "crate::output".to_string()
}

fn default_error_module() -> String {
    "crate::error".to_string()
}

fn default_operation_module() -> String {
    "crate::operation".to_string()
}

impl Default for ModulePaths {
    fn default() -> Self {
        Self {
            model: default_model_module(),
            input: default_input_module(),
            output: default_output_module(),
            error: default_error_module(),
            operation: default_operation_module(),
        }
    }
}

/// Which runtime crate generated code depends on, and where it comes from.
///
/// At most one of `version` and `path` may be set; with neither, the
/// published default version is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_runtime_crate")]
    pub crate_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn default_runtime_crate() -> String {
    DEFAULT_RUNTIME_CRATE.to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            crate_name: default_runtime_crate(),
            version: None,
            path: None,
        }
    }
}

impl RuntimeConfig {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Dependency declaration for the runtime crate, without optional features.
    pub fn runtime_crate(&self) -> CargoDependency {
        let location = match (&self.path, &self.version) {
            (Some(path), _) => DependencyLocation::Local { path: path.clone() },
            (None, Some(version)) => DependencyLocation::CratesIo {
                version: version.clone(),
            },
            (None, None) => DependencyLocation::CratesIo {
                version: DEFAULT_RUNTIME_VERSION.to_string(),
            },
        };
        CargoDependency::new(self.crate_name.clone(), location)
    }

    /// The crate's name as written in Rust paths.
    pub fn crate_ident(&self) -> String {
        self.crate_name.replace('-', "_")
    }

    pub fn validate(&self) -> Result<()> {
        if self.crate_name.is_empty() {
            anyhow::bail!("Runtime crate name cannot be empty");
        }
        if self.version.is_some() && self.path.is_some() {
            anyhow::bail!(
                "Runtime crate '{}' sets both version and path; choose one",
                self.crate_name
            );
        }
        Ok(())
    }
}

impl CodegenConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            service = %config.codegen.service,
            target = %config.codegen.target,
            "loaded codegen config"
        );
        Ok(config)
    }

    /// Try to load config, returning None if file doesn't exist
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CodegenConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.runtime.validate()?;

        let modules = &self.codegen.modules;
        for (label, module) in [
            ("model", &modules.model),
            ("input", &modules.input),
            ("output", &modules.output),
            ("error", &modules.error),
            ("operation", &modules.operation),
        ] {
            if module.is_empty() {
                anyhow::bail!("Module path for {} cannot be empty", label);
            }
        }

        Ok(())
    }
}
