//! Per-run generation context

use crate::config::{CodegenConfig, ModulePaths, RuntimeConfig};
use crate::error::CodegenError;
use crate::target::CodegenTarget;
use shapegen_model::{Model, Shape, ShapeId, ShapeKind};
use std::sync::Arc;

/// Everything fixed for one generation run.
#[derive(Debug, Clone)]
pub struct CodegenContext {
    pub model: Arc<Model>,
    pub service: ShapeId,
    pub target: CodegenTarget,
    pub runtime_config: RuntimeConfig,
    pub modules: ModulePaths,
}

impl CodegenContext {
    pub fn new(
        model: Arc<Model>,
        service: ShapeId,
        target: CodegenTarget,
    ) -> Result<Self, CodegenError> {
        let shape = model.expect_shape(&service)?;
        if !matches!(shape.kind, ShapeKind::Service { .. }) {
            return Err(CodegenError::NotAService(service.to_string()));
        }

        Ok(Self {
            model,
            service,
            target,
            runtime_config: RuntimeConfig::default(),
            modules: ModulePaths::default(),
        })
    }

    pub fn from_config(model: Arc<Model>, config: &CodegenConfig) -> Result<Self, CodegenError> {
        Ok(Self::new(model, config.codegen.service.clone(), config.codegen.target)?
            .with_runtime_config(config.runtime.clone())
            .with_modules(config.codegen.modules.clone()))
    }

    pub fn with_runtime_config(mut self, runtime_config: RuntimeConfig) -> Self {
        self.runtime_config = runtime_config;
        self
    }

    pub fn with_modules(mut self, modules: ModulePaths) -> Self {
        self.modules = modules;
        self
    }

    pub fn service_shape(&self) -> Result<&Shape, CodegenError> {
        Ok(self.model.expect_shape(&self.service)?)
    }
}
