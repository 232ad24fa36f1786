//! Default event stream signing hook for services with streaming operations

use crate::config::RuntimeConfig;
use crate::context::CodegenContext;
use crate::customize::{BoxedConfigCustomization, CodegenDecorator, ConfigCustomization, ServiceConfigSection};
use crate::error::CodegenError;
use crate::symbol::RuntimeType;
use crate::template::{render_template, CodegenScope, Fragment};

/// Adds `new_event_stream_signer()` to the config of services that have at
/// least one event stream operation. The signer it returns leaves every
/// message untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventStreamSigningDecorator;

impl CodegenDecorator for NoOpEventStreamSigningDecorator {
    fn name(&self) -> &str {
        "EventStreamDecorator"
    }

    fn order(&self) -> i8 {
        0
    }

    fn applies(&self, ctx: &CodegenContext) -> bool {
        ctx.service_shape()
            .is_ok_and(|service| ctx.model.has_event_stream_operations(service))
    }

    fn config_customizations(
        &self,
        ctx: &CodegenContext,
        mut base: Vec<BoxedConfigCustomization>,
    ) -> Vec<BoxedConfigCustomization> {
        if !self.applies(ctx) {
            return base;
        }
        base.push(Box::new(NoOpEventStreamSigningConfig::new(&ctx.runtime_config)));
        base
    }
}

const SIGNER_METHOD: &str = r#"
    /// Creates a new Event Stream `SignMessage` implementor.
    pub fn new_event_stream_signer(
        &self,
        _properties: #{SharedPropertyBag}
    ) -> impl #{SignMessage} {
        #{NoOpSigner}
    }
"#;

pub struct NoOpEventStreamSigningConfig {
    scope: CodegenScope,
}

impl NoOpEventStreamSigningConfig {
    pub fn new(runtime_config: &RuntimeConfig) -> Self {
        Self {
            scope: CodegenScope::new()
                .with("NoOpSigner", RuntimeType::no_op_signer(runtime_config))
                .with("SharedPropertyBag", RuntimeType::shared_property_bag(runtime_config))
                .with("SignMessage", RuntimeType::sign_message(runtime_config)),
        }
    }
}

impl ConfigCustomization for NoOpEventStreamSigningConfig {
    fn name(&self) -> &str {
        "NoOpEventStreamSigningConfig"
    }

    fn section(&self, section: ServiceConfigSection) -> Result<Option<Fragment>, CodegenError> {
        match section {
            ServiceConfigSection::ConfigImpl => render_template(SIGNER_METHOD, &self.scope).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::CodegenTarget;
    use shapegen_model::{AggregateBuilder, Model, Shape, ShapeId, ShapeKind, Trait};
    use std::sync::Arc;

    fn id(name: &str) -> ShapeId {
        ShapeId::new("example.chat", name)
    }

    fn ctx(streaming: bool) -> CodegenContext {
        let member_traits = if streaming { vec![Trait::Streaming] } else { vec![] };
        let model = Model::builder()
            .shape(Shape::new(
                id("ChatService"),
                ShapeKind::Service {
                    operations: vec![id("Chat")],
                },
            ))
            .shape(Shape::new(
                id("Chat"),
                ShapeKind::Operation {
                    input: Some(id("ChatInput")),
                    output: None,
                    errors: vec![],
                },
            ))
            .shapes(
                AggregateBuilder::structure(id("ChatInput"))
                    .member_with_traits("messages", id("ChatMessage"), member_traits)
                    .build(),
            )
            .shapes(AggregateBuilder::union(id("ChatMessage")).build())
            .build()
            .unwrap();
        CodegenContext::new(Arc::new(model), id("ChatService"), CodegenTarget::Client).unwrap()
    }

    #[test]
    fn test_applies_only_to_streaming_services() {
        assert!(NoOpEventStreamSigningDecorator.applies(&ctx(true)));
        assert!(!NoOpEventStreamSigningDecorator.applies(&ctx(false)));
    }

    #[test]
    fn test_appends_after_existing_customizations() {
        let ctx = ctx(true);
        let first = NoOpEventStreamSigningDecorator.config_customizations(&ctx, Vec::new());
        let second = NoOpEventStreamSigningDecorator.config_customizations(&ctx, first);
        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|c| c.name() == "NoOpEventStreamSigningConfig"));
    }

    #[test]
    fn test_non_streaming_service_leaves_customizations_unchanged() {
        let ctx = ctx(false);
        let none = NoOpEventStreamSigningDecorator.config_customizations(&ctx, Vec::new());
        assert!(none.is_empty());

        let base: Vec<BoxedConfigCustomization> =
            vec![Box::new(NoOpEventStreamSigningConfig::new(&ctx.runtime_config))];
        let unchanged = NoOpEventStreamSigningDecorator.config_customizations(&ctx, base);
        assert_eq!(unchanged.len(), 1);
    }

    #[test]
    fn test_signer_method_fragment() {
        let config = NoOpEventStreamSigningConfig::new(&RuntimeConfig::default());
        let fragment = config
            .section(ServiceConfigSection::ConfigImpl)
            .unwrap()
            .expect("config impl fragment");

        assert!(fragment
            .code
            .starts_with("/// Creates a new Event Stream `SignMessage` implementor.\npub fn new_event_stream_signer("));
        assert!(fragment
            .code
            .contains("_properties: shapegen_runtime::property_bag::SharedPropertyBag"));
        assert!(fragment
            .code
            .contains(") -> impl shapegen_runtime::frame::SignMessage {"));
        assert!(fragment.code.contains("    shapegen_runtime::frame::NoOpSigner\n}"));
        assert_eq!(fragment.dependencies.len(), 1);
        assert_eq!(fragment.dependencies[0].name, "shapegen-runtime");

        for section in [
            ServiceConfigSection::ConfigStruct,
            ServiceConfigSection::BuilderStruct,
            ServiceConfigSection::BuilderImpl,
            ServiceConfigSection::BuilderBuild,
        ] {
            assert!(config.section(section).unwrap().is_none());
        }
    }
}
