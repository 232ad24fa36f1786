//! Decorators and the customizations they contribute
//!
//! A [`CodegenDecorator`] is a named, ordered extension that can rewrite the
//! list of [`ConfigCustomization`]s for a service and wrap the symbol provider
//! chain. The [`DecoratorRegistry`] folds every applicable decorator over
//! those inputs in ascending `order`, so each decorator sees the output of
//! the ones before it.

pub mod event_stream_signing;

pub use event_stream_signing::{NoOpEventStreamSigningConfig, NoOpEventStreamSigningDecorator};

use crate::context::CodegenContext;
use crate::error::CodegenError;
use crate::provider::{BaseSymbolProvider, BoxedSymbolProvider, EventStreamSymbols, SymbolProviderExt};
use crate::template::Fragment;
use std::fmt;

/// Insertion points of the generated service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceConfigSection {
    /// Fields of the `Config` struct.
    ConfigStruct,
    /// Methods of `impl Config`.
    ConfigImpl,
    /// Fields of the `Builder` struct.
    BuilderStruct,
    /// Methods of `impl Builder`.
    BuilderImpl,
    /// Field initializers inside `Builder::build`.
    BuilderBuild,
}

impl ServiceConfigSection {
    pub const ALL: [ServiceConfigSection; 5] = [
        ServiceConfigSection::ConfigStruct,
        ServiceConfigSection::ConfigImpl,
        ServiceConfigSection::BuilderStruct,
        ServiceConfigSection::BuilderImpl,
        ServiceConfigSection::BuilderBuild,
    ];
}

impl fmt::Display for ServiceConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceConfigSection::ConfigStruct => "config-struct",
            ServiceConfigSection::ConfigImpl => "config-impl",
            ServiceConfigSection::BuilderStruct => "builder-struct",
            ServiceConfigSection::BuilderImpl => "builder-impl",
            ServiceConfigSection::BuilderBuild => "builder-build",
        };
        f.write_str(name)
    }
}

/// Contributes source to named sections of the service configuration.
///
/// Returning `Ok(None)` means the customization has nothing for that section.
pub trait ConfigCustomization: Send + Sync {
    fn name(&self) -> &str;

    fn section(&self, section: ServiceConfigSection) -> Result<Option<Fragment>, CodegenError>;
}

pub type BoxedConfigCustomization = Box<dyn ConfigCustomization>;

pub trait CodegenDecorator: Send + Sync {
    fn name(&self) -> &str;

    /// Lower values run first. Ties keep registration order.
    fn order(&self) -> i8 {
        0
    }

    fn applies(&self, _ctx: &CodegenContext) -> bool {
        true
    }

    fn config_customizations(
        &self,
        _ctx: &CodegenContext,
        base: Vec<BoxedConfigCustomization>,
    ) -> Vec<BoxedConfigCustomization> {
        base
    }

    fn symbol_provider(&self, _ctx: &CodegenContext, base: BoxedSymbolProvider) -> BoxedSymbolProvider {
        base
    }
}

pub type BoxedDecorator = Box<dyn CodegenDecorator>;

/// Decorators sorted by `order`, ready to be folded over a generation run.
#[derive(Default)]
pub struct DecoratorRegistry {
    decorators: Vec<BoxedDecorator>,
}

impl DecoratorRegistry {
    pub fn new(decorators: Vec<BoxedDecorator>) -> Self {
        let mut registry = Self { decorators };
        registry.sort();
        registry
    }

    /// Registry holding the decorators every generation run uses.
    pub fn builtin() -> Self {
        Self::new(vec![Box::new(NoOpEventStreamSigningDecorator)])
    }

    pub fn register(&mut self, decorator: BoxedDecorator) -> &mut Self {
        self.decorators.push(decorator);
        self.sort();
        self
    }

    pub fn decorators(&self) -> &[BoxedDecorator] {
        &self.decorators
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    fn sort(&mut self) {
        // stable: equal orders keep registration order
        self.decorators.sort_by_key(|d| d.order());
    }

    fn applicable<'a>(&'a self, ctx: &'a CodegenContext) -> impl Iterator<Item = &'a BoxedDecorator> + 'a {
        self.decorators.iter().filter(move |d| {
            let applies = d.applies(ctx);
            if !applies {
                tracing::debug!(decorator = d.name(), service = %ctx.service, "decorator does not apply");
            }
            applies
        })
    }

    pub fn config_customizations(
        &self,
        ctx: &CodegenContext,
        base: Vec<BoxedConfigCustomization>,
    ) -> Vec<BoxedConfigCustomization> {
        self.applicable(ctx).fold(base, |customizations, decorator| {
            let before = customizations.len();
            let customizations = decorator.config_customizations(ctx, customizations);
            tracing::debug!(
                decorator = decorator.name(),
                before,
                after = customizations.len(),
                "applied config customizations"
            );
            customizations
        })
    }

    pub fn symbol_provider(&self, ctx: &CodegenContext, base: BoxedSymbolProvider) -> BoxedSymbolProvider {
        self.applicable(ctx)
            .fold(base, |provider, decorator| decorator.symbol_provider(ctx, provider))
    }
}

impl fmt::Debug for DecoratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.decorators.iter().map(|d| (d.name(), d.order())))
            .finish()
    }
}

/// The standard resolution chain for `ctx`: base mapping, event stream
/// wrapping, then whatever the registry's decorators add.
pub fn symbol_provider(ctx: &CodegenContext, registry: &DecoratorRegistry) -> BoxedSymbolProvider {
    let chain = BaseSymbolProvider::from_context(ctx)
        .wrap(EventStreamSymbols::from_context(ctx))
        .boxed();
    registry.symbol_provider(ctx, chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{SymbolProvider, SymbolTransform};
    use crate::symbol::Symbol;
    use crate::target::CodegenTarget;
    use shapegen_model::{Model, Shape, ShapeId, ShapeKind, SimpleType};
    use std::sync::{Arc, Mutex};

    struct Recording {
        name: &'static str,
        order: i8,
        applies: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl CodegenDecorator for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn order(&self) -> i8 {
            self.order
        }

        fn applies(&self, _ctx: &CodegenContext) -> bool {
            self.applies
        }

        fn config_customizations(
            &self,
            _ctx: &CodegenContext,
            base: Vec<BoxedConfigCustomization>,
        ) -> Vec<BoxedConfigCustomization> {
            self.log.lock().unwrap().push(self.name);
            base
        }

        fn symbol_provider(&self, _ctx: &CodegenContext, base: BoxedSymbolProvider) -> BoxedSymbolProvider {
            base.wrap(Suffix(self.name)).boxed()
        }
    }

    struct Suffix(&'static str);

    impl SymbolTransform for Suffix {
        fn transform(&self, _shape: &Shape, initial: Symbol) -> Result<Symbol, CodegenError> {
            Ok(initial.to_builder().name(format!("{}+{}", initial.name(), self.0)).build())
        }
    }

    fn ctx() -> CodegenContext {
        let service = ShapeId::new("example.chat", "ChatService");
        let model = Model::builder()
            .shape(Shape::new(
                service.clone(),
                ShapeKind::Service { operations: vec![] },
            ))
            .shape(Shape::simple(ShapeId::new("example.chat", "Room"), SimpleType::String))
            .build()
            .unwrap();
        CodegenContext::new(Arc::new(model), service, CodegenTarget::Client).unwrap()
    }

    fn recording(
        name: &'static str,
        order: i8,
        applies: bool,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> BoxedDecorator {
        Box::new(Recording {
            name,
            order,
            applies,
            log: log.clone(),
        })
    }

    #[test]
    fn test_registry_orders_by_order_then_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = DecoratorRegistry::new(vec![
            recording("late", 10, true, &log),
            recording("first-zero", 0, true, &log),
            recording("early", -5, true, &log),
        ]);
        registry.register(recording("second-zero", 0, true, &log));

        let names: Vec<&str> = registry.decorators().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["early", "first-zero", "second-zero", "late"]);

        registry.config_customizations(&ctx(), Vec::new());
        assert_eq!(
            *log.lock().unwrap(),
            vec!["early", "first-zero", "second-zero", "late"]
        );
    }

    #[test]
    fn test_non_applicable_decorators_are_skipped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = DecoratorRegistry::new(vec![
            recording("on", 0, true, &log),
            recording("off", 1, false, &log),
        ]);
        registry.config_customizations(&ctx(), Vec::new());
        assert_eq!(*log.lock().unwrap(), vec!["on"]);
    }

    #[test]
    fn test_symbol_provider_fold_wraps_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = DecoratorRegistry::new(vec![
            recording("b", 2, true, &log),
            recording("a", 1, true, &log),
        ]);
        let ctx = ctx();
        let provider = symbol_provider(&ctx, &registry);
        let room = ctx
            .model
            .expect_shape(&ShapeId::new("example.chat", "Room"))
            .unwrap();
        assert_eq!(provider.to_symbol(room).unwrap().name(), "String+a+b");
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let registry = DecoratorRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.config_customizations(&ctx(), Vec::new()).is_empty());
    }
}
