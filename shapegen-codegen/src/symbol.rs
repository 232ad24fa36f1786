//! Resolved symbols and the runtime items generated code refers to

use crate::config::RuntimeConfig;
use crate::dependency::{merge_dependencies, CargoDependency};
use crate::rust_type::RustType;
use serde::Serialize;

/// The resolved representation of a shape in generated code.
///
/// `references` holds every symbol this one embeds, so an emitter walking
/// [`Symbol::transitive_references`] sees every type that needs importing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    name: String,
    namespace: String,
    rust_type: RustType,
    dependencies: Vec<CargoDependency>,
    references: Vec<Symbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation: Option<String>,
}

impl Symbol {
    pub fn builder(rust_type: RustType) -> SymbolBuilder {
        SymbolBuilder {
            name: rust_type.render(false),
            namespace: String::new(),
            rust_type,
            dependencies: Vec::new(),
            references: Vec::new(),
            documentation: None,
        }
    }

    /// A builder seeded with this symbol's contents.
    pub fn to_builder(&self) -> SymbolBuilder {
        SymbolBuilder {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            rust_type: self.rust_type.clone(),
            dependencies: self.dependencies.clone(),
            references: self.references.clone(),
            documentation: self.documentation.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn rust_type(&self) -> &RustType {
        &self.rust_type
    }

    pub fn dependencies(&self) -> &[CargoDependency] {
        &self.dependencies
    }

    pub fn references(&self) -> &[Symbol] {
        &self.references
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// Every symbol reachable through references, depth first, without repeats.
    pub fn transitive_references(&self) -> Vec<&Symbol> {
        let mut seen: Vec<&Symbol> = Vec::new();
        let mut stack: Vec<&Symbol> = self.references.iter().rev().collect();
        while let Some(symbol) = stack.pop() {
            if seen.contains(&symbol) {
                continue;
            }
            seen.push(symbol);
            stack.extend(symbol.references.iter().rev());
        }
        seen
    }

    /// Dependencies of this symbol and everything it references, merged per crate.
    pub fn all_dependencies(&self) -> Vec<CargoDependency> {
        let refs = self.transitive_references();
        let all = self
            .dependencies
            .iter()
            .chain(refs.iter().flat_map(|s| s.dependencies.iter()));
        merge_dependencies(all)
    }
}

#[derive(Debug, Clone)]
pub struct SymbolBuilder {
    name: String,
    namespace: String,
    rust_type: RustType,
    dependencies: Vec<CargoDependency>,
    references: Vec<Symbol>,
    documentation: Option<String>,
}

impl SymbolBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn rust_type(mut self, rust_type: RustType) -> Self {
        self.rust_type = rust_type;
        self
    }

    pub fn add_dependency(mut self, dependency: CargoDependency) -> Self {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn add_dependencies<'a>(mut self, deps: impl IntoIterator<Item = &'a CargoDependency>) -> Self {
        for dep in deps {
            self = self.add_dependency(dep.clone());
        }
        self
    }

    pub fn add_reference(mut self, symbol: Symbol) -> Self {
        if !self.references.contains(&symbol) {
            self.references.push(symbol);
        }
        self
    }

    pub fn documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation;
        self
    }

    pub fn build(self) -> Symbol {
        Symbol {
            name: self.name,
            namespace: self.namespace,
            rust_type: self.rust_type,
            dependencies: self.dependencies,
            references: self.references,
            documentation: self.documentation,
        }
    }
}

/// A named item exported by a crate that generated code depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeType {
    pub name: String,
    pub namespace: String,
    pub dependency: Option<CargoDependency>,
}

impl RuntimeType {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        dependency: Option<CargoDependency>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            dependency,
        }
    }

    pub fn full_path(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    pub fn rust_type(&self) -> RustType {
        RustType::opaque(self.name.clone(), self.namespace.clone())
    }

    pub fn to_symbol(&self) -> Symbol {
        let builder = Symbol::builder(self.rust_type()).namespace(self.namespace.clone());
        match &self.dependency {
            Some(dep) => builder.add_dependency(dep.clone()).build(),
            None => builder.build(),
        }
    }

    fn in_runtime(config: &RuntimeConfig, module: &str, name: &str, feature: Option<&str>) -> Self {
        let dep = config.runtime_crate();
        let dep = match feature {
            Some(feature) => dep.with_feature(feature),
            None => dep,
        };
        Self::new(
            name,
            format!("{}::{}", config.crate_ident(), module),
            Some(dep),
        )
    }

    pub fn event_stream_sender(config: &RuntimeConfig) -> Self {
        Self::in_runtime(config, "event_stream", "Sender", Some(EVENT_STREAM_FEATURE))
    }

    pub fn event_stream_receiver(config: &RuntimeConfig) -> Self {
        Self::in_runtime(config, "event_stream", "Receiver", Some(EVENT_STREAM_FEATURE))
    }

    pub fn message_stream_error(config: &RuntimeConfig) -> Self {
        Self::in_runtime(
            config,
            "event_stream",
            "MessageStreamError",
            Some(EVENT_STREAM_FEATURE),
        )
    }

    pub fn no_op_signer(config: &RuntimeConfig) -> Self {
        Self::in_runtime(config, "frame", "NoOpSigner", None)
    }

    pub fn sign_message(config: &RuntimeConfig) -> Self {
        Self::in_runtime(config, "frame", "SignMessage", None)
    }

    pub fn shared_property_bag(config: &RuntimeConfig) -> Self {
        Self::in_runtime(config, "property_bag", "SharedPropertyBag", None)
    }
}

/// Cargo feature of the runtime crate that enables event stream channels.
pub const EVENT_STREAM_FEATURE: &str = "event-stream";

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Symbol {
        Symbol::builder(RustType::opaque("ChatMessage", "crate::model"))
            .namespace("crate::model")
            .build()
    }

    #[test]
    fn test_builder_defaults_name_from_type() {
        let symbol = message();
        assert_eq!(symbol.name(), "ChatMessage");
        assert_eq!(symbol.namespace(), "crate::model");
        assert!(symbol.references().is_empty());
    }

    #[test]
    fn test_references_and_dependencies_are_sets() {
        let dep = CargoDependency::crates_io("serde_json", "1");
        let symbol = Symbol::builder(RustType::vec(message().rust_type().clone()))
            .add_reference(message())
            .add_reference(message())
            .add_dependency(dep.clone())
            .add_dependency(dep)
            .build();
        assert_eq!(symbol.references().len(), 1);
        assert_eq!(symbol.dependencies().len(), 1);
    }

    #[test]
    fn test_transitive_references_and_dependencies() {
        let config = RuntimeConfig::default();
        let error = RuntimeType::message_stream_error(&config).to_symbol();
        let optional = Symbol::builder(RustType::option(message().rust_type().clone()))
            .add_reference(message())
            .build();
        let outer = Symbol::builder(RustType::Unit)
            .add_reference(optional.clone())
            .add_reference(error.clone())
            .add_dependency(config.runtime_crate())
            .build();

        let refs: Vec<&str> = outer
            .transitive_references()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(refs, vec!["Option<ChatMessage>", "ChatMessage", "MessageStreamError"]);

        let deps = outer.all_dependencies();
        assert_eq!(deps.len(), 1);
        assert!(deps[0].features.contains(EVENT_STREAM_FEATURE));
    }

    #[test]
    fn test_symbol_serializes_for_inspection() {
        let config = RuntimeConfig::default();
        let symbol = RuntimeType::event_stream_sender(&config).to_symbol();
        let json = serde_json::to_value(&symbol).unwrap();

        assert_eq!(json["name"], "Sender");
        assert_eq!(json["namespace"], "shapegen_runtime::event_stream");
        assert_eq!(json["dependencies"][0]["name"], "shapegen-runtime");
        assert_eq!(json["dependencies"][0]["features"][0], "event-stream");
        assert!(json.get("documentation").is_none());
    }

    #[test]
    fn test_runtime_type_paths() {
        let config = RuntimeConfig::default();
        let signer = RuntimeType::no_op_signer(&config);
        assert_eq!(signer.full_path(), "shapegen_runtime::frame::NoOpSigner");

        let sender = RuntimeType::event_stream_sender(&config);
        assert_eq!(sender.full_path(), "shapegen_runtime::event_stream::Sender");
        assert!(sender
            .dependency
            .as_ref()
            .is_some_and(|d| d.features.contains(EVENT_STREAM_FEATURE)));

        let symbol = RuntimeType::shared_property_bag(&config).to_symbol();
        assert_eq!(symbol.name(), "SharedPropertyBag");
        assert_eq!(
            symbol.rust_type().render(true),
            "shapegen_runtime::property_bag::SharedPropertyBag"
        );
    }
}
