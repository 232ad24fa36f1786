//! # shapegen-codegen
//!
//! Symbol resolution and customization pipeline for shapegen.
//!
//! Given a [`Model`](shapegen_model::Model) and a service to generate, this
//! crate decides what Rust type every shape becomes and which extra code gets
//! spliced into the generated service:
//!
//! - **Symbol providers** - A base mapping wrapped by stages such as event
//!   stream `Sender` / `Receiver` wrapping
//! - **Decorators** - Ordered extensions that contribute config
//!   customizations and wrap the provider chain
//! - **Service config** - Renders `src/config.rs` with every customization applied
//!
//! ## Example
//!
//! ```rust,ignore
//! use shapegen_codegen::{symbol_provider, CodegenContext, CodegenTarget, DecoratorRegistry};
//!
//! let model = Arc::new(normalize_operations(&model)?);
//! let ctx = CodegenContext::new(model, service_id, CodegenTarget::Client)?;
//! let registry = DecoratorRegistry::builtin();
//!
//! let provider = symbol_provider(&ctx, &registry);
//! let symbol = provider.to_symbol(shape)?;
//! let config_rs = ServiceConfigGenerator::from_registry(&ctx, &registry).generate()?;
//! ```

pub mod config;
pub mod context;
pub mod customize;
pub mod dependency;
pub mod error;
pub mod provider;
pub mod rust_type;
pub mod service_config;
pub mod symbol;
pub mod target;
pub mod template;

pub use config::{CodegenConfig, ModulePaths, RuntimeConfig};
pub use context::CodegenContext;
pub use customize::{
    symbol_provider, CodegenDecorator, ConfigCustomization, DecoratorRegistry,
    NoOpEventStreamSigningDecorator, ServiceConfigSection,
};
pub use dependency::CargoDependency;
pub use error::CodegenError;
pub use provider::{
    BaseSymbolProvider, BoxedSymbolProvider, EventStreamSymbolProvider, EventStreamSymbols,
    SymbolProvider, SymbolProviderExt, SymbolTransform, Wrapping,
};
pub use rust_type::RustType;
pub use service_config::{write_generated_files, GeneratedFile, ServiceConfigGenerator};
pub use symbol::{RuntimeType, Symbol};
pub use target::CodegenTarget;
pub use template::{render_template, CodegenScope, Fragment};
