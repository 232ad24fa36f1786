//! Default mapping from shapes to Rust symbols

use crate::config::ModulePaths;
use crate::context::CodegenContext;
use crate::dependency::CargoDependency;
use crate::error::CodegenError;
use crate::provider::SymbolProvider;
use crate::rust_type::RustType;
use crate::symbol::Symbol;
use shapegen_model::utils::to_pascal_case;
use shapegen_model::{Model, Shape, ShapeKind, SimpleType};
use std::sync::Arc;

/// Maps every shape kind to its plain Rust representation.
///
/// Structure members are wrapped in `Option` unless marked required;
/// union members are not.
pub struct BaseSymbolProvider {
    model: Arc<Model>,
    modules: ModulePaths,
}

impl BaseSymbolProvider {
    pub fn new(model: Arc<Model>, modules: ModulePaths) -> Self {
        Self { model, modules }
    }

    pub fn from_context(ctx: &CodegenContext) -> Self {
        Self::new(ctx.model.clone(), ctx.modules.clone())
    }

    fn simple_symbol(&self, simple: SimpleType) -> Symbol {
        let rust_type = match simple {
            SimpleType::Blob => RustType::vec(RustType::Integer { bits: 8 }),
            SimpleType::Boolean => RustType::Bool,
            SimpleType::String => RustType::String,
            SimpleType::Byte => RustType::Integer { bits: 8 },
            SimpleType::Short => RustType::Integer { bits: 16 },
            SimpleType::Integer => RustType::Integer { bits: 32 },
            SimpleType::Long => RustType::Integer { bits: 64 },
            SimpleType::Float => RustType::Float { bits: 32 },
            SimpleType::Double => RustType::Float { bits: 64 },
            SimpleType::Timestamp => RustType::opaque("SystemTime", "std::time"),
            SimpleType::Document => {
                return Symbol::builder(RustType::opaque("Value", "serde_json"))
                    .namespace("serde_json")
                    .add_dependency(CargoDependency::crates_io("serde_json", "1"))
                    .build();
            }
        };
        Symbol::builder(rust_type).build()
    }

    fn aggregate_namespace(&self, shape: &Shape) -> &str {
        if shape.traits.synthetic_input().is_some() {
            &self.modules.input
        } else if shape.traits.synthetic_output().is_some() {
            &self.modules.output
        } else if shape.traits.error_fault().is_some() {
            &self.modules.error
        } else {
            &self.modules.model
        }
    }

    fn named_symbol(&self, shape: &Shape, namespace: &str) -> Symbol {
        let name = to_pascal_case(shape.id.name());
        Symbol::builder(RustType::opaque(name, namespace))
            .namespace(namespace)
            .documentation(shape.traits.documentation().map(str::to_string))
            .build()
    }

    /// A collection type embedding `members`, carrying their metadata along.
    fn collection_symbol(&self, rust_type: RustType, members: Vec<Symbol>) -> Symbol {
        let mut builder = Symbol::builder(rust_type);
        for member in members {
            builder = builder
                .add_dependencies(member.dependencies())
                .add_reference(member);
        }
        builder.build()
    }

    fn member_symbol(&self, member: &Shape, target: &Shape) -> Result<Symbol, CodegenError> {
        let target_symbol = self.to_symbol(target)?;
        let container = match member.container() {
            Some(id) => Some(self.model.expect_shape(&id)?),
            None => None,
        };
        let in_union = container.is_some_and(|c| matches!(c.kind, ShapeKind::Union { .. }));
        let documentation = member
            .traits
            .documentation()
            .or(target_symbol.documentation())
            .map(str::to_string);

        if in_union || member.traits.is_required() {
            return Ok(target_symbol.to_builder().documentation(documentation).build());
        }

        Ok(Symbol::builder(RustType::option(target_symbol.rust_type().clone()))
            .namespace(target_symbol.namespace())
            .add_dependencies(target_symbol.dependencies())
            .documentation(documentation)
            .add_reference(target_symbol)
            .build())
    }
}

impl SymbolProvider for BaseSymbolProvider {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError> {
        match &shape.kind {
            ShapeKind::Simple { simple } => Ok(self.simple_symbol(*simple)),
            ShapeKind::List { member } => {
                let member = self.to_symbol(self.model.expect_shape(member)?)?;
                let rust_type = RustType::vec(member.rust_type().clone());
                Ok(self.collection_symbol(rust_type, vec![member]))
            }
            ShapeKind::Map { key, value } => {
                let key = self.to_symbol(self.model.expect_shape(key)?)?;
                let value = self.to_symbol(self.model.expect_shape(value)?)?;
                let rust_type = RustType::HashMap {
                    key: Box::new(key.rust_type().clone()),
                    value: Box::new(value.rust_type().clone()),
                };
                Ok(self.collection_symbol(rust_type, vec![key, value]))
            }
            ShapeKind::Structure { .. } | ShapeKind::Union { .. } => {
                Ok(self.named_symbol(shape, self.aggregate_namespace(shape)))
            }
            ShapeKind::Operation { .. } => Ok(self.named_symbol(shape, &self.modules.operation)),
            ShapeKind::Service { .. } => Ok(self.named_symbol(shape, "crate")),
            ShapeKind::Member { target } => {
                let target = self.model.expect_shape(target)?;
                self.member_symbol(shape, target)
            }
        }
    }
}
