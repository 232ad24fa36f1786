//! Target-language type descriptors

use serde::Serialize;

/// A Rust type as it will appear in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RustType {
    Unit,
    Bool,
    String,
    Integer { bits: u8 },
    Float { bits: u8 },
    Vec { member: Box<RustType> },
    HashMap { key: Box<RustType>, value: Box<RustType> },
    Option { member: Box<RustType> },
    Box { member: Box<RustType> },
    /// A named type, optionally living at `namespace` (e.g. `crate::model`).
    Opaque {
        name: String,
        namespace: Option<String>,
    },
    /// A named generic type applied to arguments, e.g. `Sender<T>`.
    Generic {
        name: String,
        namespace: Option<String>,
        args: Vec<RustType>,
    },
}

impl RustType {
    pub fn opaque(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        RustType::Opaque {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    pub fn option(member: RustType) -> Self {
        RustType::Option {
            member: Box::new(member),
        }
    }

    pub fn vec(member: RustType) -> Self {
        RustType::Vec {
            member: Box::new(member),
        }
    }

    /// Removes one level of `Option`, if present.
    pub fn strip_outer_option(&self) -> &RustType {
        match self {
            RustType::Option { member } => member,
            other => other,
        }
    }

    /// Render the type as source text.
    ///
    /// With `fully_qualified`, named types carry their namespace and
    /// `HashMap` is spelled out as `std::collections::HashMap`.
    pub fn render(&self, fully_qualified: bool) -> String {
        match self {
            RustType::Unit => "()".to_string(),
            RustType::Bool => "bool".to_string(),
            RustType::String => "String".to_string(),
            RustType::Integer { bits } => format!("i{}", bits),
            RustType::Float { bits } => format!("f{}", bits),
            RustType::Vec { member } => format!("Vec<{}>", member.render(fully_qualified)),
            RustType::HashMap { key, value } => {
                let prefix = if fully_qualified {
                    "std::collections::"
                } else {
                    ""
                };
                format!(
                    "{}HashMap<{}, {}>",
                    prefix,
                    key.render(fully_qualified),
                    value.render(fully_qualified)
                )
            }
            RustType::Option { member } => format!("Option<{}>", member.render(fully_qualified)),
            RustType::Box { member } => format!("Box<{}>", member.render(fully_qualified)),
            RustType::Opaque { name, namespace } => qualify(name, namespace, fully_qualified),
            RustType::Generic {
                name,
                namespace,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| a.render(fully_qualified)).collect();
                format!(
                    "{}<{}>",
                    qualify(name, namespace, fully_qualified),
                    args.join(", ")
                )
            }
        }
    }
}

fn qualify(name: &str, namespace: &Option<String>, fully_qualified: bool) -> String {
    match namespace {
        Some(ns) if fully_qualified => format!("{}::{}", ns, name),
        _ => name.to_string(),
    }
}
