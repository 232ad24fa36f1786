//! Traits attached to shapes

use crate::shape_id::ShapeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFault {
    Client,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Trait {
    /// Marks a member (or the union it targets) as an event stream.
    Streaming,
    Required,
    Error { fault: ErrorFault },
    Documentation { text: String },
    /// Back-link from a synthetic input structure to its operation.
    SyntheticInput { operation: ShapeId },
    /// Back-link from a synthetic output structure to its operation.
    SyntheticOutput { operation: ShapeId },
}

/// The traits attached to a single shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSet(Vec<Trait>);

impl TraitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trait, replacing one of the same kind if present.
    pub fn insert(&mut self, t: Trait) {
        let kind = std::mem::discriminant(&t);
        self.0.retain(|existing| std::mem::discriminant(existing) != kind);
        self.0.push(t);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trait> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_streaming(&self) -> bool {
        self.0.iter().any(|t| matches!(t, Trait::Streaming))
    }

    pub fn is_required(&self) -> bool {
        self.0.iter().any(|t| matches!(t, Trait::Required))
    }

    pub fn error_fault(&self) -> Option<ErrorFault> {
        self.0.iter().find_map(|t| match t {
            Trait::Error { fault } => Some(*fault),
            _ => None,
        })
    }

    pub fn documentation(&self) -> Option<&str> {
        self.0.iter().find_map(|t| match t {
            Trait::Documentation { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn synthetic_input(&self) -> Option<&ShapeId> {
        self.0.iter().find_map(|t| match t {
            Trait::SyntheticInput { operation } => Some(operation),
            _ => None,
        })
    }

    pub fn synthetic_output(&self) -> Option<&ShapeId> {
        self.0.iter().find_map(|t| match t {
            Trait::SyntheticOutput { operation } => Some(operation),
            _ => None,
        })
    }
}

impl FromIterator<Trait> for TraitSet {
    fn from_iter<I: IntoIterator<Item = Trait>>(iter: I) -> Self {
        let mut set = TraitSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}
