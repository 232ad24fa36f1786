//! Core shape definitions

use crate::shape_id::ShapeId;
use crate::traits::{Trait, TraitSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleType {
    Blob,
    Boolean,
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Timestamp,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Service {
        #[serde(default)]
        operations: Vec<ShapeId>,
    },
    Operation {
        #[serde(default)]
        input: Option<ShapeId>,
        #[serde(default)]
        output: Option<ShapeId>,
        #[serde(default)]
        errors: Vec<ShapeId>,
    },
    /// Member names in declaration order; each member is its own shape.
    Structure {
        #[serde(default)]
        members: Vec<String>,
    },
    Union {
        #[serde(default)]
        members: Vec<String>,
    },
    Member {
        target: ShapeId,
    },
    List {
        member: ShapeId,
    },
    Map {
        key: ShapeId,
        value: ShapeId,
    },
    Simple {
        simple: SimpleType,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(flatten)]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "TraitSet::is_empty")]
    pub traits: TraitSet,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            traits: TraitSet::new(),
        }
    }

    pub fn simple(id: ShapeId, simple: SimpleType) -> Self {
        Self::new(id, ShapeKind::Simple { simple })
    }

    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.insert(t);
        self
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind, ShapeKind::Member { .. })
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.kind, ShapeKind::Structure { .. })
    }

    /// For member shapes, the id of the shape that contains the member.
    pub fn container(&self) -> Option<ShapeId> {
        match self.kind {
            ShapeKind::Member { .. } => Some(self.id.without_member()),
            _ => None,
        }
    }

    pub fn member_target(&self) -> Option<&ShapeId> {
        match &self.kind {
            ShapeKind::Member { target } => Some(target),
            _ => None,
        }
    }

    pub fn member_names(&self) -> &[String] {
        match &self.kind {
            ShapeKind::Structure { members } | ShapeKind::Union { members } => members,
            _ => &[],
        }
    }
}

/// Builds a structure or union shape together with its member shapes.
#[derive(Debug, Clone)]
pub struct AggregateBuilder {
    id: ShapeId,
    union: bool,
    traits: TraitSet,
    members: Vec<Shape>,
}

impl AggregateBuilder {
    pub fn structure(id: ShapeId) -> Self {
        Self {
            id,
            union: false,
            traits: TraitSet::new(),
            members: Vec::new(),
        }
    }

    pub fn union(id: ShapeId) -> Self {
        Self {
            union: true,
            ..Self::structure(id)
        }
    }

    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.insert(t);
        self
    }

    pub fn member(self, name: &str, target: ShapeId) -> Self {
        self.member_with_traits(name, target, [])
    }

    pub fn member_with_traits(
        mut self,
        name: &str,
        target: ShapeId,
        traits: impl IntoIterator<Item = Trait>,
    ) -> Self {
        let member = Shape {
            id: self.id.with_member(name),
            kind: ShapeKind::Member { target },
            traits: traits.into_iter().collect(),
        };
        self.members.push(member);
        self
    }

    /// Returns the aggregate shape first, followed by its members.
    pub fn build(self) -> Vec<Shape> {
        let names = self
            .members
            .iter()
            .filter_map(|m| m.id.member().map(str::to_string))
            .collect();
        let kind = if self.union {
            ShapeKind::Union { members: names }
        } else {
            ShapeKind::Structure { members: names }
        };

        let mut shapes = Vec::with_capacity(self.members.len() + 1);
        shapes.push(Shape {
            id: self.id,
            kind,
            traits: self.traits,
        });
        shapes.extend(self.members);
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_builder_emits_members() {
        let id = ShapeId::new("example.chat", "ChatInput");
        let shapes = AggregateBuilder::structure(id.clone())
            .member("room", ShapeId::new("smithy.api", "String"))
            .member_with_traits(
                "messages",
                ShapeId::new("example.chat", "ChatMessage"),
                [Trait::Streaming],
            )
            .build();

        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].member_names(), ["room", "messages"]);
        assert_eq!(shapes[2].container(), Some(id));
        assert!(shapes[2].traits.is_streaming());
        assert!(shapes[0].container().is_none());
    }

    #[test]
    fn test_shape_json_shape() {
        let json = r#"{
            "id": "example.chat#Chat",
            "type": "operation",
            "input": "example.chat#ChatInput"
        }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        match shape.kind {
            ShapeKind::Operation { input, output, errors } => {
                assert_eq!(input.unwrap().name(), "ChatInput");
                assert!(output.is_none());
                assert!(errors.is_empty());
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }
}
