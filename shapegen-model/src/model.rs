//! The shape graph and the queries code generation runs against it

use crate::error::ModelError;
use crate::search::suggest_shape_ids;
use crate::shape_id::ShapeId;
use crate::shapes::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which side of an operation a synthetic structure represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationLinkage {
    Input(ShapeId),
    Output(ShapeId),
    None,
}

/// An immutable graph of shapes keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "ModelDocument", try_from = "ModelDocument")]
pub struct Model {
    shapes: BTreeMap<ShapeId, Shape>,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Looks up a shape that the graph is expected to contain.
    pub fn expect_shape(&self, id: &ShapeId) -> Result<&Shape, ModelError> {
        self.shapes.get(id).ok_or_else(|| ModelError::ShapeNotFound {
            id: id.to_string(),
            suggestions: suggest_shape_ids(id, self.shapes.keys(), 3),
        })
    }

    pub fn expect_operation(&self, id: &ShapeId) -> Result<&Shape, ModelError> {
        let shape = self.expect_shape(id)?;
        match shape.kind {
            ShapeKind::Operation { .. } => Ok(shape),
            _ => Err(ModelError::UnexpectedKind {
                id: id.to_string(),
                expected: "operation",
            }),
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Member shapes of a structure or union, in declaration order.
    pub fn members<'a>(&'a self, container: &'a Shape) -> impl Iterator<Item = &'a Shape> + 'a {
        container
            .member_names()
            .iter()
            .filter_map(move |name| self.shapes.get(&container.id.with_member(name.as_str())))
    }

    /// Operations bound to a service, in declaration order.
    pub fn operations<'a>(&'a self, service: &'a Shape) -> impl Iterator<Item = &'a Shape> + 'a {
        let ids: &[ShapeId] = match &service.kind {
            ShapeKind::Service { operations } => operations,
            _ => &[],
        };
        ids.iter().filter_map(move |id| self.shapes.get(id))
    }

    /// Computes how a structure is linked to an operation.
    ///
    /// The synthetic input back-link is checked before the synthetic output one.
    pub fn operation_linkage(&self, structure: &Shape) -> OperationLinkage {
        let input = structure.traits.synthetic_input();
        let output = structure.traits.synthetic_output();
        match (input, output) {
            (Some(op), Some(other)) => {
                tracing::trace!(
                    shape = %structure.id,
                    input = %op,
                    output = %other,
                    "structure carries both synthetic input and output links; using input"
                );
                OperationLinkage::Input(op.clone())
            }
            (Some(op), None) => OperationLinkage::Input(op.clone()),
            (None, Some(op)) => OperationLinkage::Output(op.clone()),
            (None, None) => OperationLinkage::None,
        }
    }

    /// Whether a member represents an event stream.
    ///
    /// The streaming marker may sit on the member itself or on the shape it targets.
    pub fn is_event_stream(&self, member: &Shape) -> bool {
        let ShapeKind::Member { target } = &member.kind else {
            return false;
        };
        member.traits.is_streaming()
            || self
                .shapes
                .get(target)
                .is_some_and(|t| t.traits.is_streaming())
    }

    /// The first event stream member of a structure, if any.
    pub fn event_stream_member<'a>(&'a self, structure: &'a Shape) -> Option<&'a Shape> {
        self.members(structure).find(|m| self.is_event_stream(m))
    }

    pub fn is_input_event_stream(&self, operation: &Shape) -> bool {
        self.operation_io(operation, true)
            .is_some_and(|input| self.event_stream_member(input).is_some())
    }

    pub fn is_output_event_stream(&self, operation: &Shape) -> bool {
        self.operation_io(operation, false)
            .is_some_and(|output| self.event_stream_member(output).is_some())
    }

    pub fn is_event_stream_operation(&self, operation: &Shape) -> bool {
        self.is_input_event_stream(operation) || self.is_output_event_stream(operation)
    }

    /// Whether any operation bound to the service streams events in either direction.
    pub fn has_event_stream_operations(&self, service: &Shape) -> bool {
        self.operations(service)
            .any(|op| self.is_event_stream_operation(op))
    }

    fn operation_io(&self, operation: &Shape, input: bool) -> Option<&Shape> {
        match &operation.kind {
            ShapeKind::Operation {
                input: i, output: o, ..
            } => {
                let id = if input { i } else { o };
                id.as_ref().and_then(|id| self.shapes.get(id))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    shapes: Vec<Shape>,
}

impl ModelBuilder {
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn shapes(mut self, shapes: impl IntoIterator<Item = Shape>) -> Self {
        self.shapes.extend(shapes);
        self
    }

    pub fn build(self) -> Result<Model, ModelError> {
        let mut map = BTreeMap::new();
        for shape in self.shapes {
            if map.contains_key(&shape.id) {
                return Err(ModelError::DuplicateShape {
                    id: shape.id.to_string(),
                });
            }
            map.insert(shape.id.clone(), shape);
        }
        Ok(Model { shapes: map })
    }
}

/// Serialized form of a model: a flat list of shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelDocument {
    shapes: Vec<Shape>,
}

impl From<Model> for ModelDocument {
    fn from(model: Model) -> Self {
        ModelDocument {
            shapes: model.shapes.into_values().collect(),
        }
    }
}

impl TryFrom<ModelDocument> for Model {
    type Error = ModelError;

    fn try_from(doc: ModelDocument) -> Result<Self, Self::Error> {
        Model::builder().shapes(doc.shapes).build()
    }
}
