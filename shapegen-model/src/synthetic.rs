//! Synthetic operation input/output structures
//!
//! Code generation treats every operation as taking exactly one input structure
//! and returning exactly one output structure that belong to it alone. This
//! transform creates those structures and back-links them to their operation
//! with the `syntheticInput` / `syntheticOutput` traits.

use crate::error::ModelError;
use crate::model::Model;
use crate::shape_id::ShapeId;
use crate::shapes::{Shape, ShapeKind};
use crate::traits::Trait;

/// Namespace suffix used for generated structures.
pub const SYNTHETIC_NAMESPACE_SUFFIX: &str = "synthetic";

pub fn synthetic_input_id(operation: &ShapeId) -> ShapeId {
    ShapeId::new(
        format!("{}.{}", operation.namespace(), SYNTHETIC_NAMESPACE_SUFFIX),
        format!("{}Input", operation.name()),
    )
}

pub fn synthetic_output_id(operation: &ShapeId) -> ShapeId {
    ShapeId::new(
        format!("{}.{}", operation.namespace(), SYNTHETIC_NAMESPACE_SUFFIX),
        format!("{}Output", operation.name()),
    )
}

#[derive(Clone, Copy)]
enum Side {
    Input,
    Output,
}

/// Rewrites every operation to use synthetic input and output structures.
///
/// Operations that are already normalized are left untouched, so running the
/// transform twice yields the same model.
pub fn normalize_operations(model: &Model) -> Result<Model, ModelError> {
    let mut shapes: Vec<Shape> = Vec::new();
    let mut added = 0usize;

    for shape in model.shapes() {
        let ShapeKind::Operation {
            input,
            output,
            errors,
        } = &shape.kind
        else {
            shapes.push(shape.clone());
            continue;
        };

        let (input, new_input) = synthesize(model, &shape.id, input.as_ref(), Side::Input)?;
        let (output, new_output) = synthesize(model, &shape.id, output.as_ref(), Side::Output)?;
        for generated in new_input.into_iter().chain(new_output) {
            added += generated.len();
            shapes.extend(generated);
        }

        shapes.push(Shape {
            id: shape.id.clone(),
            kind: ShapeKind::Operation {
                input: Some(input),
                output: Some(output),
                errors: errors.clone(),
            },
            traits: shape.traits.clone(),
        });
    }

    tracing::debug!(added, "normalized operation inputs and outputs");
    Model::builder().shapes(shapes).build()
}

fn synthesize(
    model: &Model,
    operation: &ShapeId,
    current: Option<&ShapeId>,
    side: Side,
) -> Result<(ShapeId, Option<Vec<Shape>>), ModelError> {
    let original = current.map(|id| model.expect_shape(id)).transpose()?;

    if let Some(existing) = original {
        let linked = match side {
            Side::Input => existing.traits.synthetic_input(),
            Side::Output => existing.traits.synthetic_output(),
        };
        if linked == Some(operation) {
            return Ok((existing.id.clone(), None));
        }
    }

    let (id, link) = match side {
        Side::Input => (
            synthetic_input_id(operation),
            Trait::SyntheticInput {
                operation: operation.clone(),
            },
        ),
        Side::Output => (
            synthetic_output_id(operation),
            Trait::SyntheticOutput {
                operation: operation.clone(),
            },
        ),
    };

    let mut traits = original.map(|s| s.traits.clone()).unwrap_or_default();
    traits.insert(link);

    let mut generated = Vec::new();
    let mut names = Vec::new();
    if let Some(original) = original {
        for member in model.members(original) {
            let Some(name) = member.id.member() else {
                continue;
            };
            names.push(name.to_string());
            generated.push(Shape {
                id: id.with_member(name),
                kind: member.kind.clone(),
                traits: member.traits.clone(),
            });
        }
    }

    generated.insert(
        0,
        Shape {
            id: id.clone(),
            kind: ShapeKind::Structure { members: names },
            traits,
        },
    );

    Ok((id, Some(generated)))
}
