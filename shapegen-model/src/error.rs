//! Error types for shape graph construction and lookup

use crate::search::Suggestion;

/// Structured error type for shape graph operations.
///
/// These are model-construction defects: a well-formed graph never
/// produces them during generation.
#[derive(Debug, Clone)]
pub enum ModelError {
    ShapeNotFound {
        id: String,
        suggestions: Vec<Suggestion>,
    },
    UnexpectedKind {
        id: String,
        expected: &'static str,
    },
    InvalidShapeId {
        input: String,
    },
    DuplicateShape {
        id: String,
    },
    ParseError {
        path: String,
        source: String,
    },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::ShapeNotFound { id, suggestions } => {
                write!(f, "Shape not found: '{}'", id)?;
                if let Some(first) = suggestions.first() {
                    write!(f, ". Did you mean: {}?", first.candidate)?;
                }
                Ok(())
            }
            ModelError::UnexpectedKind { id, expected } => {
                write!(f, "Shape '{}' is not a {}", id, expected)
            }
            ModelError::InvalidShapeId { input } => write!(f, "Invalid shape id: {}", input),
            ModelError::DuplicateShape { id } => write!(f, "Duplicate shape: {}", id),
            ModelError::ParseError { path, source } => {
                write!(f, "Parse error in {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ModelError {}
