//! Errors raised while resolving symbols and rendering code

use shapegen_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Shape '{0}' is not a service")]
    NotAService(String),

    #[error("Unknown codegen target: {0}")]
    UnknownTarget(String),

    #[error("Unresolved template placeholder: #{{{0}}}")]
    UnresolvedPlaceholder(String),

    #[error("Unterminated template placeholder at byte {0}")]
    UnterminatedPlaceholder(usize),
}
