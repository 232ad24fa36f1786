//! Client or server code generation

use crate::error::CodegenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the wire the generated code runs on. Fixed for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodegenTarget {
    #[default]
    Client,
    Server,
}

impl fmt::Display for CodegenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenTarget::Client => write!(f, "client"),
            CodegenTarget::Server => write!(f, "server"),
        }
    }
}

impl FromStr for CodegenTarget {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(CodegenTarget::Client),
            "server" => Ok(CodegenTarget::Server),
            _ => Err(CodegenError::UnknownTarget(s.to_string())),
        }
    }
}
