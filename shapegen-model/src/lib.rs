//! Shape graph for shapegen
//!
//! This crate holds the read-only interface model that code generation runs
//! against: shape ids, shapes, traits, and the derived facts generators ask
//! about (operation linkage, event stream membership).

pub mod error;
pub mod model;
pub mod parse;
pub mod search;
pub mod shape_id;
pub mod shapes;
pub mod synthetic;
pub mod traits;
pub mod utils;

pub use error::*;
pub use model::*;
pub use search::*;
pub use shape_id::*;
pub use shapes::*;
pub use traits::*;
