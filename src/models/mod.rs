//! Core data model for the flattened JSON line stream.

mod line;

pub use line::{ContainerKind, JsonLine, JsonPrimitive, Key};
