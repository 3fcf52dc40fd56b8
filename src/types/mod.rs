//! Core value types shared across the document model

pub mod bounds;
pub mod handle;
pub mod vector;

pub use bounds::{BoundingBox2D, Outline};
pub use handle::Handle;
pub use vector::Vector2;
