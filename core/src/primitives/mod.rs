//! Primitive

mod geometric_primitive;
mod primitive_list;

// Re-export
pub use geometric_primitive::*;
pub use primitive_list::*;
