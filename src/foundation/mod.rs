//! Shared primitives: errors, geometry and colour types, hashing.

pub mod core;
pub mod error;
pub(crate) mod math;
