//! Mathematical primitives for Magno Relativity.

pub mod stats;
pub mod stencil;
