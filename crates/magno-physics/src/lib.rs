//! Field dynamics for Magno Relativity.
//!
//! The simulator advances a primary Bz and an emergent (Ex, Ey) on a
//! staggered grid, with an injected Gaussian pulse and absorbing edges.

pub mod boundary;
pub mod magno_rel;
pub mod source;
