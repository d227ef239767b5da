//! # Cavegen World
//!
//! Cave map generation for cavegen.
//!
//! This crate handles:
//! - Noise seeding of the occupancy and height fields
//! - Cellular-automaton refinement
//! - Region cleanup (isles, pillars, disconnected chambers)
//! - Pipeline configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod curve;
pub mod generator;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::curve::*;
    pub use crate::generator::*;
}

pub use prelude::*;
