//! # Cavegen Kernel
//!
//! Grid simulation primitives for cave generation.
//!
//! This crate provides:
//! - `Grid`, a square row-major cell grid with bounds-checked access
//! - `DoubleBuffer`, a current/next pair of grids swapped by flag
//! - Flood fill over 4-connected neighbourhoods and the `Region`s it finds
//!
//! ## Double Buffering
//!
//! The automaton uses double-buffering so each generation is well defined:
//! - Two grids alternate between current (read) and next (write)
//! - Each generation reads from one grid and writes to the other
//! - Grids are swapped after each generation
//!
//! Because a rule never reads what it writes, per-cell work within one
//! generation is order independent.
//!
//! ## Regions
//!
//! Region discovery scans row-major and is sequential on purpose: when two
//! regions tie for size, the first one discovered is the one kept.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod buffer;
pub mod flood;
pub mod grid;
pub mod region;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::*;
    pub use crate::flood::*;
    pub use crate::grid::*;
    pub use crate::region::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use cavegen_common::Coordinate;

    #[test]
    fn test_buffer_regions_from_snapshot() {
        let mut buffer = DoubleBuffer::new(4, true).expect("buffer");
        buffer
            .overwrite_masked(&[Coordinate::new(0, 0), Coordinate::new(3, 3)], || false)
            .expect("in range");

        let regions = enumerate_regions(&buffer.snapshot(), false);
        assert_eq!(regions.len(), 2);
        assert_eq!(largest_region(&regions).map(Region::count), Some(1));
    }
}
