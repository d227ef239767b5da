//! # Cavegen Common
//!
//! Common types shared by every cavegen crate:
//! - `Coordinate`, the integer cell position
//! - `GridError`, the error taxonomy for grid access
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_offset() {
        let c = Coordinate::new(3, 4);
        assert_eq!(c.offset(-1, 2), Coordinate::new(2, 6));
        assert_eq!(Coordinate::from((3, 4)), c);
    }

    #[test]
    fn test_offset_saturates() {
        let c = Coordinate::new(i32::MAX, i32::MIN);
        assert_eq!(c.offset(1, -1), c);
        assert_eq!(c.neighbors4()[0], c);
    }

    #[test]
    fn test_neighbors4_are_orthogonal() {
        let c = Coordinate::new(0, 0);
        let n = c.neighbors4();
        assert_eq!(n.len(), 4);
        for other in n {
            assert_eq!((other.x - c.x).abs() + (other.y - c.y).abs(), 1);
        }
        assert!(n.contains(&Coordinate::new(-1, 0)));
        assert!(n.contains(&Coordinate::new(0, -1)));
    }

    #[test]
    fn test_error_messages() {
        let err = GridError::OutOfRange { x: 9, y: -1, size: 4 };
        assert_eq!(err.to_string(), "Coordinate (9, -1) is outside a 4x4 grid");

        let err = GridError::SizeMismatch {
            expected: 16,
            actual: 9,
        };
        assert_eq!(err.to_string(), "Size mismatch: expected 16, got 9");
    }
}
