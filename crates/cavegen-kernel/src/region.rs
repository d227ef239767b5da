//! Connected regions ("bubbles") discovered by the flood fill.

use cavegen_common::Coordinate;

/// A maximal 4-connected set of cells sharing one value.
///
/// Regions are only built by [`enumerate_regions`](crate::flood::enumerate_regions)
/// and are read-only afterwards. Cells are stored in discovery order and
/// are distinct, so `count()` is exactly the number of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Coordinate>,
}

impl Region {
    pub(crate) const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub(crate) fn push(&mut self, coord: Coordinate) {
        self.cells.push(coord);
    }

    /// Number of cells in the region.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Checks if the region has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in discovery order.
    #[must_use]
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Consumes the region, returning its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Coordinate> {
        self.cells
    }

    /// Checks if `coord` belongs to the region.
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }
}

/// Returns the region with the most cells.
///
/// Among equally large regions the earliest one in `regions` wins, so
/// results from a deterministic scan are reproducible.
#[must_use]
pub fn largest_region(regions: &[Region]) -> Option<&Region> {
    regions.iter().fold(None, |best: Option<&Region>, region| match best {
        Some(b) if b.count() >= region.count() => Some(b),
        _ => Some(region),
    })
}
