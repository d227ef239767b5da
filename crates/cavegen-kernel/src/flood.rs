//! Flood fill over 4-connected neighbourhoods.
//!
//! Both traversals keep an explicit work-list instead of recursing, so stack
//! usage does not depend on the size or shape of a cave.

use cavegen_common::{Coordinate, GridResult};
use tracing::trace;

use crate::grid::Grid;
use crate::region::Region;

/// Sets every cell reachable from `start` through cells that differ from
/// `target` to `target`.
///
/// Returns the number of cells changed, which is 0 when `start` already
/// holds `target`. Fails with `OutOfRange` if `start` is off-grid.
pub fn toggle_region<T>(grid: &mut Grid<T>, start: Coordinate, target: T) -> GridResult<usize>
where
    T: Copy + PartialEq,
{
    let start_index = grid.checked_index(start)?;
    if grid.cells()[start_index] == target {
        return Ok(0);
    }

    // Cells are marked when pushed so none is queued twice.
    grid.cells_mut()[start_index] = target;
    let mut changed = 1;
    let mut stack = vec![start];

    while let Some(coord) = stack.pop() {
        for neighbor in coord.neighbors4() {
            let Some(index) = grid.index_of(neighbor) else {
                continue;
            };
            if grid.cells()[index] != target {
                grid.cells_mut()[index] = target;
                changed += 1;
                stack.push(neighbor);
            }
        }
    }

    trace!("Toggled {changed} cells from {start}");
    Ok(changed)
}

/// Lists every 4-connected region of cells equal to `target`.
///
/// The grid is scanned row-major and regions are returned in the order their
/// first cell is met. Every `target` cell belongs to exactly one region. The
/// grid itself is not modified; visited cells are tracked in a side mask.
#[must_use]
pub fn enumerate_regions<T>(grid: &Grid<T>, target: T) -> Vec<Region>
where
    T: Copy + PartialEq,
{
    let cells = grid.cells();
    let mut visited = vec![false; cells.len()];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for (index, coord) in grid.coords().enumerate() {
        if visited[index] || cells[index] != target {
            continue;
        }

        let mut region = Region::new();
        visited[index] = true;
        stack.push(coord);

        while let Some(current) = stack.pop() {
            region.push(current);
            for neighbor in current.neighbors4() {
                let Some(n) = grid.index_of(neighbor) else {
                    continue;
                };
                if !visited[n] && cells[n] == target {
                    visited[n] = true;
                    stack.push(neighbor);
                }
            }
        }

        regions.push(region);
    }

    trace!("Found {} regions", regions.len());
    regions
}
