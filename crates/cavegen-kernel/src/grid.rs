//! Square cell grid.

use cavegen_common::{Coordinate, GridError, GridResult};

/// A square `size x size` grid of cells stored row-major in one flat vector.
///
/// The side length is fixed at construction; a grid is never resized in
/// place. Cell `(x, y)` lives at index `y * size + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Side length
    size: usize,
    /// Cell data (size × size cells)
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(size: usize, fill: T) -> GridResult<Self> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        Ok(Self {
            size,
            cells: vec![fill; size * size],
        })
    }

    /// Creates a grid by evaluating `f` at every coordinate in row-major order.
    pub fn from_fn<F>(size: usize, mut f: F) -> GridResult<Self>
    where
        F: FnMut(Coordinate) -> T,
    {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let cells = (0..size * size).map(|i| f(coord_at(size, i))).collect();
        Ok(Self { size, cells })
    }

    /// Wraps an existing row-major cell vector.
    pub fn from_vec(size: usize, cells: Vec<T>) -> GridResult<Self> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        if cells.len() != size * size {
            return Err(GridError::SizeMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Builds a grid from rows, where `rows[y][x]` is cell `(x, y)`.
    ///
    /// Fails with `SizeMismatch` when any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> GridResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(GridError::SizeMismatch {
                    expected: size,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    /// Returns the side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Checks if a coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.index_of(coord).is_some()
    }

    /// Converts a coordinate to a linear index, or `None` when off-grid.
    #[must_use]
    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// Like `index_of`, but reports off-grid coordinates as `OutOfRange`.
    pub fn checked_index(&self, coord: Coordinate) -> GridResult<usize> {
        self.index_of(coord).ok_or(GridError::OutOfRange {
            x: coord.x,
            y: coord.y,
            size: self.size,
        })
    }

    /// Converts a linear index back to its coordinate.
    #[must_use]
    pub fn coord_at(&self, index: usize) -> Coordinate {
        coord_at(self.size, index)
    }

    /// Gets the cell at `coord`.
    pub fn get(&self, coord: Coordinate) -> GridResult<T> {
        let index = self.checked_index(coord)?;
        Ok(self.cells[index])
    }

    /// Sets the cell at `coord`.
    pub fn set(&mut self, coord: Coordinate, value: T) -> GridResult<()> {
        let index = self.checked_index(coord)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coordinate> {
        let size = self.size;
        (0..size * size).map(move |i| coord_at(size, i))
    }

    /// Returns the row-major cell slice.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Copies the grid out as rows, `rows[y][x]`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.cells.chunks(self.size).map(<[T]>::to_vec).collect()
    }

    /// Builds a new grid of the same size by mapping every cell.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(T) -> U,
    {
        Grid {
            size: self.size,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Counts the cells in the `(2 * radius + 1)²` window around `coord`,
    /// centre excluded, for which `predicate` holds.
    ///
    /// Off-grid positions always count, so cells on the border see the
    /// outside of the map as solid.
    pub fn count_neighbors<P>(&self, coord: Coordinate, radius: usize, mut predicate: P) -> usize
    where
        P: FnMut(T) -> bool,
    {
        // Only the in-grid part of the window is walked; everything else
        // counts by arithmetic, so huge radii and extreme coordinates are safe.
        let side = radius.saturating_mul(2).saturating_add(1);
        let window = side.saturating_mul(side) - 1;

        let last = self.size as i64 - 1;
        let r = i64::try_from(radius).unwrap_or(i64::MAX);
        let (cx, cy) = (i64::from(coord.x), i64::from(coord.y));
        let (x0, x1) = (cx.saturating_sub(r).max(0), cx.saturating_add(r).min(last));
        let (y0, y1) = (cy.saturating_sub(r).max(0), cy.saturating_add(r).min(last));

        let mut inside = 0usize;
        let mut matches = 0usize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if x == cx && y == cy {
                    continue;
                }
                inside += 1;
                if predicate(self.cells[(y * (last + 1) + x) as usize]) {
                    matches += 1;
                }
            }
        }
        window.saturating_sub(inside).saturating_add(matches)
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Counts the cells equal to `value`.
    #[must_use]
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }
}

const fn coord_at(size: usize, index: usize) -> Coordinate {
    Coordinate::new((index % size) as i32, (index / size) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Grid::new(0, false), Err(GridError::ZeroSize));
        assert_eq!(Grid::<bool>::from_rows(Vec::new()), Err(GridError::ZeroSize));
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let err = Grid::from_vec(3, vec![0u8; 8]).expect_err("8 cells is not 3x3");
        assert_eq!(
            err,
            GridError::SizeMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1, 2], vec![3]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(GridError::SizeMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_rows_layout() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).expect("square rows");
        assert_eq!(grid.get(Coordinate::new(1, 0)), Ok(2));
        assert_eq!(grid.get(Coordinate::new(0, 1)), Ok(3));
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(4, 0u8).expect("grid");
        for coord in [
            Coordinate::new(-1, 0),
            Coordinate::new(0, -1),
            Coordinate::new(4, 0),
            Coordinate::new(0, 4),
        ] {
            assert_eq!(
                grid.get(coord),
                Err(GridError::OutOfRange {
                    x: coord.x,
                    y: coord.y,
                    size: 4
                })
            );
            assert!(grid.set(coord, 1).is_err());
        }
        assert_eq!(grid.count(0), 16);
    }

    #[test]
    fn test_coords_row_major() {
        let grid = Grid::new(3, ()).expect("grid");
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[1], Coordinate::new(1, 0));
        assert_eq!(coords[3], Coordinate::new(0, 1));
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(grid.index_of(*c), Some(i));
            assert_eq!(grid.coord_at(i), *c);
        }
    }

    #[test]
    fn test_count_neighbors_interior() {
        let mut grid = Grid::new(5, false).expect("grid");
        grid.set(Coordinate::new(1, 1), true).expect("in range");
        grid.set(Coordinate::new(2, 2), true).expect("in range");
        // Centre is excluded.
        assert_eq!(grid.count_neighbors(Coordinate::new(2, 2), 1, |c| c), 1);
        assert_eq!(grid.count_neighbors(Coordinate::new(1, 2), 1, |c| c), 2);
    }

    #[test]
    fn test_count_neighbors_boundary_counts_as_solid() {
        let grid = Grid::new(5, false).expect("grid");
        // Corner: 5 of 8 neighbours are off-grid.
        assert_eq!(grid.count_neighbors(Coordinate::new(0, 0), 1, |c| c), 5);
        // Edge: 3 of 8.
        assert_eq!(grid.count_neighbors(Coordinate::new(2, 0), 1, |c| c), 3);
        // Radius 2 at a corner: 25 - 9 in-grid = 16 off-grid.
        assert_eq!(grid.count_neighbors(Coordinate::new(0, 0), 2, |c| c), 16);
        assert_eq!(grid.count_neighbors(Coordinate::new(2, 2), 1, |c| c), 0);
    }

    #[test]
    fn test_count_neighbors_single_cell_grid() {
        let grid = Grid::new(1, false).expect("grid");
        assert_eq!(grid.count_neighbors(Coordinate::new(0, 0), 1, |c| c), 8);
    }

    #[test]
    fn test_count_neighbors_extreme_inputs() {
        let grid = Grid::new(3, false).expect("grid");
        assert_eq!(grid.count_neighbors(Coordinate::new(i32::MAX, 0), 1, |c| c), 8);
        assert_eq!(grid.count_neighbors(Coordinate::new(i32::MIN, i32::MIN), 1, |c| c), 8);
        // Window of radius 100 holds 201² - 1 cells; the 8 other in-grid ones are open.
        assert_eq!(grid.count_neighbors(Coordinate::new(1, 1), 100, |c| c), 201 * 201 - 1 - 8);
        assert_eq!(
            grid.count_neighbors(Coordinate::new(1, 1), usize::MAX, |c| c),
            usize::MAX - 1 - 8
        );
    }

    #[test]
    fn test_map_preserves_shape() {
        let grid = Grid::from_fn(3, |c| c.x + c.y).expect("grid");
        let doubled = grid.map(|v| v * 2);
        assert_eq!(doubled.size(), 3);
        assert_eq!(doubled.get(Coordinate::new(2, 2)), Ok(8));
    }
}
