//! Double-buffered grid storage for the cellular automaton.
//!
//! This module provides the `DoubleBuffer` type which owns two grids of the
//! same size. Every generation reads from one grid and writes to the other,
//! then swaps them. A rule evaluated for one cell therefore never observes a
//! neighbour that was already updated in the same generation.

use cavegen_common::{Coordinate, GridError, GridResult};
use tracing::{debug, trace};

use crate::grid::Grid;

/// Double-buffered grid storage.
///
/// This struct manages a pair of grids that alternate roles between
/// current (read) and next (write) every generation. This double-buffering
/// approach ensures that:
///
/// 1. A rule can read the entire previous generation without seeing partial writes
/// 2. Writes to the next grid don't affect current reads
/// 3. A swap is a flag flip, never a copy or reallocation
///
/// # Example
///
/// ```
/// use cavegen_kernel::DoubleBuffer;
///
/// let mut buffer = DoubleBuffer::new(16, false).expect("non-zero size");
///
/// // Each generation:
/// buffer.apply(|_, cell| !cell);
/// assert!(buffer.snapshot().cells().iter().all(|&c| c));
/// ```
#[derive(Debug, Clone)]
pub struct DoubleBuffer<T> {
    /// Grid A (alternates between current/next)
    buffer_a: Grid<T>,
    /// Grid B (alternates between current/next)
    buffer_b: Grid<T>,
    /// Whether grid A is currently the settled generation (true) or the scratch one (false)
    a_is_current: bool,
}

impl<T: Copy> DoubleBuffer<T> {
    /// Creates a new double buffer with both grids set to `fill`.
    pub fn new(size: usize, fill: T) -> GridResult<Self> {
        let grid = Grid::new(size, fill)?;
        debug!("Creating double buffer ({size}x{size} = {} cells)", grid.cell_count());
        Ok(Self::from_grid(grid))
    }

    /// Creates a double buffer whose current generation is `grid`.
    #[must_use]
    pub fn from_grid(grid: Grid<T>) -> Self {
        Self {
            buffer_b: grid.clone(),
            buffer_a: grid,
            a_is_current: true,
        }
    }

    /// Returns the side length of both grids.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.buffer_a.size()
    }

    /// Returns the settled generation.
    #[must_use]
    pub fn current(&self) -> &Grid<T> {
        if self.a_is_current {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Splits into the settled generation and the grid being written.
    fn split(&mut self) -> (&Grid<T>, &mut Grid<T>) {
        if self.a_is_current {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        }
    }

    /// Reads a cell from the current generation.
    pub fn read(&self, coord: Coordinate) -> GridResult<T> {
        self.current().get(coord)
    }

    /// Writes a cell into the next generation.
    ///
    /// The value becomes visible only after `swap()`.
    pub fn write(&mut self, coord: Coordinate, value: T) -> GridResult<()> {
        let (_, next) = self.split();
        next.set(coord, value)
    }

    /// Swaps the current and next grids.
    pub fn swap(&mut self) {
        self.a_is_current = !self.a_is_current;
    }

    /// Derives a full new generation from the current one and swaps.
    ///
    /// `f` receives each coordinate with its value in the current
    /// generation. The next generation is only published once every cell
    /// has been written.
    pub fn apply<F>(&mut self, mut f: F)
    where
        F: FnMut(Coordinate, T) -> T,
    {
        self.apply_with_view(|_, coord, value| f(coord, value));
    }

    /// Like `apply`, but also hands `f` the whole current generation so a
    /// rule can inspect neighbouring cells.
    pub fn apply_with_view<F>(&mut self, mut f: F)
    where
        F: FnMut(&Grid<T>, Coordinate, T) -> T,
    {
        let (current, next) = self.split();
        for (index, slot) in next.cells_mut().iter_mut().enumerate() {
            let coord = current.coord_at(index);
            *slot = f(current, coord, current.cells()[index]);
        }
        self.swap();
        trace!("Applied generation to {0}x{0} buffer", self.size());
    }

    /// Seeds a full new generation from position alone and swaps.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(Coordinate) -> T,
    {
        self.apply(|coord, _| f(coord));
    }

    /// Writes `base()` to every cell, then `masked()` to every cell listed in
    /// `mask`, then swaps.
    ///
    /// Every mask coordinate is checked before anything is written, so an
    /// out-of-range entry leaves the current generation untouched.
    pub fn apply_masked<B, M>(&mut self, mask: &[Coordinate], mut base: B, mut masked: M) -> GridResult<()>
    where
        B: FnMut() -> T,
        M: FnMut() -> T,
    {
        let indices = self.mask_indices(mask)?;
        let (_, next) = self.split();
        for slot in next.cells_mut() {
            *slot = base();
        }
        let cells = next.cells_mut();
        for index in indices {
            cells[index] = masked();
        }
        self.swap();
        debug!("Masked write of {} cells", mask.len());
        Ok(())
    }

    /// Writes `masked()` to every cell listed in `mask`, keeping every other
    /// cell at its current value, then swaps.
    pub fn overwrite_masked<M>(&mut self, mask: &[Coordinate], mut masked: M) -> GridResult<()>
    where
        M: FnMut() -> T,
    {
        let indices = self.mask_indices(mask)?;
        let (current, next) = self.split();
        next.cells_mut().copy_from_slice(current.cells());
        let cells = next.cells_mut();
        for index in indices {
            cells[index] = masked();
        }
        self.swap();
        debug!("Masked overwrite of {} cells", mask.len());
        Ok(())
    }

    fn mask_indices(&self, mask: &[Coordinate]) -> GridResult<Vec<usize>> {
        let current = self.current();
        mask.iter().map(|&coord| current.checked_index(coord)).collect()
    }

    /// Publishes `grid` as the new current generation.
    ///
    /// Fails with `SizeMismatch` if the grid's side differs from this
    /// buffer's; the current generation is left untouched in that case.
    pub fn replace(&mut self, grid: Grid<T>) -> GridResult<()> {
        if grid.size() != self.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                actual: grid.size(),
            });
        }
        let (_, next) = self.split();
        *next = grid;
        self.swap();
        debug!("Replaced {0}x{0} buffer contents", self.size());
        Ok(())
    }

    /// Returns an independent copy of the current generation.
    #[must_use]
    pub fn snapshot(&self) -> Grid<T> {
        self.current().clone()
    }

    /// Counts neighbours of `coord` in the current generation, treating
    /// off-grid cells as matching. See [`Grid::count_neighbors`].
    pub fn count_neighbors<P>(&self, coord: Coordinate, radius: usize, predicate: P) -> usize
    where
        P: FnMut(T) -> bool,
    {
        self.current().count_neighbors(coord, radius, predicate)
    }
}
