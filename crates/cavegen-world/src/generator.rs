//! Procedural cave generation.
//!
//! A map starts as random noise and is smoothed by a birth/death cellular
//! automaton. Region cleanup then opens small wall specks, fills isolated
//! air pockets and keeps a single connected cavern.

use cavegen_common::{Coordinate, GridError, GridResult};
use cavegen_kernel::{enumerate_regions, largest_region, toggle_region, DoubleBuffer, Grid, Region};
use noise::{NoiseFn, Perlin};
use tracing::{debug, info, warn};

use crate::config::{GeneratorConfig, DEFAULT_MAP_SIZE};
use crate::curve::SpreadCurve;

/// Neighbourhood radius of the automaton and height averaging.
const NEIGHBOR_RADIUS: usize = 1;

/// Divisor of the height average: the neighbour count of a 3x3 window.
/// Only valid for `NEIGHBOR_RADIUS == 1`.
const MASS_NORMALIZER: f32 = 8.0;

/// Scales normalized cell positions into roughly `[-0.75, 0.75]`.
const SPREAD_SCALE: f32 = 1.5;

/// Height noise frequency (cells to noise units).
const HEIGHT_FREQUENCY: f64 = 0.05;

/// Half-width of the random per-map height noise offset.
const HEIGHT_OFFSET_RANGE: f64 = 50.0;

/// Outcome of [`CaveGenerator::generate_sized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Size of the main chamber that was kept
    pub chamber_size: usize,
    /// Number of maps generated
    pub attempts: u32,
    /// Whether the chamber size is in the configured range
    pub accepted: bool,
}

/// Cellular-automaton cave generator.
///
/// Owns an occupancy field (`true` = solid wall, `false` = open air) and a
/// height field of the same size. Both are double-buffered so that every
/// operation publishes a complete generation or nothing at all.
pub struct CaveGenerator {
    /// Solid/open cells
    occupancy: DoubleBuffer<bool>,
    /// Height/mass field. Seeded in `[0, 1]`; `refine` can push open
    /// cells up to 9/8 and `invert_height` can then go below 0.
    height: DoubleBuffer<f32>,
    /// Seeding randomness
    rng: fastrand::Rng,
    /// Height noise
    noise: Perlin,
}

impl CaveGenerator {
    /// Creates an entropy-seeded generator with empty `size x size` fields.
    pub fn new(size: usize) -> GridResult<Self> {
        Self::with_rng(size, fastrand::Rng::new())
    }

    /// Creates a generator whose maps are reproducible for `seed`.
    pub fn with_seed(size: usize, seed: u64) -> GridResult<Self> {
        Self::with_rng(size, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(size: usize, mut rng: fastrand::Rng) -> GridResult<Self> {
        let noise = Perlin::new(rng.u32(..));
        Ok(Self {
            occupancy: DoubleBuffer::new(size, false)?,
            height: DoubleBuffer::new(size, 0.0)?,
            rng,
            noise,
        })
    }

    /// Creates a generator at the default map size.
    pub fn with_default_size() -> GridResult<Self> {
        Self::new(DEFAULT_MAP_SIZE)
    }

    /// Restarts the random sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
        self.noise = Perlin::new(self.rng.u32(..));
    }

    /// Returns the map side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.occupancy.size()
    }

    /// Returns an independent copy of the occupancy field.
    #[must_use]
    pub fn occupancy_snapshot(&self) -> Grid<bool> {
        self.occupancy.snapshot()
    }

    /// Returns an independent copy of the height field.
    #[must_use]
    pub fn height_snapshot(&self) -> Grid<f32> {
        self.height.snapshot()
    }

    /// Returns the number of open cells.
    #[must_use]
    pub fn open_cells(&self) -> usize {
        self.occupancy.current().count(false)
    }

    /// Replaces the occupancy field, e.g. with an edited snapshot.
    pub fn load_occupancy(&mut self, grid: Grid<bool>) -> GridResult<()> {
        self.occupancy.replace(grid)
    }

    /// Seeds a fresh map.
    ///
    /// With a spread curve, each cell is solid with probability
    /// `curve(distance from centre)`; without one every cell uses the flat
    /// `initial_density`. The height field is seeded from Perlin noise at a
    /// random offset. Both fields are reallocated if `size` changed.
    pub fn new_map(
        &mut self,
        size: usize,
        initial_density: f32,
        spread_curve: Option<&SpreadCurve>,
    ) -> GridResult<()> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        if size != self.size() {
            let occupancy = DoubleBuffer::new(size, false)?;
            let height = DoubleBuffer::new(size, 0.0)?;
            self.occupancy = occupancy;
            self.height = height;
        }

        let rng = &mut self.rng;
        let side = size as f32;
        self.occupancy.fill_with(|c| {
            let probability = match spread_curve {
                Some(curve) => {
                    let x = (c.x as f32 / side - 0.5) * SPREAD_SCALE;
                    let y = (c.y as f32 / side - 0.5) * SPREAD_SCALE;
                    curve.evaluate(x.hypot(y))
                },
                None => initial_density,
            };
            rng.f32() < probability
        });

        let offset_x = self.rng.f64().mul_add(2.0 * HEIGHT_OFFSET_RANGE, -HEIGHT_OFFSET_RANGE);
        let offset_y = self.rng.f64().mul_add(2.0 * HEIGHT_OFFSET_RANGE, -HEIGHT_OFFSET_RANGE);
        let noise = &self.noise;
        self.height.fill_with(|c| {
            let v = noise.get([
                (f64::from(c.x) + offset_x) * HEIGHT_FREQUENCY,
                (f64::from(c.y) + offset_y) * HEIGHT_FREQUENCY,
            ]);
            ((v + 1.0) * 0.5).clamp(0.0, 1.0) as f32
        });

        debug!(
            "New {size}x{size} map, {} solid cells, curve: {}",
            self.occupancy.current().count(true),
            spread_curve.is_some()
        );
        Ok(())
    }

    /// Advances occupancy and height by one generation.
    ///
    /// A solid cell stays solid with at least `min_threshold` solid
    /// neighbours; an open cell becomes solid with more than `max_threshold`.
    /// Off-map neighbours count as solid. The new height of a cell is the sum
    /// of the heights of the open cells in its 3x3 window, divided by 8.
    pub fn refine(&mut self, min_threshold: f32, max_threshold: f32) {
        self.occupancy.apply_with_view(|prev, coord, solid| {
            let count = prev.count_neighbors(coord, NEIGHBOR_RADIUS, |cell| cell) as f32;
            if solid {
                count >= min_threshold
            } else {
                count > max_threshold
            }
        });

        let occupancy = self.occupancy.current();
        self.height
            .apply_with_view(|heights, coord, _| local_mass(heights, occupancy, coord));
    }

    /// Replaces every height `v` with `1 - v`.
    pub fn invert_height(&mut self) {
        self.height.apply(|_, v| 1.0 - v);
    }

    /// Lists the connected regions of cells equal to `solid` in scan order.
    #[must_use]
    pub fn list_regions(&self, solid: bool) -> Vec<Region> {
        enumerate_regions(self.occupancy.current(), solid)
    }

    /// Flips the whole connected region containing `coord`.
    ///
    /// Clicking an air pocket fills it; clicking a wall mass opens it.
    /// Returns the number of cells flipped.
    pub fn remove_isle(&mut self, coord: Coordinate) -> GridResult<usize> {
        let mut grid = self.occupancy.snapshot();
        let value = grid.get(coord)?;
        let flipped = toggle_region(&mut grid, coord, !value)?;
        self.occupancy.replace(grid)?;
        debug!("Flipped {flipped} cells at {coord} to solid={}", !value);
        Ok(flipped)
    }

    /// Opens every solid region of at most `max_pillar_size` cells.
    ///
    /// Returns the number of cells opened.
    pub fn remove_pillars(&mut self, max_pillar_size: usize) -> GridResult<usize> {
        let mask: Vec<Coordinate> = self
            .list_regions(true)
            .into_iter()
            .filter(|pillar| pillar.count() <= max_pillar_size)
            .flat_map(Region::into_cells)
            .collect();
        self.occupancy.overwrite_masked(&mask, || false)?;
        debug!("Removed pillars up to {max_pillar_size} cells ({} cells opened)", mask.len());
        Ok(mask.len())
    }

    /// Keeps only the largest open region and fills every other one.
    ///
    /// Ties go to the region found first in row-major order. Returns the
    /// size of the kept chamber, or 0 for a fully solid map.
    pub fn remove_disconnected_chambers(&mut self) -> GridResult<usize> {
        let chambers = self.list_regions(false);
        let Some(main) = largest_region(&chambers) else {
            debug!("No open chamber to keep");
            return Ok(0);
        };
        self.occupancy.apply_masked(main.cells(), || true, || false)?;
        debug!(
            "Kept main chamber of {} cells, filled {} others",
            main.count(),
            chambers.len() - 1
        );
        Ok(main.count())
    }

    /// Runs the full pipeline once: seed, refine, clean up.
    ///
    /// Returns the size of the main chamber.
    pub fn generate_map(&mut self, config: &GeneratorConfig) -> GridResult<usize> {
        if let Some(seed) = config.seed {
            self.reseed(seed);
        }
        self.run_pipeline(config)
    }

    /// Runs the pipeline until the main chamber size is within
    /// `[min_cave_size, max_cave_size]` or `max_attempts` maps were made.
    ///
    /// The last map is kept either way.
    pub fn generate_sized(&mut self, config: &GeneratorConfig) -> GridResult<GenerationReport> {
        if let Some(seed) = config.seed {
            self.reseed(seed);
        }

        let max_attempts = config.max_attempts.max(1);
        let mut report = GenerationReport {
            chamber_size: 0,
            attempts: 0,
            accepted: false,
        };
        while report.attempts < max_attempts {
            report.attempts += 1;
            report.chamber_size = self.run_pipeline(config)?;
            debug!("Attempt {}: chamber size {}", report.attempts, report.chamber_size);
            if config.accepts(report.chamber_size) {
                report.accepted = true;
                break;
            }
        }

        if report.accepted {
            info!(
                "Map with accepted size generated ({} cells, {} attempts)",
                report.chamber_size, report.attempts
            );
        } else {
            warn!(
                "Map generated is not ideal: chamber of {} cells after {} attempts",
                report.chamber_size, report.attempts
            );
        }
        Ok(report)
    }

    fn run_pipeline(&mut self, config: &GeneratorConfig) -> GridResult<usize> {
        self.new_map(config.size, config.initial_density, config.spread_curve.as_ref())?;
        for _ in 0..config.refinement_steps {
            self.refine(config.min_threshold, config.max_threshold);
        }
        if config.max_pillar_size > 0 {
            self.remove_pillars(config.max_pillar_size)?;
        }
        let chamber = self.remove_disconnected_chambers()?;
        info!("Map generated with size {chamber} cells");
        Ok(chamber)
    }
}

/// Sum of the heights of open cells in the 3x3 window around `coord`,
/// centre included, over `MASS_NORMALIZER`. Off-map cells add nothing.
fn local_mass(heights: &Grid<f32>, occupancy: &Grid<bool>, coord: Coordinate) -> f32 {
    let r = NEIGHBOR_RADIUS as i32;
    let mut mass = 0.0;
    for dy in -r..=r {
        for dx in -r..=r {
            let Some(index) = occupancy.index_of(coord.offset(dx, dy)) else {
                continue;
            };
            if !occupancy.cells()[index] {
                mass += heights.cells()[index];
            }
        }
    }
    mass / MASS_NORMALIZER
}
