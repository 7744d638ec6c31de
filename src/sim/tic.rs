use std::time::{Duration, Instant};

use hecs::World;

use super::spacial::ThingGrid;
use crate::defs::TICRATE;
use crate::poly::PolySim;
use crate::world::Level;

const TIC: Duration = Duration::from_micros(1_000_000 / TICRATE as u64);

/// Owns the ECS world, the thing grid and the polyobject sim, and drives
/// them at the fixed tic rate.
pub struct TicRunner {
    world: World,
    grid: ThingGrid,
    poly: PolySim,
    last: Instant,
}

impl TicRunner {
    pub fn new(grid: ThingGrid, poly: PolySim) -> Self {
        Self {
            world: World::new(),
            grid,
            poly,
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut ThingGrid {
        &mut self.grid
    }

    #[inline]
    pub fn poly(&self) -> &PolySim {
        &self.poly
    }

    #[inline]
    pub fn poly_mut(&mut self) -> &mut PolySim {
        &mut self.poly
    }

    /// Advance enough tics to synchronise simulation with real time.
    pub fn pump(&mut self, level: &mut Level) {
        while self.last.elapsed() >= TIC {
            self.step(level);
            self.last += TIC;
        }
    }

    /// Run exactly one fixed-rate game tic (headless callers / tests).
    pub fn step(&mut self, level: &mut Level) {
        self.poly.tick(level, &mut self.world, &self.grid);
    }
}
