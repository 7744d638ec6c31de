//! Runtime “thing” grid – a very small, cache-friendly spatial hash.
//!
//! * One cell ≙ 128×128 map-units (vanilla constant).
//! * Each cell keeps a `SmallVec` – maps rarely exceed a handful of live
//!   mobjs per block, so this is fast and allocation-free in the common
//!   case.
//!
//! The polyobject prober walks this grid cell by cell under a moving
//! object's footprint; anything else that moves entities is expected to
//! keep the grid write-through (`remove` before the move, `insert` after).

use glam::Vec2;
use hecs::Entity;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::defs::MobjFlags;
use crate::world::Level;

/*──────────────────────── core types ────────────────────────*/

/// Pre-baked data the prober needs without touching `World`.
#[derive(Clone, Copy)]
pub struct ThingSpatial {
    pub ent: Entity,
    pub pos: Vec2,
    pub radius: f32,
    pub flags: MobjFlags,
    pub player: bool,
}

/// Row / column index in the blockmap grid
pub type Bx = i32;
pub type By = i32;

/// Small fixed-capacity cell
type Cell = SmallVec<[ThingSpatial; 8]>;

/// Hash-map grid (sparse – only allocated where something lives)
pub struct ThingGrid {
    origin: Vec2,
    cells: HashMap<(Bx, By), Cell>,
}

/*───────────────────────── API ──────────────────────────────*/

impl ThingGrid {
    pub fn new(origin: Vec2) -> ThingGrid {
        ThingGrid {
            origin,
            cells: HashMap::new(),
        }
    }

    /// Insert / update a stub at its current blockmap coordinates.
    #[inline]
    pub fn insert(&mut self, stub: ThingSpatial) {
        if stub.flags.contains(MobjFlags::NOBLOCKMAP) {
            return;
        }
        let bx = Level::world_to_block(stub.pos.x, self.origin.x);
        let by = Level::world_to_block(stub.pos.y, self.origin.y);
        self.cells.entry((bx, by)).or_default().push(stub);
    }

    /// Remove the stub from the cell it used to occupy.
    ///
    /// *Call this **before** you move the actor; provide the old
    /// position so we do not need to recalculate it.*
    #[inline]
    pub fn remove(&mut self, stub: &ThingSpatial) {
        let bx = Level::world_to_block(stub.pos.x, self.origin.x);
        let by = Level::world_to_block(stub.pos.y, self.origin.y);
        if let Some(cell) = self.cells.get_mut(&(bx, by)) {
            if let Some(i) = cell.iter().position(|s| s.ent == stub.ent) {
                cell.swap_remove(i);
            }
        }
    }

    /// Visit every stub registered in block (`bx`, `by`).
    /// This is the broad-phase query the polyobject prober consumes.
    pub fn for_each_in_cell<F>(&self, bx: Bx, by: By, mut f: F)
    where
        F: FnMut(&ThingSpatial),
    {
        if let Some(cell) = self.cells.get(&(bx, by)) {
            for stub in cell {
                f(stub);
            }
        }
    }
}

/*────────────────────────── tests ───────────────────────────*/

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn stub(ent: Entity, x: f32, y: f32) -> ThingSpatial {
        ThingSpatial {
            ent,
            pos: Vec2::new(x, y),
            radius: 16.0,
            flags: MobjFlags::SOLID,
            player: false,
        }
    }

    #[test]
    fn insert_and_query_cell() {
        let mut w = World::new();
        let e = w.spawn(());
        let mut grid = ThingGrid::new(Vec2::ZERO);
        grid.insert(stub(e, 300.0, 300.0)); // cell (2, 2)

        let mut hit = 0;
        grid.for_each_in_cell(2, 2, |_| hit += 1);
        assert_eq!(hit, 1);

        grid.for_each_in_cell(1, 2, |_| hit += 10);
        assert_eq!(hit, 1);
    }

    #[test]
    fn remove_clears_the_stub() {
        let mut w = World::new();
        let e = w.spawn(());
        let mut grid = ThingGrid::new(Vec2::ZERO);
        let s = stub(e, 10.0, 10.0);
        grid.insert(s);
        grid.remove(&s);

        let mut hit = 0;
        grid.for_each_in_cell(0, 0, |_| hit += 1);
        assert_eq!(hit, 0);
    }

    #[test]
    fn noblockmap_is_never_registered() {
        let mut w = World::new();
        let e = w.spawn(());
        let mut grid = ThingGrid::new(Vec2::ZERO);
        let mut s = stub(e, 10.0, 10.0);
        s.flags = MobjFlags::NOBLOCKMAP;
        grid.insert(s);

        let mut hit = 0;
        grid.for_each_in_cell(0, 0, |_| hit += 1);
        assert_eq!(hit, 0);
    }
}
