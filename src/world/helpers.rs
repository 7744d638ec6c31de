use glam::Vec2;

use super::{Aabb, Blockmap, Level, Linedef, SlopeType};

/// size of one grid cell in world units
const MAPBLOCKSHIFT: i32 = 7; // 2^7 = 128
const MAPBLOCKSIZE: f32 = (1 << MAPBLOCKSHIFT) as f32;

// ──────────────────────────────────────────────────────────────────────────
//                       Level – public helpers
// ──────────────────────────────────────────────────────────────────────────
impl Level {
    /// convert world-space x (or y) to an integer block coordinate
    #[inline]
    pub fn world_to_block(x: f32, origin: f32) -> i32 {
        ((x - origin) / MAPBLOCKSIZE).floor() as i32
    }

    /// Compute every linedef's derived bounds / slope and build the static
    /// blockmap.  Call once after the raw geometry is filled in.
    pub fn finalise(&mut self, origin: Vec2, width: i32, height: i32) {
        for i in 0..self.linedefs.len() {
            let a = self.vertices[self.linedefs[i].v1 as usize].pos;
            let b = self.vertices[self.linedefs[i].v2 as usize].pos;
            let line = &mut self.linedefs[i];
            line.bbox = Aabb::from_points(a, b);
            line.slope = SlopeType::classify(b - a);
        }

        let mut cells = vec![Vec::new(); (width * height) as usize];
        for (id, line) in self.linedefs.iter().enumerate() {
            let bx1 = Self::world_to_block(line.bbox.min.x, origin.x).clamp(0, width - 1);
            let bx2 = Self::world_to_block(line.bbox.max.x, origin.x).clamp(0, width - 1);
            let by1 = Self::world_to_block(line.bbox.min.y, origin.y).clamp(0, height - 1);
            let by2 = Self::world_to_block(line.bbox.max.y, origin.y).clamp(0, height - 1);
            for by in by1..=by2 {
                for bx in bx1..=bx2 {
                    cells[(by * width + bx) as usize].push(id as u16);
                }
            }
        }

        self.blockmap = Blockmap {
            origin,
            width,
            height,
            cells,
        };
    }

    /// Vanilla-style iterator over *unique* static linedefs touched by the
    /// axis-aligned box.  Polyobject-owned lines are skipped – their cells
    /// went stale the moment the polyobject first moved, and the polyobject
    /// footprint query covers them instead.  Stops early when `func`
    /// returns false.
    pub fn block_lines_iter<F>(&self, bbox: &Aabb, mut func: F) -> bool
    where
        F: FnMut(&Linedef) -> bool,
    {
        let bm = &self.blockmap;
        assert!(bm.width > 0 && bm.height > 0);

        let mut visited = vec![false; self.linedefs.len()];

        let bx1 = Self::world_to_block(bbox.min.x, bm.origin.x).clamp(0, bm.width - 1);
        let by1 = Self::world_to_block(bbox.min.y, bm.origin.y).clamp(0, bm.height - 1);
        let bx2 = Self::world_to_block(bbox.max.x, bm.origin.x).clamp(0, bm.width - 1);
        let by2 = Self::world_to_block(bbox.max.y, bm.origin.y).clamp(0, bm.height - 1);

        for by in by1..=by2 {
            for bx in bx1..=bx2 {
                for &id in &bm.cells[(by * bm.width + bx) as usize] {
                    if visited[id as usize] {
                        continue;
                    }
                    visited[id as usize] = true;

                    let line = &self.linedefs[id as usize];
                    if line.is_poly {
                        continue;
                    }
                    if !func(line) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/
