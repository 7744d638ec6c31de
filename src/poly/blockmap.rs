//! Per-cell reference counts of polyobject footprints.
//!
//! The grid mirrors the static blockmap's dimensions.  Every committed
//! pose adds its (inflated, clamped) cell box here; the transform removes
//! the previous footprint before mutating the box, so counts never leak.

/// Clamped cell box of one polyobject: inclusive `[x1..=x2] × [y1..=y2]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

pub struct PolyBlockmap {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl PolyBlockmap {
    pub fn new(width: i32, height: i32) -> PolyBlockmap {
        PolyBlockmap {
            width,
            height,
            cells: vec![0; (width * height).max(0) as usize],
        }
    }

    /// Zero-size grid for maps without polyobjects.
    pub fn empty() -> PolyBlockmap {
        PolyBlockmap::new(0, 0)
    }

    #[inline]
    fn idx(&self, bx: i32, by: i32) -> usize {
        (by * self.width + bx) as usize
    }

    /// Does any polyobject footprint cover this cell?
    #[inline]
    pub fn covers(&self, bx: i32, by: i32) -> bool {
        bx >= 0 && by >= 0 && bx < self.width && by < self.height && self.cells[self.idx(bx, by)] > 0
    }

    #[inline]
    pub fn count(&self, bx: i32, by: i32) -> u8 {
        self.cells[self.idx(bx, by)]
    }

    /// Increment every cell of the box.  Boxes are pre-clamped by the
    /// transform, so no bounds failure is possible.
    pub fn add_footprint(&mut self, bb: BlockBox) {
        if self.cells.is_empty() {
            return;
        }
        for by in bb.y1..=bb.y2 {
            for bx in bb.x1..=bb.x2 {
                self.cells[(by * self.width + bx) as usize] += 1;
            }
        }
    }

    /// Decrement every cell of the box.  Saturating: the very first
    /// transform of a freshly assembled polyobject removes an all-zero
    /// placeholder box.
    pub fn remove_footprint(&mut self, bb: BlockBox) {
        if self.cells.is_empty() {
            return;
        }
        for by in bb.y1..=bb.y2 {
            for bx in bb.x1..=bb.x2 {
                let c = &mut self.cells[(by * self.width + bx) as usize];
                *c = c.saturating_sub(1);
            }
        }
    }

    /// Total of all counts – footprint-conservation checks in tests.
    pub fn total(&self) -> u32 {
        self.cells.iter().map(|&c| c as u32).sum()
    }
}

/*────────────────────────── tests ───────────────────────────*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_is_conserved() {
        let mut bm = PolyBlockmap::new(8, 8);
        let bb = BlockBox { x1: 1, y1: 2, x2: 3, y2: 4 };

        bm.add_footprint(bb);
        assert_eq!(bm.total(), 9);
        assert!(bm.covers(2, 3));
        assert!(!bm.covers(0, 0));

        bm.remove_footprint(bb);
        assert_eq!(bm.total(), 0);
    }

    #[test]
    fn overlapping_footprints_stack() {
        let mut bm = PolyBlockmap::new(4, 4);
        let bb = BlockBox { x1: 0, y1: 0, x2: 1, y2: 1 };

        bm.add_footprint(bb);
        bm.add_footprint(bb);
        assert_eq!(bm.count(0, 0), 2);

        bm.remove_footprint(bb);
        assert!(bm.covers(1, 1));
        bm.remove_footprint(bb);
        assert!(!bm.covers(1, 1));
    }

    #[test]
    fn initial_placeholder_remove_saturates() {
        let mut bm = PolyBlockmap::new(4, 4);
        bm.remove_footprint(BlockBox::default());
        assert_eq!(bm.total(), 0);
    }

    #[test]
    fn empty_grid_ignores_footprints() {
        let mut bm = PolyBlockmap::empty();
        bm.add_footprint(BlockBox { x1: 0, y1: 0, x2: 0, y2: 0 });
        assert_eq!(bm.total(), 0);
    }
}
