//! Hand-built level fixtures shared by the polyobject tests.
//!
//! The canonical map is an 8×8-cell grid (1024×1024 map units, origin at
//! zero) holding one 64×64 polyobject square spawned at (256, 256) and a
//! solid wall at x = 512.

use glam::Vec2;

use super::registry::{PO_ANCHOR, PO_LINE_START, PO_SPAWN, PolySim};
use crate::world::{
    Aabb, Blockmap, Level, Linedef, LinedefFlags, Seg, SlopeType, Thing, Vertex,
};

pub(crate) struct LevelBuilder {
    vertices: Vec<Vertex>,
    linedefs: Vec<Linedef>,
    segs: Vec<Seg>,
    things: Vec<Thing>,
}

impl LevelBuilder {
    pub fn new() -> LevelBuilder {
        LevelBuilder {
            vertices: Vec::new(),
            linedefs: Vec::new(),
            segs: Vec::new(),
            things: Vec::new(),
        }
    }

    fn vertex(&mut self, p: Vec2) -> u16 {
        self.vertices.push(Vertex { pos: p });
        (self.vertices.len() - 1) as u16
    }

    fn line(&mut self, v1: u16, v2: u16, flags: LinedefFlags, special: u8, args: [u8; 5]) -> u16 {
        self.linedefs.push(Linedef {
            v1,
            v2,
            flags,
            special,
            args,
            bbox: Aabb::empty(),
            slope: SlopeType::Vertical,
            is_poly: false,
        });
        (self.linedefs.len() - 1) as u16
    }

    /// One-sided blocking wall (no seg; walls only matter to `can_fit`).
    pub fn wall(&mut self, a: Vec2, b: Vec2) {
        let v1 = self.vertex(a);
        let v2 = self.vertex(b);
        self.line(v1, v2, LinedefFlags::IMPASSABLE, 0, [0; 5]);
    }

    /// Closed square boundary for polyobject `id`, counter-clockwise from
    /// the bottom-left corner, with the start special on the first line.
    pub fn poly_square(&mut self, id: u8, center: Vec2, half: f32, mirror: u8, sndseq: u8) {
        let corners = [
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ];
        let vs: Vec<u16> = corners.iter().map(|&c| self.vertex(c)).collect();

        for i in 0..4 {
            let v1 = vs[i];
            let v2 = vs[(i + 1) % 4];
            let (special, args) = if i == 0 {
                (PO_LINE_START, [id, mirror, sndseq, 0, 0])
            } else {
                (0, [0; 5])
            };
            let line = self.line(v1, v2, LinedefFlags::default(), special, args);
            self.segs.push(Seg { v1, v2, linedef: line });
        }
    }

    pub fn thing(&mut self, type_id: u16, pos: Vec2, id_in_angle: i16) {
        self.things.push(Thing {
            pos,
            angle_raw: id_in_angle,
            type_id,
        });
    }

    pub fn build(self) -> Level {
        let mut level = Level {
            vertices: self.vertices,
            linedefs: self.linedefs,
            segs: self.segs,
            things: self.things,
            blockmap: Blockmap {
                origin: Vec2::ZERO,
                width: 0,
                height: 0,
                cells: Vec::new(),
            },
        };
        level.finalise(Vec2::ZERO, 8, 8);
        level
    }
}

/// One polyobject (id 1, crush None) on its start spot at (256, 256),
/// plus a blocking wall at x = 512, y in 128..384.
pub(crate) fn square_poly_level() -> (Level, PolySim) {
    let mut b = LevelBuilder::new();
    b.poly_square(1, Vec2::new(800.0, 800.0), 32.0, 0, 0);
    b.thing(PO_ANCHOR, Vec2::new(800.0, 800.0), 1);
    b.thing(PO_SPAWN, Vec2::new(256.0, 256.0), 1);
    b.wall(Vec2::new(512.0, 128.0), Vec2::new(512.0, 384.0));
    let mut level = b.build();

    let sim = PolySim::from_level(&mut level).expect("fixture level must assemble");
    (level, sim)
}

/// Two mutually mirrored polyobjects: id 1 at (256, 256), id 2 at
/// (768, 256).
pub(crate) fn mirrored_pair_level() -> (Level, PolySim) {
    let mut b = LevelBuilder::new();
    b.poly_square(1, Vec2::new(800.0, 800.0), 32.0, 2, 0);
    b.poly_square(2, Vec2::new(800.0, 950.0), 32.0, 1, 0);
    b.thing(PO_ANCHOR, Vec2::new(800.0, 800.0), 1);
    b.thing(PO_SPAWN, Vec2::new(256.0, 256.0), 1);
    b.thing(PO_ANCHOR, Vec2::new(800.0, 950.0), 2);
    b.thing(PO_SPAWN, Vec2::new(768.0, 256.0), 2);
    let mut level = b.build();

    let sim = PolySim::from_level(&mut level).expect("fixture level must assemble");
    (level, sim)
}
