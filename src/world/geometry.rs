use bitflags::bitflags;
use glam::Vec2;

pub type LinedefId = u16;
pub type SegmentId = u16;
pub type VertexId = u16;

/// Runtime snapshot of one map's 2-D geometry.
///
/// Unlike the data a renderer would treat as immutable, `vertices` and the
/// derived linedef fields are live state: the polyobject transform rewrites
/// the vertex positions it owns in place, so collision, audio and any
/// later consumer all read the same authoritative copy.
#[derive(Debug)]
pub struct Level {
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub segs: Vec<Seg>,
    pub things: Vec<Thing>,
    pub blockmap: Blockmap,
}

/*------------------------- map things -------------------------------*/

/// Raw map thing.  Polyobject anchors and start spots carry the
/// polyobject id in the **angle** field, so it stays raw here.
#[derive(Clone, Copy, Debug)]
pub struct Thing {
    pub pos: Vec2,
    pub angle_raw: i16,
    pub type_id: u16,
}

/*--------------------------- linedefs -------------------------------*/

bitflags! {
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LinedefFlags: u16 {
        const IMPASSABLE     = 0x0001;
        const BLOCK_MONSTERS = 0x0002;
        const TWO_SIDED      = 0x0004;
        const SECRET         = 0x0040;
        const BLOCK_SOUND    = 0x0080;
    }
}

/// Axis classification of a line, used by the box-vs-line side test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlopeType {
    Horizontal,
    Vertical,
    Positive,
    Negative,
}

impl SlopeType {
    pub fn classify(d: Vec2) -> SlopeType {
        if d.x == 0.0 {
            SlopeType::Vertical
        } else if d.y == 0.0 {
            SlopeType::Horizontal
        } else if d.y / d.x > 0.0 {
            SlopeType::Positive
        } else {
            SlopeType::Negative
        }
    }
}

/// Hexen-format linedef: a byte special plus five byte args.
///
/// `bbox` and `slope` are derived fields; outside level finalisation only
/// the polyobject transform may rewrite them.
#[derive(Clone, Debug)]
pub struct Linedef {
    pub v1: VertexId,
    pub v2: VertexId,
    pub flags: LinedefFlags,
    pub special: u8,
    pub args: [u8; 5],
    pub bbox: Aabb,
    pub slope: SlopeType,
    /// Owned by a polyobject; skipped by static-line iteration.
    pub is_poly: bool,
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: Vec2,
}

/// Directed boundary edge tied to one linedef.
#[derive(Clone, Debug)]
pub struct Seg {
    pub v1: VertexId,
    pub v2: VertexId,
    pub linedef: LinedefId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Inverted box; grows around the first `add_point`.
    pub fn empty() -> Aabb {
        Aabb {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_center_radius(c: Vec2, r: f32) -> Aabb {
        Aabb {
            min: c - Vec2::splat(r),
            max: c + Vec2::splat(r),
        }
    }

    pub fn from_points(a: Vec2, b: Vec2) -> Aabb {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn add_point(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Strict overlap – boxes that merely touch do not count, matching the
    /// vanilla blocking tests.
    #[inline]
    pub fn overlaps(&self, o: &Aabb) -> bool {
        self.max.x > o.min.x && self.min.x < o.max.x && self.max.y > o.min.y && self.min.y < o.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/*--------------------------- blockmap -------------------------------*/

/// Static broad-phase grid: per cell, the linedefs whose bounding box
/// touches it.  Built once at level finalisation.
#[derive(Debug)]
pub struct Blockmap {
    pub origin: Vec2,
    pub width: i32,
    pub height: i32,
    pub cells: Vec<Vec<LinedefId>>,
}
