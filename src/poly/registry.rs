//! Polyobject registry: assembly from tagged level data and id lookup.
//!
//! Boundary chains are walked once at level load; the objects live until
//! the level is torn down.  Malformed content (unclosed loops, missing
//! markers, duplicates) aborts the load with a `PolyError` instead of
//! leaving half-built geometry behind.

use std::collections::HashMap;

use glam::Vec2;

use super::blockmap::{BlockBox, PolyBlockmap};
use super::motion::{PolyMove, PolyRotate};
use super::sound::{SeqDef, SoundEvent};
use super::transform::update_position;
use crate::world::{Aabb, Level, SegmentId};

/// Thing type of a polyobject anchor (template origin).
pub const PO_ANCHOR: u16 = 9300;
/// First of the three start-spot thing types; the offset from it encodes
/// the crush behaviour.
pub const PO_SPAWN: u16 = 9301;
/// Linedef special marking the first boundary line of a polyobject.
/// args: `[id, mirror, sound_seq, _, _]`.
pub const PO_LINE_START: u8 = 1;

const POLYOBJ_MAX: u32 = 255;
const MAX_SEGS: usize = 255;

/// What a blocked entity suffers beyond the push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrushMode {
    /// Push only.
    None,
    /// Damage when the pushed entity cannot get out of the way.
    Blocking,
    /// Damage on every contact.
    Always,
}

/// One movable sub-structure: a closed chain of segs plus its pose.
///
/// `origin` holds each seg's start vertex relative to the anchor, captured
/// once at assembly and never mutated – the undeformed template every
/// transform starts from.  `bbox`/`blockbox` always describe the last
/// *committed* pose, never a rolled-back candidate.
pub struct Polyobj {
    pub id: u8,
    pub segs: Vec<SegmentId>,
    pub origin: Vec<Vec2>,
    pub pos: Vec2,
    pub angle: f32,
    pub(crate) angle_old: f32,
    pub bbox: Aabb,
    pub(crate) blockbox: BlockBox,
    pub busy: bool,
    /// Partner id, resolved through the registry at call time – never an
    /// owning reference, so mutual pairs are representable.
    pub mirror: Option<u8>,
    pub sndseq: u8,
    pub crush: CrushMode,
    /// Center of the committed bounding box; audio only.
    pub sound_org: Vec2,
}

#[derive(Debug, thiserror::Error)]
pub enum PolyError {
    #[error("invalid polyobject id {0}")]
    InvalidId(u32),

    #[error("polyobject {0} referenced but never placed")]
    Unknown(u8),

    #[error("polyobject {0} has no start spot")]
    NoStartSpot(u8),

    #[error("polyobject {0} has no anchor")]
    NoAnchor(u8),

    #[error("polyobject {0} boundary loop does not close")]
    Unclosed(u8),

    #[error("duplicate boundary definition for polyobject {0}")]
    Duplicate(u8),

    #[error("polyobject {0} has more than {MAX_SEGS} segs")]
    TooManySegs(u8),

    #[error("polyobject {0} mirrors itself")]
    SelfMirror(u8),

    #[error("polyobject {0} was placed but has no boundary lines")]
    NoBoundary(u8),
}

/// Placement markers gathered from the thing list before any boundary
/// walking happens.
#[derive(Default)]
struct Placement {
    anchor: Option<Vec2>,
    spawn: Option<(Vec2, CrushMode)>,
}

/// Level-scoped owner of every polyobject, their footprint grid, the
/// in-flight motions and the pending sound events.
pub struct PolySim {
    pub(crate) polys: Vec<Polyobj>,
    pub(crate) bmap: PolyBlockmap,
    pub(crate) movers: Vec<PolyMove>,
    pub(crate) rotators: Vec<PolyRotate>,
    pub(crate) seqs: HashMap<(u8, bool), SeqDef>,
    pub(crate) sounds: Vec<SoundEvent>,
}

impl PolySim {
    /// Assemble every polyobject the level defines and commit their
    /// initial poses.  Mutates the level: boundary vertices move onto the
    /// start spots and the consumed line specials are cleared.
    pub fn from_level(level: &mut Level) -> Result<PolySim, PolyError> {
        let placements = collect_placements(level)?;

        let bmap = if placements.is_empty() {
            PolyBlockmap::empty()
        } else {
            PolyBlockmap::new(level.blockmap.width, level.blockmap.height)
        };

        let mut sim = PolySim {
            polys: Vec::new(),
            bmap,
            movers: Vec::new(),
            rotators: Vec::new(),
            seqs: HashMap::new(),
            sounds: Vec::new(),
        };

        // Scan for start lines and walk each boundary chain.
        for start in 0..level.segs.len() {
            let line_id = level.segs[start].linedef as usize;
            if level.linedefs[line_id].special != PO_LINE_START {
                continue;
            }
            let id = check_id(level.linedefs[line_id].args[0] as u32)?;

            let placement = placements.get(&id).ok_or(PolyError::Unknown(id))?;
            let (spawn, crush) = placement.spawn.ok_or(PolyError::NoStartSpot(id))?;
            let anchor = placement.anchor.ok_or(PolyError::NoAnchor(id))?;

            if sim.index_of(id).is_some() {
                return Err(PolyError::Duplicate(id));
            }

            let mirror = match level.linedefs[line_id].args[1] {
                0 => None,
                m if m == id => return Err(PolyError::SelfMirror(id)),
                m => Some(m),
            };
            let sndseq = level.linedefs[line_id].args[2];

            let segs = walk_boundary(level, start as SegmentId).ok_or(PolyError::Unclosed(id))?;
            if segs.len() > MAX_SEGS {
                return Err(PolyError::TooManySegs(id));
            }

            // Capture the template and hand the lines over to the poly.
            let mut origin = Vec::with_capacity(segs.len());
            for &sid in &segs {
                let seg = &level.segs[sid as usize];
                origin.push(level.vertices[seg.v1 as usize].pos - anchor);

                let line = &mut level.linedefs[seg.linedef as usize];
                line.special = 0;
                line.args[0] = 0;
                line.is_poly = true;
            }

            let mut poly = Polyobj {
                id,
                segs,
                origin,
                pos: spawn,
                angle: 0.0,
                angle_old: 0.0,
                bbox: Aabb::empty(),
                blockbox: BlockBox::default(),
                busy: false,
                mirror,
                sndseq,
                crush,
                sound_org: spawn,
            };
            update_position(&mut poly, level, &mut sim.bmap);
            sim.polys.push(poly);
        }

        // A placed polyobject with no boundary lines can never be valid.
        for &id in placements.keys() {
            if sim.index_of(id).is_none() {
                return Err(PolyError::NoBoundary(id));
            }
        }

        // Mirror links must name an assembled polyobject.
        for poly in &sim.polys {
            if let Some(m) = poly.mirror {
                if !sim.polys.iter().any(|p| p.id == m) {
                    return Err(PolyError::Unknown(m));
                }
            }
        }

        Ok(sim)
    }

    #[inline]
    pub fn polys(&self) -> &[Polyobj] {
        &self.polys
    }

    pub fn find(&self, id: u8) -> Option<&Polyobj> {
        self.polys.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: u8) -> Option<&mut Polyobj> {
        self.polys.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn index_of(&self, id: u8) -> Option<usize> {
        self.polys.iter().position(|p| p.id == id)
    }

    /// Register the sound sequence used by polyobjects with `sndseq`,
    /// separately for the plain and the door variants.
    pub fn set_seq(&mut self, sndseq: u8, is_door: bool, def: SeqDef) {
        self.seqs.insert((sndseq, is_door), def);
    }

    /// Hand the tic's emitted sound cues to the audio layer.
    pub fn drain_sounds(&mut self) -> std::vec::Drain<'_, SoundEvent> {
        self.sounds.drain(..)
    }

    /// Does any polyobject footprint cover this blockmap cell?
    #[inline]
    pub fn covers(&self, bx: i32, by: i32) -> bool {
        self.bmap.covers(bx, by)
    }

    /// Footprint query for the generic line-iteration subsystem: if any
    /// polyobject covers cell (`bx`, `by`), run `func` over its boundary
    /// lines.  Lines are visited at most once per call; iteration stops
    /// early when `func` returns false.
    pub fn block_lines_iter<F>(&self, level: &Level, bx: i32, by: i32, mut func: F) -> bool
    where
        F: FnMut(&crate::world::Linedef) -> bool,
    {
        if !self.bmap.covers(bx, by) {
            return true;
        }

        let mut visited = vec![false; level.linedefs.len()];

        for poly in &self.polys {
            let bb = poly.blockbox;
            if bx < bb.x1 || bx > bb.x2 || by < bb.y1 || by > bb.y2 {
                continue;
            }
            for &sid in &poly.segs {
                let id = level.segs[sid as usize].linedef as usize;
                if visited[id] {
                    continue;
                }
                visited[id] = true;
                if !func(&level.linedefs[id]) {
                    return false;
                }
            }
        }
        true
    }
}

fn check_id(id: u32) -> Result<u8, PolyError> {
    if id == 0 || id > POLYOBJ_MAX {
        return Err(PolyError::InvalidId(id));
    }
    Ok(id as u8)
}

fn collect_placements(level: &Level) -> Result<HashMap<u8, Placement>, PolyError> {
    let mut placements: HashMap<u8, Placement> = HashMap::new();

    for thing in &level.things {
        let crush = match thing.type_id {
            PO_ANCHOR => None,
            t if (PO_SPAWN..PO_SPAWN + 3).contains(&t) => Some(match t - PO_SPAWN {
                0 => CrushMode::None,
                1 => CrushMode::Blocking,
                _ => CrushMode::Always,
            }),
            _ => continue,
        };

        // The id rides in the angle field of the marker thing.
        let id = check_id(thing.angle_raw as u32)?;
        let entry = placements.entry(id).or_default();
        match crush {
            None => entry.anchor = Some(thing.pos),
            Some(c) => entry.spawn = Some((thing.pos, c)),
        }
    }

    Ok(placements)
}

/// Walk the closed loop of shared vertex positions starting at `start`.
/// Returns the ordered chain, or `None` when the loop never returns to the
/// start vertex.
fn walk_boundary(level: &Level, start: SegmentId) -> Option<Vec<SegmentId>> {
    let mut chain = vec![start];
    let home = level.vertices[level.segs[start as usize].v1 as usize].pos;
    let mut cursor = level.vertices[level.segs[start as usize].v2 as usize].pos;

    while cursor != home {
        let next = level.segs.iter().enumerate().position(|(i, s)| {
            !chain.contains(&(i as SegmentId)) && level.vertices[s.v1 as usize].pos == cursor
        })?;
        chain.push(next as SegmentId);
        cursor = level.vertices[level.segs[next].v2 as usize].pos;

        if chain.len() > level.segs.len() {
            return None;
        }
    }
    Some(chain)
}

/*────────────────────────── tests ───────────────────────────*/
