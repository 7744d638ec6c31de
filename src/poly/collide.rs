//! Collision probing for a candidate polyobject pose.
//!
//! The prober runs after the transform committed the candidate geometry:
//! it walks every blockmap cell under the footprint, tests each registered
//! entity's box against the boundary segs, pushes whatever straddles one,
//! and reports whether the motion step must be rolled back.  The probe
//! context is an explicit value – nothing here is shared between probes.

use glam::Vec2;
use hecs::World;

use super::registry::{CrushMode, Polyobj};
use crate::sim::{Health, ThingGrid, ThingSpatial, Vel};
use crate::world::{Aabb, Level, Linedef, LinedefFlags, SlopeType};

const CRUSH_DAMAGE: i32 = 3;

pub(crate) struct ProbeContext {
    pub thrust: f32,
    pub crush: CrushMode,
    pub blocked: bool,
}

/// Probe every entity under `polys[idx]`'s current footprint.  Probing
/// never short-circuits on the first hit: every straddling entity still
/// receives its thrust before the step is rolled back.
pub(crate) fn probe_footprint(
    polys: &[Polyobj],
    idx: usize,
    level: &Level,
    world: &mut World,
    grid: &ThingGrid,
    ctx: &mut ProbeContext,
) {
    let bb = polys[idx].blockbox;
    for by in bb.y1..=bb.y2 {
        for bx in bb.x1..=bb.x2 {
            grid.for_each_in_cell(bx, by, |stub| {
                check_blocking(stub, polys, idx, level, world, ctx);
            });
        }
    }
}

fn check_blocking(
    stub: &ThingSpatial,
    polys: &[Polyobj],
    idx: usize,
    level: &Level,
    world: &mut World,
    ctx: &mut ProbeContext,
) {
    use crate::defs::MobjFlags;

    if !stub.flags.contains(MobjFlags::SOLID) && !stub.player {
        return;
    }

    let mbox = Aabb::from_center_radius(stub.pos, stub.radius);

    for &sid in &polys[idx].segs {
        let seg = &level.segs[sid as usize];
        let line = &level.linedefs[seg.linedef as usize];

        if !mbox.overlaps(&line.bbox) {
            continue;
        }
        if box_on_line_side(&mbox, level, line).is_some() {
            // cleanly on one side – no contact
            continue;
        }

        thrust_and_damage(stub, sid, polys, level, world, ctx);
        ctx.blocked = true;
    }
}

fn thrust_and_damage(
    stub: &ThingSpatial,
    sid: crate::world::SegmentId,
    polys: &[Polyobj],
    level: &Level,
    world: &mut World,
    ctx: &mut ProbeContext,
) {
    use crate::defs::MobjFlags;

    if !stub.flags.contains(MobjFlags::SHOOTABLE) && !stub.player {
        return;
    }

    let seg = &level.segs[sid as usize];
    let a = level.vertices[seg.v1 as usize].pos;
    let b = level.vertices[seg.v2 as usize].pos;
    // perpendicular of the seg direction, pointing off its solid side
    let dir = (b - a).normalize_or_zero();
    let push = Vec2::new(dir.y, -dir.x) * ctx.thrust;

    let Ok((vel, health)) = world.query_one_mut::<(&mut Vel, Option<&mut Health>)>(stub.ent)
    else {
        return;
    };
    vel.0 += push;
    let momentum = vel.0;

    if ctx.crush != CrushMode::None {
        let lethal = ctx.crush == CrushMode::Always
            || !can_fit(level, polys, stub.pos + momentum, stub.radius);
        if lethal {
            if let Some(h) = health {
                h.0 -= CRUSH_DAMAGE;
            }
        }
    }
}

/// Simplified position check: can an entity box at `pos` exist without
/// straddling a blocking static line or any polyobject boundary line?
pub(crate) fn can_fit(level: &Level, polys: &[Polyobj], pos: Vec2, radius: f32) -> bool {
    let mbox = Aabb::from_center_radius(pos, radius);

    let fits = level.block_lines_iter(&mbox, |line| {
        let blocking =
            !line.flags.contains(LinedefFlags::TWO_SIDED) || line.flags.contains(LinedefFlags::IMPASSABLE);
        if blocking && mbox.overlaps(&line.bbox) && box_on_line_side(&mbox, level, line).is_none() {
            return false;
        }
        true
    });
    if !fits {
        return false;
    }

    for poly in polys {
        if !mbox.overlaps(&poly.bbox) {
            continue;
        }
        for &sid in &poly.segs {
            let line = &level.linedefs[level.segs[sid as usize].linedef as usize];
            if mbox.overlaps(&line.bbox) && box_on_line_side(&mbox, level, line).is_none() {
                return false;
            }
        }
    }
    true
}

/// Vanilla `P_BoxOnLineSide`: `Some(side)` when the whole box sits on one
/// side of the line, `None` when it straddles.
pub(crate) fn box_on_line_side(bbox: &Aabb, level: &Level, line: &Linedef) -> Option<u32> {
    let v1 = level.vertices[line.v1 as usize].pos;
    let d = level.vertices[line.v2 as usize].pos - v1;

    let (p1, p2) = match line.slope {
        SlopeType::Horizontal => {
            let pair = (bbox.max.y > v1.y, bbox.min.y > v1.y);
            if d.x < 0.0 { (!pair.0, !pair.1) } else { pair }
        }
        SlopeType::Vertical => {
            let pair = (bbox.max.x < v1.x, bbox.min.x < v1.x);
            if d.y < 0.0 { (!pair.0, !pair.1) } else { pair }
        }
        SlopeType::Positive => (
            point_on_line_side(Vec2::new(bbox.min.x, bbox.max.y), v1, d),
            point_on_line_side(Vec2::new(bbox.max.x, bbox.min.y), v1, d),
        ),
        SlopeType::Negative => (
            point_on_line_side(bbox.max, v1, d),
            point_on_line_side(bbox.min, v1, d),
        ),
    };

    match p1 == p2 {
        true => Some(p1 as u32),
        false => None,
    }
}

/// true ⇒ back side (side 1), matching vanilla `P_PointOnLineSide`.
#[inline]
fn point_on_line_side(p: Vec2, v1: Vec2, d: Vec2) -> bool {
    d.x * (p.y - v1.y) - d.y * (p.x - v1.x) >= 0.0
}

/*────────────────────────── tests ───────────────────────────*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::fixtures::square_poly_level;

    fn line_of(level: &Level, pred: impl Fn(&Linedef) -> bool) -> usize {
        level.linedefs.iter().position(|l| pred(l)).unwrap()
    }

    #[test]
    fn box_side_test_vertical_line() {
        let (level, _sim) = square_poly_level();
        // right edge of the square at x = 288
        let id = line_of(&level, |l| {
            l.is_poly && l.slope == SlopeType::Vertical && l.bbox.min.x == 288.0
        });
        let line = &level.linedefs[id];

        let clear = Aabb::from_center_radius(Vec2::new(320.0, 256.0), 16.0);
        assert!(box_on_line_side(&clear, &level, line).is_some());

        let straddling = Aabb::from_center_radius(Vec2::new(288.0, 256.0), 16.0);
        assert!(box_on_line_side(&straddling, &level, line).is_none());
    }

    #[test]
    fn box_side_test_diagonal_line() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();
        sim.polys[idx].angle = std::f32::consts::FRAC_PI_4;
        crate::poly::transform::update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);

        let id = line_of(&level, |l| {
            l.is_poly && matches!(l.slope, SlopeType::Positive | SlopeType::Negative)
        });
        let line = &level.linedefs[id];

        let far = Aabb::from_center_radius(Vec2::new(800.0, 800.0), 16.0);
        assert!(box_on_line_side(&far, &level, line).is_some());

        let center = line.bbox.center();
        let straddling = Aabb::from_center_radius(center, 16.0);
        assert!(box_on_line_side(&straddling, &level, line).is_none());
    }

    #[test]
    fn can_fit_respects_static_walls() {
        let (level, sim) = square_poly_level();
        // fixture wall runs x = 512, y in 128..384
        assert!(!can_fit(&level, sim.polys(), Vec2::new(516.0, 256.0), 16.0));
        assert!(can_fit(&level, sim.polys(), Vec2::new(620.0, 256.0), 16.0));
    }

    #[test]
    fn can_fit_respects_poly_boundaries() {
        let (level, sim) = square_poly_level();
        // overlapping the square's right edge at x = 288
        assert!(!can_fit(&level, sim.polys(), Vec2::new(292.0, 256.0), 16.0));
    }
}
