//! The pose transform: materialise a polyobject's anchor + angle into its
//! owned vertices, refresh the derived linedef data and re-register the
//! blockmap footprint.
//!
//! Vertices are always recomputed absolutely from the untransformed
//! template (`anchor + R(angle) · origin`), never incrementally, so
//! repeated rotation accumulates no drift and re-running the transform
//! with an unchanged pose is bit-identical.

use glam::Vec2;

use super::blockmap::{BlockBox, PolyBlockmap};
use super::registry::Polyobj;
use crate::defs::MAXRADIUS;
use crate::world::{Aabb, Level, SlopeType};

pub(crate) fn update_position(poly: &mut Polyobj, level: &mut Level, bmap: &mut PolyBlockmap) {
    let adiff = poly.angle - poly.angle_old;
    poly.angle_old = poly.angle;

    bmap.remove_footprint(poly.blockbox);

    // Reposition the owned start vertices.  A zero angle skips the
    // rotation math entirely (vanilla fast path, kept for determinism).
    if poly.angle != 0.0 {
        let (s, c) = poly.angle.sin_cos();
        for (i, &sid) in poly.segs.iter().enumerate() {
            let o = poly.origin[i];
            let v1 = level.segs[sid as usize].v1 as usize;
            level.vertices[v1].pos = Vec2::new(o.x * c - o.y * s, o.x * s + o.y * c) + poly.pos;
        }
    } else {
        for (i, &sid) in poly.segs.iter().enumerate() {
            let v1 = level.segs[sid as usize].v1 as usize;
            level.vertices[v1].pos = poly.origin[i] + poly.pos;
        }
    }

    // Refresh each owning line and accumulate the committed bounding box.
    // Every vertex is some seg's start vertex, so v1 alone covers the hull.
    let mut bbox = Aabb::empty();
    for &sid in &poly.segs {
        let seg = &level.segs[sid as usize];
        let a = level.vertices[seg.v1 as usize].pos;
        let b = level.vertices[seg.v2 as usize].pos;

        let line = &mut level.linedefs[seg.linedef as usize];
        line.bbox = Aabb::from_points(a, b);
        if adiff != 0.0 {
            let lv1 = level.vertices[line.v1 as usize].pos;
            let lv2 = level.vertices[line.v2 as usize].pos;
            line.slope = SlopeType::classify(lv2 - lv1);
        }

        bbox.add_point(a);
    }
    poly.bbox = bbox;
    poly.sound_org = bbox.center();

    // Inflate so entities standing next to the box are still probed, then
    // clamp into the grid.
    let bm = &level.blockmap;
    poly.blockbox = BlockBox {
        x1: Level::world_to_block(bbox.min.x - MAXRADIUS, bm.origin.x).clamp(0, bm.width - 1),
        y1: Level::world_to_block(bbox.min.y - MAXRADIUS, bm.origin.y).clamp(0, bm.height - 1),
        x2: Level::world_to_block(bbox.max.x + MAXRADIUS, bm.origin.x).clamp(0, bm.width - 1),
        y2: Level::world_to_block(bbox.max.y + MAXRADIUS, bm.origin.y).clamp(0, bm.height - 1),
    };

    bmap.add_footprint(poly.blockbox);
}

/*────────────────────────── tests ───────────────────────────*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::fixtures::square_poly_level;

    fn vertex_snapshot(level: &Level) -> Vec<Vec2> {
        level.vertices.iter().map(|v| v.pos).collect()
    }

    #[test]
    fn vertices_match_anchor_plus_rotated_template() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();

        {
            let poly = &mut sim.polys[idx];
            poly.pos = Vec2::new(300.0, 260.0);
            poly.angle = std::f32::consts::FRAC_PI_3;
        }
        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);

        let poly = &sim.polys[idx];
        let (s, c) = poly.angle.sin_cos();
        for (i, &sid) in poly.segs.iter().enumerate() {
            let o = poly.origin[i];
            let expect = poly.pos + Vec2::new(o.x * c - o.y * s, o.x * s + o.y * c);
            let got = level.vertices[level.segs[sid as usize].v1 as usize].pos;
            assert!((got - expect).length() < 1e-4, "{got} vs {expect}");
        }
    }

    #[test]
    fn transform_is_idempotent_bit_for_bit() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();

        sim.polys[idx].angle = 0.7310;
        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);
        let first = vertex_snapshot(&level);
        let first_box = sim.polys[idx].bbox;

        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);
        assert_eq!(vertex_snapshot(&level), first);
        assert_eq!(sim.polys[idx].bbox, first_box);
    }

    #[test]
    fn sound_origin_is_box_center() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();

        sim.polys[idx].pos = Vec2::new(400.0, 500.0);
        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);

        let poly = &sim.polys[idx];
        assert_eq!(poly.sound_org, poly.bbox.center());
        assert_eq!(poly.sound_org, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn blockbox_is_clamped_to_the_grid() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();
        let w = level.blockmap.width;
        let h = level.blockmap.height;

        for pos in [
            Vec2::new(100_000.0, -50_000.0),
            Vec2::new(-100_000.0, 99_999.0),
        ] {
            sim.polys[idx].pos = pos;
            update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);
            let bb = sim.polys[idx].blockbox;
            assert!(bb.x1 >= 0 && bb.x2 < w && bb.x1 <= bb.x2);
            assert!(bb.y1 >= 0 && bb.y2 < h && bb.y1 <= bb.y2);
        }
    }

    #[test]
    fn footprint_moves_with_the_poly() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();
        let total = sim.bmap.total();

        sim.polys[idx].pos = Vec2::new(900.0, 900.0);
        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);

        // Same box size, so the same number of cells – just elsewhere.
        assert_eq!(sim.bmap.total(), total);
        assert!(sim.bmap.covers(7, 7));
        assert!(!sim.bmap.covers(2, 2));
    }

    #[test]
    fn slope_reclassified_only_on_rotation() {
        let (mut level, mut sim) = square_poly_level();
        let idx = sim.index_of(1).unwrap();

        sim.polys[idx].angle = std::f32::consts::FRAC_PI_4;
        update_position(&mut sim.polys[idx], &mut level, &mut sim.bmap);

        let poly = &sim.polys[idx];
        for &sid in &poly.segs {
            let line = &level.linedefs[level.segs[sid as usize].linedef as usize];
            assert!(matches!(line.slope, SlopeType::Positive | SlopeType::Negative));
        }
    }
}
