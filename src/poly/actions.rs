//! Line-special command entry points: arm a move or a rotate on an idle
//! polyobject, then cascade the same command to its mirror partner.
//!
//! Arguments keep the Hexen byte conventions of the level format: byte
//! angles (256 per turn), byte distances and the `speed / 8` scaling the
//! original specials used.  A command aimed at a busy or unknown
//! polyobject is silently ignored – callers must not assume an effect.

use std::f32::consts::TAU;

use glam::Vec2;

use super::motion::{PolyMove, PolyRotate};
use super::registry::PolySim;

/// Args of a `Polyobj_Move` style special.
#[derive(Clone, Copy, Debug)]
pub struct MoveArgs {
    pub speed: u8,
    /// Byte angle of travel (0 = east, 64 = north).
    pub angle: u8,
    /// Travel distance in map units.
    pub dist: u8,
    /// Door variants only: tics to linger before returning.
    pub delay: u8,
}

/// Args of a `Polyobj_Rotate` style special.
#[derive(Clone, Copy, Debug)]
pub struct RotateArgs {
    pub speed: u8,
    /// Byte-angle distance to turn through.
    pub dist: u8,
    /// Door variant only.
    pub delay: u8,
}

/// Which rotate special fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateKind {
    /// Spin toward the commanded angle.
    Plain,
    /// Spin the opposite way (the "left" special).
    Reflect,
    /// Swing out, linger, swing back.
    Door,
}

impl PolySim {
    /// Command a linear move.  Cascades to the mirror partner with the
    /// travel direction turned 180°.
    pub fn cmd_move(&mut self, id: u8, args: MoveArgs, is_door: bool) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.move_inner(idx, args, is_door, false);
    }

    /// Command a rotation.  Whether the mirror spins the same or the
    /// opposite way is the XOR of "this is a mirror invocation" and "the
    /// special requests reflection", so chained pairs alternate correctly.
    pub fn cmd_rotate(&mut self, id: u8, args: RotateArgs, kind: RotateKind) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.rotate_inner(idx, args, kind, false);
    }

    fn move_inner(&mut self, idx: usize, args: MoveArgs, is_door: bool, is_mirror: bool) {
        {
            let poly = &mut self.polys[idx];
            if poly.busy {
                return;
            }
            poly.busy = true;
        }

        let mut angle = args.angle;
        if is_mirror {
            angle = angle.wrapping_add(128);
        }
        let vector = byte_angle_vector(angle);

        let pos = self.polys[idx].pos;
        let dst = pos + vector * args.dist as f32;

        let spd = Vec2::new(
            if dst.x == pos.x {
                0.0
            } else {
                (vector.x * args.speed as f32 / 8.0).abs()
            },
            if dst.y == pos.y {
                0.0
            } else {
                (vector.y * args.speed as f32 / 8.0).abs()
            },
        );

        let delay = if is_door { args.delay as u32 + 1 } else { 0 };
        let thrust = (args.speed as f32 / 64.0).clamp(1.0, 4.0);

        let seq = self.seqs.get(&(self.polys[idx].sndseq, is_door)).copied();
        let mut sndwait = 0;
        if let Some(seq) = &seq {
            if let Some(start) = seq.open.start {
                self.sounds.push(super::sound::SoundEvent {
                    id: start,
                    origin: self.polys[idx].sound_org,
                });
            }
            sndwait = seq.open.delay;
        }

        self.movers.push(PolyMove {
            poly: idx,
            org: pos,
            dst,
            spd,
            wait: 0,
            delay,
            sndwait,
            thrust,
            seq,
        });

        if !is_mirror {
            if let Some(mirror) = self.polys[idx].mirror {
                if let Some(midx) = self.index_of(mirror) {
                    self.move_inner(midx, args, is_door, true);
                }
            }
        }
    }

    fn rotate_inner(&mut self, idx: usize, args: RotateArgs, kind: RotateKind, is_mirror: bool) {
        {
            let poly = &mut self.polys[idx];
            if poly.busy {
                return;
            }
            poly.busy = true;
        }

        let delay = if kind == RotateKind::Door {
            args.delay as u32 + 1
        } else {
            0
        };

        let mut spd = args.speed as f32 * TAU / 2048.0;
        let mut dst = args.dist as f32 * TAU / 256.0;
        let thrust = (args.speed as f32 / 2.0).clamp(1.0, 4.0);

        let reflect = is_mirror ^ (kind == RotateKind::Reflect);
        if reflect {
            dst = -dst;
            spd = -spd;
        }

        // rotators always use the door half of the sequence bank
        let seq = self.seqs.get(&(self.polys[idx].sndseq, true)).copied();
        let mut sndwait = 0;
        if let Some(seq) = &seq {
            if let Some(start) = seq.open.start {
                self.sounds.push(super::sound::SoundEvent {
                    id: start,
                    origin: self.polys[idx].sound_org,
                });
            }
            sndwait = seq.open.delay;
        }

        self.rotators.push(PolyRotate {
            poly: idx,
            org: self.polys[idx].angle,
            now: 0.0,
            dst,
            spd,
            wait: 0,
            delay,
            sndwait,
            thrust,
            seq,
        });

        if !is_mirror {
            if let Some(mirror) = self.polys[idx].mirror {
                if let Some(midx) = self.index_of(mirror) {
                    self.rotate_inner(midx, args, kind, true);
                }
            }
        }
    }
}

/// Unit travel vector for a byte angle; the four cardinals bypass the trig
/// so axis-aligned movement stays exact.
fn byte_angle_vector(angle: u8) -> Vec2 {
    match angle {
        0 => Vec2::new(1.0, 0.0),
        64 => Vec2::new(0.0, 1.0),
        128 => Vec2::new(-1.0, 0.0),
        192 => Vec2::new(0.0, -1.0),
        a => {
            let r = a as f32 * TAU / 256.0;
            Vec2::new(r.cos(), r.sin())
        }
    }
}

/*────────────────────────── tests ───────────────────────────*/
