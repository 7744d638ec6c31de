//! Per-tic move / rotate state machines.
//!
//! Both machines share one shape: an optional pre-motion wait, a ramp
//! toward the destination pose, and an optional door delay that re-arms
//! the motion back toward the origin.  Every tic the candidate pose is
//! committed through the transform, probed against nearby entities, and
//! rolled back wholesale when anything blocks – contention is routine, not
//! an error, and the same step simply retries next tic.

use glam::Vec2;
use hecs::World;

use super::blockmap::PolyBlockmap;
use super::collide::{ProbeContext, probe_footprint};
use super::registry::{PolySim, Polyobj};
use super::sound::{SeqDef, SoundEvent};
use super::transform::update_position;
use crate::sim::ThingGrid;
use crate::world::Level;

/// In-flight linear motion of one polyobject.
pub(crate) struct PolyMove {
    pub poly: usize,
    pub org: Vec2,
    pub dst: Vec2,
    /// Per-axis speed magnitudes; direction comes from comparing against
    /// `dst` each tic.
    pub spd: Vec2,
    pub wait: u32,
    /// One-shot door delay; consumed when the destination is reached.
    pub delay: u32,
    pub sndwait: u32,
    pub thrust: f32,
    pub seq: Option<SeqDef>,
}

/// In-flight rotation; angles are radians relative to the arming pose.
pub(crate) struct PolyRotate {
    pub poly: usize,
    pub org: f32,
    pub now: f32,
    pub dst: f32,
    pub spd: f32,
    pub wait: u32,
    pub delay: u32,
    pub sndwait: u32,
    pub thrust: f32,
    pub seq: Option<SeqDef>,
}

impl PolySim {
    /// Advance every outstanding motion by one simulation tic.
    pub fn tick(&mut self, level: &mut Level, world: &mut World, grid: &ThingGrid) {
        let mut movers = std::mem::take(&mut self.movers);
        movers.retain_mut(|pm| {
            think_move(
                pm,
                &mut self.polys,
                &mut self.bmap,
                level,
                world,
                grid,
                &mut self.sounds,
            )
        });
        self.movers = movers;

        let mut rotators = std::mem::take(&mut self.rotators);
        rotators.retain_mut(|pr| {
            think_rotate(
                pr,
                &mut self.polys,
                &mut self.bmap,
                level,
                world,
                grid,
                &mut self.sounds,
            )
        });
        self.rotators = rotators;
    }
}

/// Shared wait handling: count the pre-motion delay down and fire the
/// closing-phase start cue the moment it expires.  Returns false while the
/// motion should stay dormant this tic.
fn run_wait(
    wait: &mut u32,
    sndwait: &mut u32,
    seq: &Option<SeqDef>,
    origin: Vec2,
    sounds: &mut Vec<SoundEvent>,
) -> bool {
    if *sndwait > 0 {
        *sndwait -= 1;
    }

    if *wait > 0 {
        *wait -= 1;
        if *wait != 0 {
            return false;
        }
        if let Some(seq) = seq {
            if let Some(id) = seq.close.start {
                sounds.push(SoundEvent { id, origin });
            }
            *sndwait = seq.close.delay;
        }
    }
    true
}

fn think_move(
    pm: &mut PolyMove,
    polys: &mut [Polyobj],
    bmap: &mut PolyBlockmap,
    level: &mut Level,
    world: &mut World,
    grid: &ThingGrid,
    sounds: &mut Vec<SoundEvent>,
) -> bool {
    let idx = pm.poly;
    let origin = polys[idx].sound_org;
    if !run_wait(&mut pm.wait, &mut pm.sndwait, &pm.seq, origin, sounds) {
        return true;
    }

    let old = polys[idx].pos;
    let mut finished = false;
    {
        let poly = &mut polys[idx];

        if pm.spd.x != 0.0 {
            if poly.pos.x < pm.dst.x {
                poly.pos.x += pm.spd.x;
                if poly.pos.x >= pm.dst.x {
                    finished = true;
                }
            } else {
                poly.pos.x -= pm.spd.x;
                if poly.pos.x <= pm.dst.x {
                    finished = true;
                }
            }
        }

        if pm.spd.y != 0.0 {
            if poly.pos.y < pm.dst.y {
                poly.pos.y += pm.spd.y;
                if poly.pos.y >= pm.dst.y {
                    finished = true;
                }
            } else {
                poly.pos.y -= pm.spd.y;
                if poly.pos.y <= pm.dst.y {
                    finished = true;
                }
            }
        }

        if finished {
            // land exactly on the destination
            poly.pos = pm.dst;
        } else if pm.sndwait == 0 {
            // re-trigger the loop cue of whichever direction we travel
            let half = if pm.dst == pm.org {
                pm.seq.map(|s| s.close)
            } else {
                pm.seq.map(|s| s.open)
            };
            if let Some(half) = half {
                if let Some(id) = half.mov {
                    sounds.push(SoundEvent { id, origin: poly.sound_org });
                    pm.sndwait = half.repeat;
                }
            }
        }

        update_position(poly, level, bmap);
    }

    let mut ctx = ProbeContext {
        thrust: pm.thrust,
        crush: polys[idx].crush,
        blocked: false,
    };
    probe_footprint(polys, idx, level, world, grid, &mut ctx);

    if ctx.blocked {
        let poly = &mut polys[idx];
        poly.pos = old;
        update_position(poly, level, bmap);
        return true;
    }

    if finished {
        if pm.delay != 1 {
            // a one-tic delay flows straight into the reverse: no stop cue
            let half = if pm.dst == pm.org {
                pm.seq.map(|s| s.close)
            } else {
                pm.seq.map(|s| s.open)
            };
            if let Some(id) = half.and_then(|h| h.stop) {
                sounds.push(SoundEvent { id, origin: polys[idx].sound_org });
            }
        }

        if pm.delay > 0 {
            pm.wait = pm.delay;
            pm.dst = pm.org;
            pm.delay = 0;
            return true;
        }

        polys[idx].busy = false;
        return false;
    }
    true
}

fn think_rotate(
    pr: &mut PolyRotate,
    polys: &mut [Polyobj],
    bmap: &mut PolyBlockmap,
    level: &mut Level,
    world: &mut World,
    grid: &ThingGrid,
    sounds: &mut Vec<SoundEvent>,
) -> bool {
    let idx = pr.poly;
    let origin = polys[idx].sound_org;
    if !run_wait(&mut pr.wait, &mut pr.sndwait, &pr.seq, origin, sounds) {
        return true;
    }

    let old = pr.now;
    let mut finished = false;
    pr.now += pr.spd;

    // arrival on the approach side; passing through zero also ends the
    // returning phase of a door swing
    if pr.dst > 0.0 {
        if pr.now <= 0.0 {
            pr.now = 0.0;
            finished = true;
        } else if pr.now >= pr.dst {
            pr.now = pr.dst;
            finished = true;
        }
    } else {
        if pr.now >= 0.0 {
            pr.now = 0.0;
            finished = true;
        } else if pr.now <= pr.dst {
            pr.now = pr.dst;
            finished = true;
        }
    }

    if !finished && pr.sndwait == 0 {
        // loop cue for the spin direction currently under way
        let half = if pr.spd < 0.0 {
            pr.seq.map(|s| s.close)
        } else {
            pr.seq.map(|s| s.open)
        };
        if let Some(half) = half {
            if let Some(id) = half.mov {
                sounds.push(SoundEvent { id, origin });
                pr.sndwait = half.repeat;
            }
        }
    }

    {
        let poly = &mut polys[idx];
        poly.angle = pr.org + pr.now;
        update_position(poly, level, bmap);
    }

    let mut ctx = ProbeContext {
        thrust: pr.thrust,
        crush: polys[idx].crush,
        blocked: false,
    };
    probe_footprint(polys, idx, level, world, grid, &mut ctx);

    if ctx.blocked {
        pr.now = old;
        let poly = &mut polys[idx];
        poly.angle = pr.org + pr.now;
        update_position(poly, level, bmap);
        return true;
    }

    if finished {
        if pr.delay != 1 {
            let half = if pr.spd < 0.0 {
                pr.seq.map(|s| s.close)
            } else {
                pr.seq.map(|s| s.open)
            };
            if let Some(id) = half.and_then(|h| h.stop) {
                sounds.push(SoundEvent { id, origin: polys[idx].sound_org });
            }
        }

        if pr.delay > 0 {
            pr.wait = pr.delay;
            pr.spd = -pr.spd;
            pr.delay = 0;
            return true;
        }

        polys[idx].busy = false;
        return false;
    }
    true
}

/*────────────────────────── tests ───────────────────────────*/
