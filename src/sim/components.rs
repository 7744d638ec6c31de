use glam::Vec2;

use crate::defs::MobjFlags;

/// World-space position.  The polyobject subsystem is strictly 2-D.
#[derive(Debug, Clone, Copy)]
pub struct Pos(pub Vec2);

/// Momentum in map units per tic.  Thrust from moving geometry lands here;
/// integrating it back into `Pos` is the movement system's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vel(pub Vec2);

#[derive(Debug, Clone, Copy)]
pub struct Angle(pub f32);

/// Per-entity collision size.
#[derive(Debug, Clone, Copy)]
pub struct Class {
    pub radius: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ActorFlags(pub MobjFlags);

#[derive(Debug, Clone, Copy)]
pub struct Health(pub i32);

/// Marker: players are pushed and blocked even without SOLID/SHOOTABLE.
#[derive(Debug, Clone, Copy)]
pub struct Player;
