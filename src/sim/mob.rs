use glam::Vec2;
use hecs::{Entity, World};

use super::spacial::{ThingGrid, ThingSpatial};
use super::{ActorFlags, Angle, Class, Health, Player, Pos, Vel};
use crate::defs::MobjFlags;

/// Spawn a dynamic entity and register it in the spatial grid.
pub fn spawn_mobj(
    world: &mut World,
    grid: &mut ThingGrid,
    pos: Vec2,
    radius: f32,
    flags: MobjFlags,
    player: bool,
) -> Entity {
    let ent = world.spawn((
        Pos(pos),
        Vel::default(),
        Angle(0.0),
        Class { radius },
        ActorFlags(flags),
        Health(100),
    ));
    if player {
        // infallible: the entity was just spawned
        let _ = world.insert_one(ent, Player);
    }

    grid.insert(ThingSpatial {
        ent,
        pos,
        radius,
        flags,
        player,
    });

    ent
}
