mod components;
mod mob;
mod spacial;
mod tic;

pub use components::{ActorFlags, Angle, Class, Health, Player, Pos, Vel};
pub use mob::spawn_mobj;
pub use spacial::{ThingGrid, ThingSpatial};
pub use tic::TicRunner;
