mod actions;
mod blockmap;
mod collide;
#[cfg(test)]
pub(crate) mod fixtures;
mod motion;
mod registry;
mod sound;
mod transform;

pub use actions::{MoveArgs, RotateArgs, RotateKind};
pub use blockmap::{BlockBox, PolyBlockmap};
pub use registry::{
    CrushMode, PO_ANCHOR, PO_LINE_START, PO_SPAWN, PolyError, PolySim, Polyobj,
};
pub use sound::{SeqDef, SeqSounds, SoundEvent, SoundId};
