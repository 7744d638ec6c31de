//! Sound-cue surface of the polyobject sim.
//!
//! Actual sequence data and playback live in the audio layer; this module
//! only defines the shape of a sequence and the fire-and-forget events the
//! motion code emits.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundId(pub u16);

/// One half of a door/move sequence: the cues for a single direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqSounds {
    pub start: Option<SoundId>,
    /// Re-triggered every `repeat` tics while the motion is under way.
    pub mov: Option<SoundId>,
    pub stop: Option<SoundId>,
    /// Tics before the first `mov` cue after `start`.
    pub delay: u32,
    pub repeat: u32,
}

/// Full sequence for one polyobject sound id: opening and closing halves.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqDef {
    pub open: SeqSounds,
    pub close: SeqSounds,
}

/// “Play cue X at point P”, drained by the audio layer after each tic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundEvent {
    pub id: SoundId,
    pub origin: Vec2,
}
