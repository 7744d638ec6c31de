//! Movable map geometry (“polyobjects”) for a Doom-style engine.
//!
//! A polyobject is a closed chain of boundary segs that can translate and
//! rotate independently of the otherwise static level: sliding doors,
//! swinging gates, rotating platforms.  This crate owns:
//!
//! * assembly of polyobjects from tagged level lines (`poly::registry`),
//! * the pose transform that rewrites the owned vertices, linedef bounds
//!   and blockmap footprint on every committed pose (`poly::transform`),
//! * the per-tic move / rotate state machines with entity collision and
//!   rollback (`poly::motion`),
//! * mirror-pair command propagation (`poly::actions`).
//!
//! Rendering, WAD decoding, savegames and sound *playback* are other
//! crates' business – this one only emits `SoundEvent`s and consumes the
//! level geometry it is handed.

pub mod defs;
pub mod poly;
pub mod sim;
pub mod world;
