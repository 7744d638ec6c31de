pub mod flags;

pub use flags::MobjFlags;

/// Largest radius any dynamic entity may have, in map units.  Polyobject
/// bounding boxes are inflated by this much before the blockmap conversion
/// so the broad phase never misses an entity whose center sits one cell
/// over from the geometry itself.
pub const MAXRADIUS: f32 = 32.0;

/// Fixed simulation rate, tics per second.
pub const TICRATE: u32 = 35;
