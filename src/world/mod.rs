mod geometry;
mod helpers;

pub use geometry::{
    Aabb, Blockmap, Level, Linedef, LinedefFlags, LinedefId, Seg, SegmentId, SlopeType, Thing,
    Vertex, VertexId,
};
