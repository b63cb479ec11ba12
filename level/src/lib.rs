//! The level geometry model: vertexes, sectors, sidedefs, linedefs, segs,
//! subsectors and the BSP tree, loaded from the lumps of one map and linked
//! together by typed indices.
//!
//! Everything is in 16.16 fixed point so collision, sight and BSP walks
//! behave exactly as the original engine did.

pub mod bsp;
mod error;
pub mod flags;
pub mod ids;
pub mod map_data;
pub mod map_defs;
pub mod pic;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use bsp::{BspTree, Node, NodeChild};
pub use error::LoadError;
pub use flags::LineDefFlags;
pub use ids::*;
pub use map_data::{LoadOptions, MapData, MapExtents};
pub use map_defs::{BBox, LineDef, Sector, Segment, SideDef, SlopeType, SubSector, Vertex};
pub use pic::{PicNames, PicResolver, SKY_FLAT_NAME};
pub use runtime::{LineState, RuntimeState, SectorState, ThingRef, ThinkerRef};
