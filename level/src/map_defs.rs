use glam::Vec2;
use math::{Angle, FixedPoint, fixed_vec2};

use crate::flags::LineDefFlags;
use crate::ids::{LineId, SectorId, SideId, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeType {
    Horizontal,
    Vertical,
    Positive,
    Negative,
}

impl SlopeType {
    /// Classify a line by the signs of its deltas
    pub fn from_delta(dx: FixedPoint, dy: FixedPoint) -> Self {
        if dx.is_zero() {
            SlopeType::Vertical
        } else if dy.is_zero() {
            SlopeType::Horizontal
        } else if dx.is_negative() == dy.is_negative() {
            SlopeType::Positive
        } else {
            SlopeType::Negative
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: FixedPoint,
    pub y: FixedPoint,
}

impl Vertex {
    pub const fn new(x: FixedPoint, y: FixedPoint) -> Self {
        Self { x, y }
    }

    /// Float copy for renderers and tools
    pub fn to_vec2(self) -> Vec2 {
        fixed_vec2(self.x, self.y)
    }
}

/// The SECTORS record, with names resolved to flat numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub floorheight: FixedPoint,
    pub ceilingheight: FixedPoint,
    /// Flat number
    pub floorpic: usize,
    /// Flat number
    pub ceilingpic: usize,
    pub lightlevel: i16,
    pub special: i16,
    pub tag: i16,
}

impl Sector {
    /// `sky_flat` is the number of the sky flat, `None` if the resolver
    /// doesn't have one
    pub fn is_sky_ceiling(&self, sky_flat: Option<usize>) -> bool {
        sky_flat == Some(self.ceilingpic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideDef {
    /// Add this to the calculated texture column
    pub textureoffset: FixedPoint,
    /// Add this to the calculated texture top
    pub rowoffset: FixedPoint,
    /// Texture numbers, `None` where the name was blank
    pub toptexture: Option<usize>,
    pub bottomtexture: Option<usize>,
    pub midtexture: Option<usize>,
    /// Sector the SideDef is facing
    pub sector: SectorId,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox {
    pub top: FixedPoint,
    pub bottom: FixedPoint,
    pub left: FixedPoint,
    pub right: FixedPoint,
}

impl BBox {
    pub fn new(v1: Vertex, v2: Vertex) -> Self {
        let (left, right) = if v1.x < v2.x {
            (v1.x, v2.x)
        } else {
            (v2.x, v1.x)
        };
        let (bottom, top) = if v1.y < v2.y {
            (v1.y, v2.y)
        } else {
            (v2.y, v1.y)
        };
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Smallest box holding every point, `None` if there are none
    pub fn from_points(points: impl IntoIterator<Item = Vertex>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self::new(first, first);
        points.for_each(|p| bbox.add_point(p));
        Some(bbox)
    }

    pub fn add_point(&mut self, p: Vertex) {
        if p.x < self.left {
            self.left = p.x;
        }
        if p.x > self.right {
            self.right = p.x;
        }
        if p.y < self.bottom {
            self.bottom = p.y;
        }
        if p.y > self.top {
            self.top = p.y;
        }
    }

    /// Edges inclusive
    pub fn contains(&self, x: FixedPoint, y: FixedPoint) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    pub fn center(&self) -> Vertex {
        Vertex::new(
            self.left.midpoint(self.right),
            self.top.midpoint(self.bottom),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDef {
    /// Vertices, from v1 to v2
    pub v1: Vertex,
    pub v2: Vertex,
    pub vertex_ids: [VertexId; 2],
    /// Precalculated v2 - v1 for side checking
    pub dx: FixedPoint,
    pub dy: FixedPoint,
    /// `LineDefFlags` bits
    pub flags: u16,
    pub special: i16,
    pub tag: i16,
    /// Visual appearance. `sidenum[1]` is `None` if one sided
    pub sidenum: [Option<SideId>; 2],
    /// Extent of the line, for clipping
    pub bbox: BBox,
    pub slopetype: SlopeType,
    /// Set once the segs are loaded
    pub frontsector: Option<SectorId>,
    pub backsector: Option<SectorId>,
}

impl LineDef {
    #[inline]
    pub fn is_two_sided(&self) -> bool {
        self.flags & LineDefFlags::TWO_SIDED != 0
    }

    /// Side 0 always exists on a loaded line
    pub fn front_side(&self) -> Option<SideId> {
        self.sidenum[0]
    }

    pub fn back_side(&self) -> Option<SideId> {
        self.sidenum[1]
    }

    /// P_PointOnLineSide. 0 is the front, 1 the back.
    pub fn point_on_side(&self, x: FixedPoint, y: FixedPoint) -> usize {
        if self.dx.is_zero() {
            if x <= self.v1.x {
                return (self.dy.to_bits() > 0) as usize;
            }
            return (self.dy.to_bits() < 0) as usize;
        }
        if self.dy.is_zero() {
            if y <= self.v1.y {
                return (self.dx.to_bits() < 0) as usize;
            }
            return (self.dx.to_bits() > 0) as usize;
        }

        let dx = x - self.v1.x;
        let dy = y - self.v1.y;
        let left = (self.dy >> 16) * dx;
        let right = dy * (self.dx >> 16);

        if right < left {
            return 0; // front
        }
        1 // back
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Vertices, from v1 to v2
    pub v1: Vertex,
    pub v2: Vertex,
    pub vertex_ids: [VertexId; 2],
    /// Offset distance along the linedef (from `v1`) to the start of this
    /// segment
    pub offset: FixedPoint,
    pub angle: Angle,
    /// Which side of the linedef this seg runs along, 0 or 1
    pub side: usize,
    pub sidedef: SideId,
    /// The Linedef this segment travels along
    pub linedef: LineId,
    pub frontsector: SectorId,
    /// Only set when the linedef is two sided
    pub backsector: Option<SectorId>,
}

/// A convex run of segs, the leaf of the BSP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSector {
    pub sector: SectorId,
    /// How many `Segment`s line this `SubSector`
    pub seg_count: usize,
    /// The `Segment` to start with
    pub start_seg: usize,
}

impl SubSector {
    pub fn segs(&self) -> std::ops::Range<usize> {
        self.start_seg..self.start_seg + self.seg_count
    }
}
