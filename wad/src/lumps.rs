// Structures, in WAD order:
//  - [ ] Thing     (not part of the level geometry)
//  - [X] LineDef
//  - [X] SideDef
//  - [X] Vertex
//  - [X] Segment   (SEGS)
//  - [X] SubSector (SSECTORS)
//  - [X] Node
//  - [X] Sector
//  - [ ] Reject
//  - [ ] Blockmap

/// Side index meaning "no sidedef", `-1` when read as a signed short
pub const NO_SIDEDEF: u16 = 0xFFFF;

/// Bit set in a node child identifier when the child is a subsector
pub const IS_SSECTOR_MASK: u16 = 0x8000;

/// A fixed-size record in a map lump
pub trait LumpRecord: Sized {
    /// Size of one record in bytes
    const SIZE: usize;

    /// Decode one record. `bytes` is always exactly `SIZE` long.
    fn parse(bytes: &[u8]) -> Self;
}

#[inline]
pub fn read_i16(bytes: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode an 8 byte name. Everything from the first NUL on is padding.
pub fn read_name(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(8)
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// The lumps following a map marker, in the order they are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLump {
    /// Position and angle for all monster, powerup and spawn location
    Things = 1,
    /// An array of lines referencing two vertices. Also points to one or two
    /// `SideDef` depending on if this line is a wall or a portal
    LineDefs,
    /// Defines upper, lower, and middle textures and their offsets
    SideDefs,
    /// An array of signed short X, Y pairs
    Vertexes,
    /// Portions of lines cut by the binary space partition
    Segs,
    /// Set of segments of a `LineDef` representing a convex subspace
    SubSectors,
    /// BSP with segs, nodes and sub-sector leaves
    Nodes,
    /// Area surrounded by lines, with set ceiling and floor textures/heights
    /// with light level
    Sectors,
    /// Sector-to-sector visibility matrix
    Reject,
    /// 128x128 grid partition of the map lines
    Blockmap,
}

impl MapLump {
    /// Offset from the map marker lump
    pub const fn offset(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            MapLump::Things => "THINGS",
            MapLump::LineDefs => "LINEDEFS",
            MapLump::SideDefs => "SIDEDEFS",
            MapLump::Vertexes => "VERTEXES",
            MapLump::Segs => "SEGS",
            MapLump::SubSectors => "SSECTORS",
            MapLump::Nodes => "NODES",
            MapLump::Sectors => "SECTORS",
            MapLump::Reject => "REJECT",
            MapLump::Blockmap => "BLOCKMAP",
        }
    }
}

/// A `Vertex` is the basic struct used for any type of coordinate
/// in the game
///
/// The data in the WAD lump is structured as follows:
///
/// | Field Size | Data Type | Content      |
/// |------------|-----------|--------------|
/// |  0x00-0x01 |    i16    | X Coordinate |
/// |  0x02-0x03 |    i16    | Y Coordinate |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WadVertex {
    pub x: i16,
    pub y: i16,
}

impl LumpRecord for WadVertex {
    const SIZE: usize = 4;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            x: read_i16(bytes, 0),
            y: read_i16(bytes, 2),
        }
    }
}

/// A `Sector` is a horizontal (east-west and north-south) area of the level
/// where a floor height and ceiling height is defined.
///
/// | Field Size | Data Type | Content                |
/// |------------|-----------|------------------------|
/// |  0x00-0x01 |    i16    | Floor height           |
/// |  0x02-0x03 |    i16    | Ceiling height         |
/// |  0x04-0x0B |  [u8; 8]  | Floor flat name        |
/// |  0x0C-0x13 |  [u8; 8]  | Ceiling flat name      |
/// |  0x14-0x15 |    i16    | Light level            |
/// |  0x16-0x17 |    i16    | Special type           |
/// |  0x18-0x19 |    i16    | Tag                    |
///
/// Each `Sector` record is 26 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSector {
    pub floor_height: i16,
    pub ceil_height: i16,
    /// Floor texture name
    pub floor_tex: String,
    /// Ceiling texture name
    pub ceil_tex: String,
    /// Light level from 0-255. There are actually only 32 brightnesses
    /// possible so blocks of 8 are the same bright
    pub light_level: i16,
    /// This determines some area-effects called special sectors
    pub kind: i16,
    /// a "tag" number corresponding to LINEDEF(s) with the same tag
    /// number
    pub tag: i16,
}

impl LumpRecord for WadSector {
    const SIZE: usize = 26;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            floor_height: read_i16(bytes, 0),
            ceil_height: read_i16(bytes, 2),
            floor_tex: read_name(&bytes[4..12]),
            ceil_tex: read_name(&bytes[12..20]),
            light_level: read_i16(bytes, 20),
            kind: read_i16(bytes, 22),
            tag: read_i16(bytes, 24),
        }
    }
}

/// A sidedef is a definition of what wall texture(s) to draw along a
/// `LineDef`, and a group of sidedefs outline the space of a `Sector`
///
/// | Field Size | Data Type | Content               |
/// |------------|-----------|-----------------------|
/// |  0x00-0x01 |    i16    | X offset              |
/// |  0x02-0x03 |    i16    | Y offset              |
/// |  0x04-0x0B |  [u8; 8]  | Upper texture name    |
/// |  0x0C-0x13 |  [u8; 8]  | Lower texture name    |
/// |  0x14-0x1B |  [u8; 8]  | Middle texture name   |
/// |  0x1C-0x1D |    u16    | Sector it faces       |
///
/// Each `SideDef` record is 30 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSideDef {
    pub x_offset: i16,
    pub y_offset: i16,
    /// Name of upper texture used for example in the upper of a window
    pub upper_tex: String,
    /// Name of lower texture used for example in the front of a step
    pub lower_tex: String,
    /// The regular part of a wall
    pub middle_tex: String,
    /// Sector that this sidedef faces or helps to surround
    pub sector: u16,
}

impl LumpRecord for WadSideDef {
    const SIZE: usize = 30;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            x_offset: read_i16(bytes, 0),
            y_offset: read_i16(bytes, 2),
            upper_tex: read_name(&bytes[4..12]),
            lower_tex: read_name(&bytes[12..20]),
            middle_tex: read_name(&bytes[20..28]),
            sector: read_u16(bytes, 28),
        }
    }
}

/// Each linedef represents a line from one of the VERTEXES to another.
///
///| Field Size | Data Type      | Content                                   |
///|------------|----------------|-------------------------------------------|
///|  0x00-0x01 | Unsigned short | Start vertex                              |
///|  0x02-0x03 | Unsigned short | End vertex                                |
///|  0x04-0x05 | Unsigned short | Flags                                     |
///|  0x06-0x07 | Signed short   | Line type / Action                        |
///|  0x08-0x09 | Signed short   | Sector tag                                |
///|  0x0A-0x0B | Unsigned short | Front sidedef                             |
///|  0x0C-0x0D | Unsigned short | Back sidedef  ( 0xFFFF side not present ) |
///
/// A Linedef will always have at least one side. This first side is referred to
/// as either front or right. If you imagine a linedef starting from the bottom
/// of the screen travelling upwards then the right side of this line is the first
/// valid side (and is the front).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadLineDef {
    /// The line starts from this point
    pub start_vertex: u16,
    /// The line ends at this point
    pub end_vertex: u16,
    /// The line attributes
    pub flags: u16,
    pub special: i16,
    /// Ties this line's effect type to all SECTORS that have the same tag
    pub sector_tag: i16,
    /// Front and back sidedef. The back is `NO_SIDEDEF` on one-sided lines
    pub sides: [u16; 2],
}

impl WadLineDef {
    pub const fn front_sidedef(&self) -> u16 {
        self.sides[0]
    }

    pub const fn back_sidedef(&self) -> Option<u16> {
        if self.sides[1] == NO_SIDEDEF {
            None
        } else {
            Some(self.sides[1])
        }
    }
}

impl LumpRecord for WadLineDef {
    const SIZE: usize = 14;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            start_vertex: read_u16(bytes, 0),
            end_vertex: read_u16(bytes, 2),
            flags: read_u16(bytes, 4),
            special: read_i16(bytes, 6),
            sector_tag: read_i16(bytes, 8),
            sides: [read_u16(bytes, 10), read_u16(bytes, 12)],
        }
    }
}

/// The Segments (SEGS) are in a sequential order determined by the `SubSector`
/// (SSECTOR), which are part of the NODES recursive tree
///
/// | Field Size | Data Type | Content                              |
/// |------------|-----------|--------------------------------------|
/// |  0x00-0x01 |    u16    | Index to vertex the line starts from |
/// |  0x02-0x03 |    u16    | Index to vertex the line ends with   |
/// |  0x04-0x05 |    i16    | Angle in Binary Angle Measurement (BAMS) |
/// |  0x06-0x07 |    u16    | Index to the linedef this seg travels along|
/// |  0x08-0x09 |    i16    | Direction along line. 0 == SEG is on the right and follows the line, 1 == SEG travels in opposite direction |
/// |  0x0A-0x0B |    i16    | Offset: this is the distance along the linedef this seg starts at |
///
/// Each `Segment` record is 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSegment {
    pub start_vertex: u16,
    pub end_vertex: u16,
    /// Top 16 bits of a binary angle
    pub angle: i16,
    /// The Linedef this segment travels along
    pub linedef: u16,
    /// The `side`, 0 = front/right, 1 = back/left
    pub side: i16,
    /// Offset distance along the linedef (from `start_vertex`) to the start
    /// of this `Segment`
    pub offset: i16,
}

impl LumpRecord for WadSegment {
    const SIZE: usize = 12;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            start_vertex: read_u16(bytes, 0),
            end_vertex: read_u16(bytes, 2),
            angle: read_i16(bytes, 4),
            linedef: read_u16(bytes, 6),
            side: read_i16(bytes, 8),
            offset: read_i16(bytes, 10),
        }
    }
}

/// A `SubSector` divides up all the SECTORS into convex polygons. They are then
/// referenced through the NODES resources. There will be (number of nodes) + 1.
///
/// | Field Size | Data Type | Content                            |
/// |------------|-----------|------------------------------------|
/// |  0x00-0x01 |    u16    | How many segments line this sector |
/// |  0x02-0x03 |    u16    | Index to the starting segment      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSubSector {
    /// How many `Segment`s line this `SubSector`
    pub seg_count: u16,
    /// The `Segment` to start with
    pub start_seg: u16,
}

impl LumpRecord for WadSubSector {
    const SIZE: usize = 4;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            seg_count: read_u16(bytes, 0),
            start_seg: read_u16(bytes, 2),
        }
    }
}

/// The base node structure as parsed from the WAD records. What is stored in the WAD
/// is the splitting line used for splitting the level, a box which encapsulates
/// the right and left regions of the split, and the index numbers for the
/// children of the node.
///
/// **The last node is the root node**
///
/// | Field Size | Content                                          |
/// |------------|--------------------------------------------------|
/// | 0x00-0x01  | X coordinate of the splitter                     |
/// | 0x02-0x03  | Y coordinate of the splitter                     |
/// | 0x04-0x05  | The amount to move in X to reach end of splitter |
/// | 0x06-0x07  | The amount to move in Y to reach end of splitter |
/// | 0x08-0x0F  | Right (front) box: top, bottom, left, right      |
/// | 0x10-0x17  | Left (back) box: top, bottom, left, right        |
/// | 0x18-0x19  | Right (front) child index + sub-sector indicator |
/// | 0x1A-0x1B  | Left (back) child index + sub-sector indicator   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadNode {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    /// Top, bottom, left, right for each child
    pub bboxes: [[i16; 4]; 2],
    /// If the high bit is set the child is a subsector
    pub children: [u16; 2],
}

impl LumpRecord for WadNode {
    const SIZE: usize = 28;

    fn parse(bytes: &[u8]) -> Self {
        let mut bboxes = [[0i16; 4]; 2];
        for (side, bbox) in bboxes.iter_mut().enumerate() {
            for (i, v) in bbox.iter_mut().enumerate() {
                *v = read_i16(bytes, 8 + side * 8 + i * 2);
            }
        }
        Self {
            x: read_i16(bytes, 0),
            y: read_i16(bytes, 2),
            dx: read_i16(bytes, 4),
            dy: read_i16(bytes, 6),
            bboxes,
            children: [read_u16(bytes, 24), read_u16(bytes, 26)],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lumps::*;

    #[test]
    fn names_stop_at_nul() {
        assert_eq!(read_name(b"FLOOR4_8"), "FLOOR4_8");
        assert_eq!(read_name(b"CEIL3_5\0"), "CEIL3_5");
        assert_eq!(read_name(b"-\0\0\0\0\0\0\0"), "-");
        assert_eq!(read_name(&[0u8; 8]), "");
        // Junk after the terminator is ignored
        assert_eq!(read_name(b"STEP\0XYZ"), "STEP");
    }

    #[test]
    fn linedef_back_side_sentinel() {
        let mut bytes = [0u8; 14];
        bytes[10..12].copy_from_slice(&3u16.to_le_bytes());
        bytes[12..14].copy_from_slice(&(-1i16).to_le_bytes());
        let line = WadLineDef::parse(&bytes);
        assert_eq!(line.front_sidedef(), 3);
        assert_eq!(line.back_sidedef(), None);

        bytes[12..14].copy_from_slice(&7u16.to_le_bytes());
        assert_eq!(WadLineDef::parse(&bytes).back_sidedef(), Some(7));
    }

    #[test]
    fn sector_record() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-24i16).to_le_bytes());
        bytes.extend_from_slice(&48i16.to_le_bytes());
        bytes.extend_from_slice(b"FLOOR5_2");
        bytes.extend_from_slice(b"CEIL3_5\0");
        bytes.extend_from_slice(&255i16.to_le_bytes());
        bytes.extend_from_slice(&9i16.to_le_bytes());
        bytes.extend_from_slice(&2i16.to_le_bytes());
        assert_eq!(bytes.len(), WadSector::SIZE);

        let s = WadSector::parse(&bytes);
        assert_eq!(s.floor_height, -24);
        assert_eq!(s.ceil_height, 48);
        assert_eq!(s.floor_tex, "FLOOR5_2");
        assert_eq!(s.ceil_tex, "CEIL3_5");
        assert_eq!(s.light_level, 255);
        assert_eq!(s.kind, 9);
        assert_eq!(s.tag, 2);
    }

    #[test]
    fn node_record_box_order() {
        let fields: [i16; 14] = [
            12, -342, 0, -20, // split
            -342, -362, 0, 12, // right box
            -333, -371, 12, 24, // left box
            665, 0, // children placeholders
        ];
        let mut bytes: Vec<u8> = fields.iter().flat_map(|v| v.to_le_bytes()).collect();
        bytes[26..28].copy_from_slice(&(0x8000u16 | 17).to_le_bytes());
        let node = WadNode::parse(&bytes);
        assert_eq!((node.x, node.y, node.dx, node.dy), (12, -342, 0, -20));
        assert_eq!(node.bboxes[0], [-342, -362, 0, 12]);
        assert_eq!(node.bboxes[1], [-333, -371, 12, 24]);
        assert_eq!(node.children, [665, 0x8000 | 17]);
    }

    #[test]
    fn segment_record() {
        let fields: [i16; 6] = [4, 5, 0x4000, 9, 1, 32];
        let bytes: Vec<u8> = fields.iter().flat_map(|v| v.to_le_bytes()).collect();
        let seg = WadSegment::parse(&bytes);
        assert_eq!(seg.start_vertex, 4);
        assert_eq!(seg.end_vertex, 5);
        assert_eq!(seg.angle, 0x4000);
        assert_eq!(seg.linedef, 9);
        assert_eq!(seg.side, 1);
        assert_eq!(seg.offset, 32);
    }
}
