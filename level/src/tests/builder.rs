//! Builds map lumps in memory, record by record, in the on-disk layout

use wad::MapLumps;

use crate::PicNames;

fn push_name(buf: &mut Vec<u8>, name: &str) {
    let mut bytes = [0u8; 8];
    for (b, c) in bytes.iter_mut().zip(name.bytes()) {
        *b = c;
    }
    buf.extend_from_slice(&bytes);
}

fn push_i16s(buf: &mut Vec<u8>, values: &[i16]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

#[derive(Default, Clone)]
pub struct MapBuilder {
    pub vertexes: Vec<u8>,
    pub sectors: Vec<u8>,
    pub sidedefs: Vec<u8>,
    pub linedefs: Vec<u8>,
    pub segs: Vec<u8>,
    pub subsectors: Vec<u8>,
    pub nodes: Vec<u8>,
}

impl MapBuilder {
    pub fn vertex(&mut self, x: i16, y: i16) -> &mut Self {
        push_i16s(&mut self.vertexes, &[x, y]);
        self
    }

    pub fn sector(&mut self, floor: i16, ceil: i16, floor_tex: &str, ceil_tex: &str, light: i16) -> &mut Self {
        push_i16s(&mut self.sectors, &[floor, ceil]);
        push_name(&mut self.sectors, floor_tex);
        push_name(&mut self.sectors, ceil_tex);
        push_i16s(&mut self.sectors, &[light, 0, 0]);
        self
    }

    pub fn sidedef(&mut self, sector: i16, upper: &str, lower: &str, middle: &str) -> &mut Self {
        push_i16s(&mut self.sidedefs, &[0, 0]);
        push_name(&mut self.sidedefs, upper);
        push_name(&mut self.sidedefs, lower);
        push_name(&mut self.sidedefs, middle);
        push_i16s(&mut self.sidedefs, &[sector]);
        self
    }

    /// `back` of -1 is the one sided sentinel
    pub fn linedef(&mut self, v1: i16, v2: i16, flags: i16, front: i16, back: i16) -> &mut Self {
        push_i16s(&mut self.linedefs, &[v1, v2, flags, 0, 0, front, back]);
        self
    }

    pub fn seg(&mut self, v1: i16, v2: i16, angle: i16, linedef: i16, side: i16) -> &mut Self {
        push_i16s(&mut self.segs, &[v1, v2, angle, linedef, side, 0]);
        self
    }

    pub fn subsector(&mut self, count: i16, first: i16) -> &mut Self {
        push_i16s(&mut self.subsectors, &[count, first]);
        self
    }

    /// Boxes are `[top, bottom, left, right]`, child 0 is the right side
    pub fn node(&mut self, partition: [i16; 4], boxes: [[i16; 4]; 2], children: [u16; 2]) -> &mut Self {
        push_i16s(&mut self.nodes, &partition);
        push_i16s(&mut self.nodes, &boxes[0]);
        push_i16s(&mut self.nodes, &boxes[1]);
        push_i16s(&mut self.nodes, &[children[0] as i16, children[1] as i16]);
        self
    }

    pub fn lumps(&self) -> MapLumps<'_> {
        MapLumps {
            name: "TEST",
            vertexes: &self.vertexes,
            sectors: &self.sectors,
            sidedefs: &self.sidedefs,
            linedefs: &self.linedefs,
            segs: &self.segs,
            subsectors: &self.subsectors,
            nodes: &self.nodes,
        }
    }
}

pub const SUBSECTOR: u16 = 0x8000;

pub fn pics() -> PicNames {
    PicNames::new(["FLOOR4_8", "CEIL3_5", "F_SKY1"], ["STARTAN3", "STEP1"])
}

/// A 128x128 room split down the middle by a two sided line at x = 64.
///
/// Sector 0 is the left half, sector 1 the right half with a raised floor and
/// a sky ceiling. Each half is one subsector and a single node splits them.
///
/// ```text
///  v3 -------- v5 -------- v2
///  |    s0     |     s1     |
///  |           | L6         |
///  v0 -------- v4 -------- v1
/// ```
pub fn split_room() -> MapBuilder {
    let mut b = MapBuilder::default();
    b.vertex(0, 0)
        .vertex(128, 0)
        .vertex(128, 128)
        .vertex(0, 128)
        .vertex(64, 0)
        .vertex(64, 128);

    b.sector(0, 128, "FLOOR4_8", "CEIL3_5", 160)
        .sector(16, 128, "FLOOR4_8", "F_SKY1", 192);

    b.sidedef(0, "-", "-", "STARTAN3")
        .sidedef(0, "-", "-", "STARTAN3")
        .sidedef(1, "-", "-", "STARTAN3")
        .sidedef(1, "-", "-", "STARTAN3")
        .sidedef(1, "-", "-", "STARTAN3")
        .sidedef(0, "-", "-", "STARTAN3")
        .sidedef(1, "-", "-", "-")
        .sidedef(0, "", "step1", "-");

    // Walls run clockwise so the room is on their right
    b.linedef(0, 3, 1, 0, -1)
        .linedef(3, 5, 1, 1, -1)
        .linedef(5, 2, 1, 2, -1)
        .linedef(2, 1, 1, 3, -1)
        .linedef(1, 4, 1, 4, -1)
        .linedef(4, 0, 1, 5, -1)
        .linedef(4, 5, 4, 6, 7);

    // Left half
    b.seg(0, 3, 0x4000, 0, 0)
        .seg(3, 5, 0, 1, 0)
        .seg(4, 0, i16::MIN, 5, 0)
        .seg(5, 4, -0x4000, 6, 1);
    // Right half
    b.seg(5, 2, 0, 2, 0)
        .seg(2, 1, -0x4000, 3, 0)
        .seg(1, 4, i16::MIN, 4, 0)
        .seg(4, 5, 0x4000, 6, 0);

    b.subsector(4, 0).subsector(4, 4);

    b.node(
        [64, 0, 0, 128],
        [[128, 0, 64, 128], [128, 0, 0, 64]],
        [SUBSECTOR | 1, SUBSECTOR],
    );
    b
}
