use log::{debug, info, warn};
use math::{Angle, FixedPoint};
use wad::lumps::{
    LumpRecord, MapLump, NO_SIDEDEF, WadLineDef, WadNode, WadSector, WadSegment, WadSideDef,
    WadSubSector, WadVertex,
};
use wad::{LumpIter, MapLumps, records};

use crate::bsp::{BspTree, Node, NodeChild};
use crate::error::LoadError;
use crate::ids::{LineId, SectorId, SegId, SideId, SubSectorId, VertexId};
use crate::map_defs::{BBox, LineDef, Sector, Segment, SideDef, SlopeType, SubSector, Vertex};
use crate::pic::{PicResolver, SKY_FLAT_NAME, is_no_texture};
use crate::runtime::{RuntimeState, SectorState};

/// Knobs for `MapData::load`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail the load if a subsector's segs face more than one sector
    pub verify_subsector_sectors: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            verify_subsector_sectors: true,
        }
    }
}

/// The smallest and largest vertex, combined make up a rectangle enclosing
/// the level area
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapExtents {
    pub min_vertex: Vertex,
    pub max_vertex: Vertex,
    pub min_floor: FixedPoint,
    pub max_ceiling: FixedPoint,
}

impl MapExtents {
    fn new(vertexes: &[Vertex], sectors: &[Sector]) -> Self {
        let bbox = BBox::from_points(vertexes.iter().copied()).unwrap_or_default();
        Self {
            min_vertex: Vertex::new(bbox.left, bbox.bottom),
            max_vertex: Vertex::new(bbox.right, bbox.top),
            min_floor: sectors
                .iter()
                .map(|s| s.floorheight)
                .min()
                .unwrap_or_default(),
            max_ceiling: sectors
                .iter()
                .map(|s| s.ceilingheight)
                .max()
                .unwrap_or_default(),
        }
    }

    pub fn width(&self) -> FixedPoint {
        self.max_vertex.x - self.min_vertex.x
    }

    pub fn height(&self) -> FixedPoint {
        self.max_vertex.y - self.min_vertex.y
    }
}

/// The geometry of one level: every table fully linked by index, plus the
/// mutable per-sector and per-line state the play simulation works on.
///
/// The geometry is immutable once loaded. Only `runtime_mut()` hands out
/// mutable access.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    name: String,
    vertexes: Vec<Vertex>,
    sectors: Vec<Sector>,
    sidedefs: Vec<SideDef>,
    linedefs: Vec<LineDef>,
    segments: Vec<Segment>,
    subsectors: Vec<SubSector>,
    bsp: BspTree,
    extents: MapExtents,
    sky_flat: Option<usize>,
    runtime: RuntimeState,
}

impl MapData {
    /// Build the whole level from its lumps. Tables are loaded in dependency
    /// order and the first problem aborts the load, nothing is returned
    /// partially built.
    pub fn load(
        lumps: &MapLumps<'_>,
        pics: &dyn PicResolver,
        options: &LoadOptions,
    ) -> Result<Self, LoadError> {
        let name = lumps.name;

        let vertexes = load_vertexes(lumps.vertexes)?;
        info!("{name}: Loaded {} vertexes", vertexes.len());

        let sectors = load_sectors(lumps.sectors, pics)?;
        info!("{name}: Loaded {} sectors", sectors.len());

        let sidedefs = load_sidedefs(lumps.sidedefs, &sectors, pics)?;
        info!("{name}: Loaded {} sidedefs", sidedefs.len());

        let mut linedefs = load_linedefs(lumps.linedefs, &vertexes, &sidedefs)?;
        info!("{name}: Loaded {} linedefs", linedefs.len());

        let segments = load_segments(lumps.segs, &vertexes, &sidedefs, &linedefs)?;
        info!("{name}: Loaded {} segments", segments.len());

        link_lines(&mut linedefs, &segments, &sidedefs);

        let subsectors = load_subsectors(lumps.subsectors, &segments, options)?;
        info!("{name}: Loaded {} subsectors", subsectors.len());

        let bsp = load_nodes(lumps.nodes, &subsectors)?;
        info!("{name}: Loaded {} bsp nodes", bsp.nodes().len());

        let sector_states = group_lines(&sectors, &linedefs);
        let runtime = RuntimeState::new(sector_states, linedefs.len());
        let extents = MapExtents::new(&vertexes, &sectors);
        let sky_flat = pics.flat_num_for_name(SKY_FLAT_NAME);

        Ok(Self {
            name: name.to_string(),
            vertexes,
            sectors,
            sidedefs,
            linedefs,
            segments,
            subsectors,
            bsp,
            extents,
            sky_flat,
            runtime,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertexes(&self) -> &[Vertex] {
        &self.vertexes
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }

    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn subsectors(&self) -> &[SubSector] {
        &self.subsectors
    }

    pub fn bsp(&self) -> &BspTree {
        &self.bsp
    }

    pub fn extents(&self) -> &MapExtents {
        &self.extents
    }

    /// Flat number of the sky, if the resolver knows it
    pub fn sky_flat(&self) -> Option<usize> {
        self.sky_flat
    }

    pub fn sector(&self, id: SectorId) -> &Sector {
        &self.sectors[id.index()]
    }

    pub fn sidedef(&self, id: SideId) -> &SideDef {
        &self.sidedefs[id.index()]
    }

    pub fn linedef(&self, id: LineId) -> &LineDef {
        &self.linedefs[id.index()]
    }

    pub fn segment(&self, id: SegId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn subsector(&self, id: SubSectorId) -> &SubSector {
        &self.subsectors[id.index()]
    }

    pub fn line_vertices(&self, id: LineId) -> [VertexId; 2] {
        self.linedefs[id.index()].vertex_ids
    }

    pub fn seg_vertices(&self, id: SegId) -> [VertexId; 2] {
        self.segments[id.index()].vertex_ids
    }

    /// The segs lining a subsector, in lump order
    pub fn subsector_segs(&self, id: SubSectorId) -> &[Segment] {
        &self.segments[self.subsectors[id.index()].segs()]
    }

    pub fn point_in_subsector(&self, x: FixedPoint, y: FixedPoint) -> SubSectorId {
        self.bsp.point_in_subsector(x, y)
    }

    pub fn point_in_sector(&self, x: FixedPoint, y: FixedPoint) -> SectorId {
        self.subsector(self.point_in_subsector(x, y)).sector
    }

    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut RuntimeState {
        &mut self.runtime
    }
}

fn lump_records<T: LumpRecord>(lump: MapLump, data: &[u8]) -> Result<LumpIter<'_, T>, LoadError> {
    records::<T>(data).map_err(|e| LoadError::Format {
        lump: lump.name(),
        len: e.len,
        record_size: e.record_size,
    })
}

/// Check an index field against the length of an already loaded table
fn check_index(
    lump: MapLump,
    record: usize,
    field: &'static str,
    index: usize,
    len: usize,
) -> Result<usize, LoadError> {
    if index < len {
        Ok(index)
    } else {
        Err(LoadError::Reference {
            lump: lump.name(),
            record,
            field,
            index,
            len,
        })
    }
}

pub fn load_vertexes(data: &[u8]) -> Result<Vec<Vertex>, LoadError> {
    Ok(lump_records::<WadVertex>(MapLump::Vertexes, data)?
        .map(|v| Vertex::new(FixedPoint::from_raw(v.x), FixedPoint::from_raw(v.y)))
        .collect())
}

fn flat_num(pics: &dyn PicResolver, name: &str, record: usize) -> Result<usize, LoadError> {
    let name = name.to_ascii_uppercase();
    pics.flat_num_for_name(&name).ok_or_else(|| {
        debug!("No flat named {name:?} for sector {record}");
        LoadError::Resolution {
            lump: MapLump::Sectors.name(),
            record,
            kind: "flat",
            name,
        }
    })
}

fn texture_num(
    pics: &dyn PicResolver,
    name: &str,
    record: usize,
) -> Result<Option<usize>, LoadError> {
    if is_no_texture(name) {
        return Ok(None);
    }
    let name = name.to_ascii_uppercase();
    match pics.texture_num_for_name(&name) {
        Some(num) => Ok(Some(num)),
        None => {
            debug!("No texture named {name:?} for sidedef {record}");
            Err(LoadError::Resolution {
                lump: MapLump::SideDefs.name(),
                record,
                kind: "texture",
                name,
            })
        }
    }
}

pub fn load_sectors(data: &[u8], pics: &dyn PicResolver) -> Result<Vec<Sector>, LoadError> {
    lump_records::<WadSector>(MapLump::Sectors, data)?
        .enumerate()
        .map(|(i, s)| {
            Ok(Sector {
                floorheight: FixedPoint::from_raw(s.floor_height),
                ceilingheight: FixedPoint::from_raw(s.ceil_height),
                floorpic: flat_num(pics, &s.floor_tex, i)?,
                ceilingpic: flat_num(pics, &s.ceil_tex, i)?,
                lightlevel: s.light_level,
                special: s.kind,
                tag: s.tag,
            })
        })
        .collect()
}

pub fn load_sidedefs(
    data: &[u8],
    sectors: &[Sector],
    pics: &dyn PicResolver,
) -> Result<Vec<SideDef>, LoadError> {
    lump_records::<WadSideDef>(MapLump::SideDefs, data)?
        .enumerate()
        .map(|(i, s)| {
            let sector = check_index(
                MapLump::SideDefs,
                i,
                "sector",
                s.sector as usize,
                sectors.len(),
            )?;
            Ok(SideDef {
                textureoffset: FixedPoint::from_raw(s.x_offset),
                rowoffset: FixedPoint::from_raw(s.y_offset),
                toptexture: texture_num(pics, &s.upper_tex, i)?,
                bottomtexture: texture_num(pics, &s.lower_tex, i)?,
                midtexture: texture_num(pics, &s.middle_tex, i)?,
                sector: SectorId::new(sector),
            })
        })
        .collect()
}

/// Lines are built with their sectors unset, `link_lines` fills them in once
/// the segs exist
pub fn load_linedefs(
    data: &[u8],
    vertexes: &[Vertex],
    sidedefs: &[SideDef],
) -> Result<Vec<LineDef>, LoadError> {
    let lump = MapLump::LineDefs;
    lump_records::<WadLineDef>(lump, data)?
        .enumerate()
        .map(|(i, l)| {
            let v1 = check_index(lump, i, "v1", l.start_vertex as usize, vertexes.len())?;
            let v2 = check_index(lump, i, "v2", l.end_vertex as usize, vertexes.len())?;
            let front = check_index(
                lump,
                i,
                "front sidedef",
                l.front_sidedef() as usize,
                sidedefs.len(),
            )?;
            let back = match l.back_sidedef() {
                Some(side) => Some(check_index(
                    lump,
                    i,
                    "back sidedef",
                    side as usize,
                    sidedefs.len(),
                )?),
                None => None,
            };

            let vertex_ids = [VertexId::new(v1), VertexId::new(v2)];
            let (v1, v2) = (vertexes[v1], vertexes[v2]);
            let dx = v2.x - v1.x;
            let dy = v2.y - v1.y;
            if dx.is_zero() && dy.is_zero() {
                warn!("Linedef {i} has zero length");
            }

            Ok(LineDef {
                v1,
                v2,
                vertex_ids,
                dx,
                dy,
                flags: l.flags,
                special: l.special,
                tag: l.sector_tag,
                sidenum: [Some(SideId::new(front)), back.map(SideId::new)],
                bbox: BBox::new(v1, v2),
                slopetype: SlopeType::from_delta(dx, dy),
                frontsector: None,
                backsector: None,
            })
        })
        .collect()
}

pub fn load_segments(
    data: &[u8],
    vertexes: &[Vertex],
    sidedefs: &[SideDef],
    linedefs: &[LineDef],
) -> Result<Vec<Segment>, LoadError> {
    let lump = MapLump::Segs;
    lump_records::<WadSegment>(lump, data)?
        .enumerate()
        .map(|(i, s)| {
            let v1 = check_index(lump, i, "v1", s.start_vertex as usize, vertexes.len())?;
            let v2 = check_index(lump, i, "v2", s.end_vertex as usize, vertexes.len())?;
            let line_num = check_index(lump, i, "linedef", s.linedef as usize, linedefs.len())?;
            // A side other than 0 or 1 reads as a huge index, never a panic
            let side = check_index(lump, i, "side", s.side as u16 as usize, 2)?;

            let line = &linedefs[line_num];
            let missing_side = |field| LoadError::Reference {
                lump: lump.name(),
                record: i,
                field,
                index: NO_SIDEDEF as usize,
                len: sidedefs.len(),
            };

            let sidedef = line.sidenum[side].ok_or_else(|| missing_side("sidedef"))?;
            let frontsector = sidedefs[sidedef.index()].sector;
            let backsector = if line.is_two_sided() {
                let other = line.sidenum[side ^ 1].ok_or_else(|| missing_side("back sidedef"))?;
                Some(sidedefs[other.index()].sector)
            } else {
                None
            };

            Ok(Segment {
                v1: vertexes[v1],
                v2: vertexes[v2],
                vertex_ids: [VertexId::new(v1), VertexId::new(v2)],
                offset: FixedPoint::from_raw(s.offset),
                angle: Angle::from_raw(s.angle),
                side,
                sidedef,
                linedef: LineId::new(line_num),
                frontsector,
                backsector,
            })
        })
        .collect()
}

/// Set each line's front and back sector. The segs carry the side to sector
/// mapping, lines that no seg runs along fall back to their sidedefs. The
/// back sector is only set for two sided lines.
pub fn link_lines(linedefs: &mut [LineDef], segments: &[Segment], sidedefs: &[SideDef]) {
    for seg in segments {
        let line = &mut linedefs[seg.linedef.index()];
        if seg.side == 0 {
            line.frontsector = Some(seg.frontsector);
            line.backsector = seg.backsector;
        } else if line.is_two_sided() {
            line.frontsector = seg.backsector;
            line.backsector = Some(seg.frontsector);
        }
    }

    let mut unseen = 0;
    for line in linedefs.iter_mut().filter(|l| l.frontsector.is_none()) {
        unseen += 1;
        let sector_of = |side: Option<SideId>| side.map(|s| sidedefs[s.index()].sector);
        line.frontsector = sector_of(line.sidenum[0]);
        line.backsector = if line.is_two_sided() {
            sector_of(line.sidenum[1])
        } else {
            None
        };
    }
    if unseen > 0 {
        debug!("{unseen} linedefs have no front seg, linked by sidedef");
    }
}

pub fn load_subsectors(
    data: &[u8],
    segments: &[Segment],
    options: &LoadOptions,
) -> Result<Vec<SubSector>, LoadError> {
    let lump = MapLump::SubSectors;
    lump_records::<WadSubSector>(lump, data)?
        .enumerate()
        .map(|(i, s)| {
            let start = check_index(lump, i, "first seg", s.start_seg as usize, segments.len())?;
            let end = start + s.seg_count as usize;
            if s.seg_count == 0 || end > segments.len() {
                return Err(LoadError::Reference {
                    lump: lump.name(),
                    record: i,
                    field: "seg count",
                    index: end,
                    len: segments.len(),
                });
            }

            let sector = segments[start].frontsector;
            if options.verify_subsector_sectors {
                if let Some((n, seg)) = segments[start..end]
                    .iter()
                    .enumerate()
                    .find(|(_, seg)| seg.frontsector != sector)
                {
                    return Err(LoadError::MixedSubSector {
                        subsector: i,
                        seg: start + n,
                        expected: sector.index(),
                        found: seg.frontsector.index(),
                    });
                }
            }

            Ok(SubSector {
                sector,
                seg_count: s.seg_count as usize,
                start_seg: start,
            })
        })
        .collect()
}

pub fn load_nodes(data: &[u8], subsectors: &[SubSector]) -> Result<BspTree, LoadError> {
    let lump = MapLump::Nodes;
    let iter = lump_records::<WadNode>(lump, data)?;
    let node_count = iter.len();

    let nodes = iter
        .enumerate()
        .map(|(i, n)| {
            let child = |raw: u16| match NodeChild::from_raw(raw) {
                NodeChild::SubSector(id) => {
                    check_index(lump, i, "subsector child", id.index(), subsectors.len())
                        .map(|_| NodeChild::SubSector(id))
                }
                NodeChild::Node(id) => check_index(lump, i, "node child", id.index(), node_count)
                    .map(|_| NodeChild::Node(id)),
            };
            let children = [child(n.children[0])?, child(n.children[1])?];
            let bbox = |b: [i16; 4]| BBox {
                top: FixedPoint::from_raw(b[0]),
                bottom: FixedPoint::from_raw(b[1]),
                left: FixedPoint::from_raw(b[2]),
                right: FixedPoint::from_raw(b[3]),
            };
            Ok(Node {
                x: FixedPoint::from_raw(n.x),
                y: FixedPoint::from_raw(n.y),
                dx: FixedPoint::from_raw(n.dx),
                dy: FixedPoint::from_raw(n.dy),
                bboxes: [bbox(n.bboxes[0]), bbox(n.bboxes[1])],
                children,
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    if nodes.is_empty() {
        check_index(lump, 0, "root subsector", 0, subsectors.len())?;
    }
    BspTree::new(nodes)
}

/// Collect the lines of every sector, then size each sector by its lines and
/// put its sound origin in the middle
pub fn group_lines(sectors: &[Sector], linedefs: &[LineDef]) -> Vec<SectorState> {
    let mut states = vec![SectorState::default(); sectors.len()];

    for (i, line) in linedefs.iter().enumerate() {
        let id = LineId::new(i);
        if let Some(front) = line.frontsector {
            states[front.index()].lines.push(id);
        }
        if let Some(back) = line.backsector {
            if line.frontsector != Some(back) {
                states[back.index()].lines.push(id);
            }
        }
    }

    for (i, state) in states.iter_mut().enumerate() {
        state.line_count = state.lines.len();
        let points = state.lines.iter().flat_map(|l| {
            let line = &linedefs[l.index()];
            [line.v1, line.v2]
        });
        match BBox::from_points(points) {
            Some(bbox) => {
                state.bbox = bbox;
                state.sound_origin = bbox.center();
            }
            None => warn!("Sector {i} has no lines"),
        }
    }
    states
}
