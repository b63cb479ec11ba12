use crate::WadError;
use crate::lumps::{MapLump, read_i32, read_name};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::fmt;

/// Header which tells us the WAD type and where the data is
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | *Must* be an ASCII string (either "IWAD" or "PWAD")  |
/// | 0x04-0x07  | unsigned int | The number entries in the directory                  |
/// | 0x08-0x0b  | unsigned int | Offset in bytes to the directory in the WAD file     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadType {
    IWad,
    PWad,
}

/// Contains the details for a lump of data: where it starts, the size of it,
/// the name, and which of the loaded files it lives in
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | unsigned int | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | unsigned int | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
#[derive(Clone)]
pub struct LumpInfo {
    pub name: String,
    pub file_handle: usize,
    pub offset: usize,
    pub size: usize,
}

impl fmt::Debug for LumpInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nLumpInfo {{\n  name: {},\n  size: {},\n  offset: {},\n}}",
            &self.name, self.size, self.offset
        )
    }
}

/// The byte slices of one map's geometry lumps. This is all the level
/// loader needs from an archive, so it can just as well be built by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapLumps<'a> {
    pub name: &'a str,
    pub vertexes: &'a [u8],
    pub sectors: &'a [u8],
    pub sidedefs: &'a [u8],
    pub linedefs: &'a [u8],
    pub segs: &'a [u8],
    pub subsectors: &'a [u8],
    pub nodes: &'a [u8],
}

/// "Where's All (the) Data": contains the WAD files in memory, plus an array
/// of lumps telling us where each data lump starts. Files added later shadow
/// lumps of the same name in earlier files.
pub struct WadData {
    lumps: Vec<LumpInfo>,
    file_data: Vec<Vec<u8>>,
    wad_type: WadType,
}

impl fmt::Debug for WadData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadData {{\n  wad_type: {:?},\n  files: {},\n  lumps: {},\n}}",
            self.wad_type,
            self.file_data.len(),
            self.lumps.len()
        )
    }
}

impl WadData {
    pub fn open(file_path: &Path) -> Result<Self, WadError> {
        let data = read_file(file_path)?;
        info!("Opened {:?}, {} bytes", file_path, data.len());
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, WadError> {
        let mut wad = Self {
            lumps: Vec::new(),
            file_data: Vec::new(),
            wad_type: WadType::IWad,
        };
        wad.wad_type = wad.add_bytes(data)?;
        if wad.wad_type == WadType::PWad {
            warn!("First WAD loaded is a PWAD");
        }
        Ok(wad)
    }

    /// Add a patch WAD on top of the current data
    pub fn add_file(&mut self, file_path: &Path) -> Result<(), WadError> {
        let data = read_file(file_path)?;
        info!("Adding {:?}, {} bytes", file_path, data.len());
        self.add_bytes(data)?;
        Ok(())
    }

    pub fn add_bytes(&mut self, data: Vec<u8>) -> Result<WadType, WadError> {
        let wad_type = read_header_type(&data)?;
        let dir_count = read_u32_checked(&data, 4, "header")? as usize;
        let dir_offset = read_u32_checked(&data, 8, "header")? as usize;
        let file_handle = self.file_data.len();

        let mut lumps = Vec::with_capacity(dir_count);
        for i in 0..dir_count {
            let entry = dir_offset + i * 16;
            if entry + 16 > data.len() {
                return Err(WadError::Truncated {
                    what: "directory",
                    offset: entry,
                    len: data.len(),
                });
            }
            let info = LumpInfo {
                offset: read_i32(&data, entry) as u32 as usize,
                size: read_i32(&data, entry + 4) as u32 as usize,
                name: read_name(&data[entry + 8..entry + 16]).to_ascii_uppercase(),
                file_handle,
            };
            if info.offset + info.size > data.len() {
                return Err(WadError::LumpOutOfBounds {
                    name: info.name,
                    offset: info.offset,
                    size: info.size,
                });
            }
            lumps.push(info);
        }
        debug!("Read {} directory entries", lumps.len());

        self.lumps.append(&mut lumps);
        self.file_data.push(data);
        Ok(wad_type)
    }

    pub const fn wad_type(&self) -> WadType {
        self.wad_type
    }

    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    /// Index of the last lump with this name, so patch files win
    pub fn find_lump_index(&self, name: &str) -> Option<usize> {
        self.lumps
            .iter()
            .rposition(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn lump_exists(&self, name: &str) -> bool {
        self.find_lump_index(name).is_some()
    }

    fn lump_bytes(&self, info: &LumpInfo) -> &[u8] {
        &self.file_data[info.file_handle][info.offset..info.offset + info.size]
    }

    pub fn lump_data(&self, name: &str) -> Result<&[u8], WadError> {
        let index = self
            .find_lump_index(name)
            .ok_or_else(|| WadError::MissingLump(name.to_owned()))?;
        Ok(self.lump_bytes(&self.lumps[index]))
    }

    fn map_lump(&self, marker: usize, map_name: &str, lump: MapLump) -> Result<&[u8], WadError> {
        let info = self
            .lumps
            .get(marker + lump.offset())
            .ok_or_else(|| WadError::MissingLump(format!("{map_name}:{}", lump.name())))?;
        if info.name != lump.name() {
            return Err(WadError::MapLumpMismatch {
                map: map_name.to_owned(),
                expected: lump.name(),
                found: info.name.clone(),
            });
        }
        Ok(self.lump_bytes(info))
    }

    /// The geometry lumps that follow the marker lump for `map_name`
    pub fn map_lumps<'a>(&'a self, map_name: &'a str) -> Result<MapLumps<'a>, WadError> {
        let marker = self
            .find_lump_index(map_name)
            .ok_or_else(|| WadError::MissingLump(map_name.to_owned()))?;
        Ok(MapLumps {
            name: map_name,
            vertexes: self.map_lump(marker, map_name, MapLump::Vertexes)?,
            sectors: self.map_lump(marker, map_name, MapLump::Sectors)?,
            sidedefs: self.map_lump(marker, map_name, MapLump::SideDefs)?,
            linedefs: self.map_lump(marker, map_name, MapLump::LineDefs)?,
            segs: self.map_lump(marker, map_name, MapLump::Segs)?,
            subsectors: self.map_lump(marker, map_name, MapLump::SubSectors)?,
            nodes: self.map_lump(marker, map_name, MapLump::Nodes)?,
        })
    }

    /// Names of all maps, found by looking for a marker followed by `THINGS`
    pub fn map_names(&self) -> Vec<&str> {
        self.lumps
            .windows(2)
            .filter(|w| w[1].name == MapLump::Things.name())
            .map(|w| w[0].name.as_str())
            .collect()
    }

    /// Floor and ceiling flat names in lump order. Only lumps between the
    /// `F_START`/`F_END` markers (or their `FF_` patch forms) count, and the
    /// zero-sized sub-markers are skipped.
    pub fn flat_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut in_flats = false;
        for lump in &self.lumps {
            match lump.name.as_str() {
                "F_START" | "FF_START" => in_flats = true,
                "F_END" | "FF_END" => in_flats = false,
                _ if in_flats && lump.size > 0 => names.push(lump.name.as_str()),
                _ => {}
            }
        }
        names
    }

    /// Wall texture names, `TEXTURE1` entries followed by `TEXTURE2`
    pub fn texture_names(&self) -> Result<Vec<String>, WadError> {
        let mut names = Vec::new();
        for lump in ["TEXTURE1", "TEXTURE2"] {
            if !self.lump_exists(lump) {
                continue;
            }
            let data = self.lump_data(lump)?;
            let count = read_u32_checked(data, 0, "texture count")? as usize;
            names.reserve(count.min(data.len() / 4));
            for i in 0..count {
                let offset = read_u32_checked(data, 4 + i * 4, "texture offset")? as usize;
                if offset + 8 > data.len() {
                    return Err(WadError::Truncated {
                        what: "texture name",
                        offset,
                        len: data.len(),
                    });
                }
                names.push(read_name(&data[offset..offset + 8]).to_ascii_uppercase());
            }
        }
        Ok(names)
    }
}

fn read_file(file_path: &Path) -> Result<Vec<u8>, WadError> {
    let mut file = File::open(file_path)?;
    let mut data = Vec::with_capacity(file.metadata()?.len() as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}

fn read_header_type(data: &[u8]) -> Result<WadType, WadError> {
    if data.len() < 12 {
        return Err(WadError::Truncated {
            what: "header",
            offset: 0,
            len: data.len(),
        });
    }
    let mut t = [0u8; 4];
    t.copy_from_slice(&data[0..4]);
    match &t {
        b"IWAD" => Ok(WadType::IWad),
        b"PWAD" => Ok(WadType::PWad),
        _ => Err(WadError::BadType(t)),
    }
}

fn read_u32_checked(data: &[u8], offset: usize, what: &'static str) -> Result<u32, WadError> {
    if offset + 4 > data.len() {
        return Err(WadError::Truncated {
            what,
            offset,
            len: data.len(),
        });
    }
    Ok(read_i32(data, offset) as u32)
}

#[cfg(test)]
mod tests {
    use crate::lumps::MapLump;
    use crate::wad::{WadData, WadType};
    use crate::WadError;

    /// Assemble a WAD in memory from `(name, bytes)` pairs
    fn build_wad(kind: &[u8; 4], lumps: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(kind);
        data.extend_from_slice(&(lumps.len() as u32).to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());

        let mut dir = Vec::new();
        for (name, bytes) in lumps {
            let offset = data.len() as u32;
            data.extend_from_slice(bytes);
            dir.extend_from_slice(&offset.to_le_bytes());
            dir.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            let mut n = [0u8; 8];
            n[..name.len()].copy_from_slice(name.as_bytes());
            dir.extend_from_slice(&n);
        }
        let dir_offset = data.len() as u32;
        data.extend_from_slice(&dir);
        data[8..12].copy_from_slice(&dir_offset.to_le_bytes());
        data
    }

    fn map_lumps(marker: &str) -> Vec<(&str, Vec<u8>)> {
        vec![
            (marker, vec![]),
            ("THINGS", vec![0; 10]),
            ("LINEDEFS", vec![1; 14]),
            ("SIDEDEFS", vec![2; 30]),
            ("VERTEXES", vec![3; 8]),
            ("SEGS", vec![4; 12]),
            ("SSECTORS", vec![5; 4]),
            ("NODES", vec![]),
            ("SECTORS", vec![6; 26]),
            ("REJECT", vec![]),
            ("BLOCKMAP", vec![]),
        ]
    }

    #[test]
    fn read_directory() {
        let wad = WadData::from_bytes(build_wad(b"IWAD", &map_lumps("E1M1"))).unwrap();
        assert_eq!(wad.wad_type(), WadType::IWad);
        assert_eq!(wad.lumps().len(), 11);
        assert_eq!(wad.lumps()[0].name, "E1M1");
        assert_eq!(wad.find_lump_index("e1m1"), Some(0));
        assert_eq!(wad.lump_data("VERTEXES").unwrap(), &[3; 8]);
        assert_eq!(wad.map_names(), vec!["E1M1"]);
    }

    #[test]
    fn map_lumps_by_offset() {
        let wad = WadData::from_bytes(build_wad(b"IWAD", &map_lumps("MAP01"))).unwrap();
        let map = wad.map_lumps("MAP01").unwrap();
        assert_eq!(map.name, "MAP01");
        assert_eq!(map.vertexes.len(), 8);
        assert_eq!(map.linedefs, &[1; 14]);
        assert_eq!(map.sectors.len(), 26);
        assert!(map.nodes.is_empty());
        assert_eq!(MapLump::Sectors.offset(), 8);
    }

    #[test]
    fn map_lumps_out_of_order() {
        let mut lumps = map_lumps("E1M2");
        lumps.swap(4, 5);
        let wad = WadData::from_bytes(build_wad(b"IWAD", &lumps)).unwrap();
        assert!(matches!(
            wad.map_lumps("E1M2"),
            Err(WadError::MapLumpMismatch {
                expected: "VERTEXES",
                ..
            })
        ));
        assert!(matches!(
            wad.map_lumps("E1M9"),
            Err(WadError::MissingLump(_))
        ));
    }

    #[test]
    fn patch_shadows_base() {
        let mut wad = WadData::from_bytes(build_wad(b"IWAD", &map_lumps("E1M1"))).unwrap();
        let mut patch = map_lumps("E1M1");
        patch[4].1 = vec![9; 4];
        let kind = wad.add_bytes(build_wad(b"PWAD", &patch)).unwrap();
        assert_eq!(kind, WadType::PWad);
        assert_eq!(wad.map_lumps("E1M1").unwrap().vertexes, &[9; 4]);
    }

    #[test]
    fn bad_header() {
        assert!(matches!(
            WadData::from_bytes(b"JUNK\0\0\0\0\0\0\0\0".to_vec()),
            Err(WadError::BadType(_))
        ));
        assert!(matches!(
            WadData::from_bytes(b"IWAD".to_vec()),
            Err(WadError::Truncated { what: "header", .. })
        ));
    }

    #[test]
    fn lump_past_end() {
        let mut data = build_wad(b"IWAD", &[("PLAYPAL", vec![0; 16])]);
        let dir = data.len() - 16;
        data[dir + 4..dir + 8].copy_from_slice(&4096u32.to_le_bytes());
        assert!(matches!(
            WadData::from_bytes(data),
            Err(WadError::LumpOutOfBounds { .. })
        ));
    }

    #[test]
    fn flats_and_textures() {
        let mut texture1 = Vec::new();
        texture1.extend_from_slice(&2u32.to_le_bytes());
        texture1.extend_from_slice(&12u32.to_le_bytes());
        texture1.extend_from_slice(&20u32.to_le_bytes());
        texture1.extend_from_slice(b"STARTAN3");
        texture1.extend_from_slice(b"door3\0\0\0");
        let lumps = vec![
            ("TEXTURE1", texture1),
            ("F_START", vec![]),
            ("F1_START", vec![]),
            ("FLOOR4_8", vec![0; 4096]),
            ("F_SKY1", vec![0; 4096]),
            ("F1_END", vec![]),
            ("F_END", vec![]),
            ("NUKAGE1", vec![0; 4096]),
        ];
        let wad = WadData::from_bytes(build_wad(b"IWAD", &lumps)).unwrap();
        assert_eq!(wad.flat_names(), vec!["FLOOR4_8", "F_SKY1"]);
        assert_eq!(wad.texture_names().unwrap(), vec!["STARTAN3", "DOOR3"]);
    }
}
