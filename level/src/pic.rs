//! Flat and texture name resolution. Sectors and sidedefs store names on disk
//! but the level keeps indices in to whatever table the renderer builds.

use std::collections::HashMap;

use wad::{WadData, WadError};

/// Name of the flat that marks a sky ceiling
pub const SKY_FLAT_NAME: &str = "F_SKY1";

/// Looks up flat and texture numbers by name. Names are passed upper-cased
/// with padding stripped.
pub trait PicResolver {
    fn flat_num_for_name(&self, name: &str) -> Option<usize>;

    fn texture_num_for_name(&self, name: &str) -> Option<usize>;
}

/// Sidedef texture names that mean "no texture here"
pub(crate) fn is_no_texture(name: &str) -> bool {
    name.is_empty() || name == "-"
}

/// A name table built from lists of flat and texture names, numbered in the
/// order they are given. Later duplicates replace earlier ones.
#[derive(Debug, Default, Clone)]
pub struct PicNames {
    flats: HashMap<String, usize>,
    textures: HashMap<String, usize>,
}

impl PicNames {
    pub fn new<F, T>(flats: F, textures: T) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let number = |names: Vec<String>| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, n)| (n, i))
                .collect::<HashMap<String, usize>>()
        };
        Self {
            flats: number(flats.into_iter().map(|n| n.as_ref().to_ascii_uppercase()).collect()),
            textures: number(
                textures
                    .into_iter()
                    .map(|n| n.as_ref().to_ascii_uppercase())
                    .collect(),
            ),
        }
    }

    /// Number the flats between the `F_START`/`F_END` markers and the
    /// textures in `TEXTURE1`/`TEXTURE2`, the same order the renderer loads
    /// them in.
    pub fn from_wad(wad: &WadData) -> Result<Self, WadError> {
        let textures = wad.texture_names()?;
        Ok(Self::new(wad.flat_names(), textures))
    }

    pub fn flat_count(&self) -> usize {
        self.flats.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl PicResolver for PicNames {
    fn flat_num_for_name(&self, name: &str) -> Option<usize> {
        self.flats.get(&name.to_ascii_uppercase()).copied()
    }

    fn texture_num_for_name(&self, name: &str) -> Option<usize> {
        self.textures.get(&name.to_ascii_uppercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{PicNames, PicResolver, is_no_texture};

    #[test]
    fn lookup_ignores_case() {
        let pics = PicNames::new(["FLOOR4_8", "f_sky1"], ["STARTAN3"]);
        assert_eq!(pics.flat_num_for_name("floor4_8"), Some(0));
        assert_eq!(pics.flat_num_for_name("F_SKY1"), Some(1));
        assert_eq!(pics.texture_num_for_name("StartAn3"), Some(0));
        assert_eq!(pics.texture_num_for_name("FLOOR4_8"), None);
        assert_eq!(pics.flat_count(), 2);
    }

    #[test]
    fn blank_texture_names() {
        assert!(is_no_texture("-"));
        assert!(is_no_texture(""));
        assert!(!is_no_texture("STEP1"));
    }
}
