//! Typed indices in to the level tables. Every cross-reference between
//! tables is one of these rather than a pointer, so the tables can be moved,
//! compared and dropped freely.

use std::fmt;

macro_rules! map_index {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(u32);

            impl $name {
                #[inline]
                pub const fn new(index: usize) -> Self {
                    Self(index as u32)
                }

                #[inline]
                pub const fn index(self) -> usize {
                    self.0 as usize
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

map_index!(
    VertexId,
    SectorId,
    SideId,
    LineId,
    SegId,
    SubSectorId,
    /// Index in to the BSP node arena
    NodeId,
);

#[cfg(test)]
mod tests {
    use super::{LineId, SectorId};

    #[test]
    fn index_round_trip() {
        assert_eq!(SectorId::new(84).index(), 84);
        assert_eq!(LineId::new(474).to_string(), "474");
        assert!(SectorId::new(1) < SectorId::new(2));
    }
}
