use thiserror::Error;

/// Why a level failed to load. Any of these abandons the whole load, there
/// is never a partially built `MapData`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The lump is not a whole number of records
    #[error("{lump}: length {len} is not a multiple of the {record_size} byte record size")]
    Format {
        lump: &'static str,
        len: usize,
        record_size: usize,
    },
    /// An index field points outside an already loaded table
    #[error("{lump} record {record}: {field} index {index} is out of range (table has {len})")]
    Reference {
        lump: &'static str,
        record: usize,
        field: &'static str,
        index: usize,
        len: usize,
    },
    /// A flat or texture name the resolver doesn't know
    #[error("{lump} record {record}: no {kind} named {name:?}")]
    Resolution {
        lump: &'static str,
        record: usize,
        kind: &'static str,
        name: String,
    },
    /// A subsector whose segs don't all face the same sector
    #[error("subsector {subsector}: seg {seg} faces sector {found}, expected {expected}")]
    MixedSubSector {
        subsector: usize,
        seg: usize,
        expected: usize,
        found: usize,
    },
    /// A node reachable twice from the root, the NODES lump is not a tree
    #[error("NODES: node {node} is reached more than once from the root")]
    MalformedTree { node: usize },
}
