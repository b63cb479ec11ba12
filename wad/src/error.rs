use thiserror::Error;

/// Failures while reading the archive itself. Problems with the contents of
/// a map lump are the level loader's business.
#[derive(Debug, Error)]
pub enum WadError {
    #[error("could not read WAD: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a WAD, header type is {0:?}")]
    BadType([u8; 4]),
    #[error("WAD is truncated reading {what} at offset {offset} (file is {len} bytes)")]
    Truncated {
        what: &'static str,
        offset: usize,
        len: usize,
    },
    #[error("lump {name} at offset {offset} with size {size} runs past the end of the file")]
    LumpOutOfBounds {
        name: String,
        offset: usize,
        size: usize,
    },
    #[error("lump {0} not found")]
    MissingLump(String),
    #[error("{map}: expected lump {expected}, found {found}")]
    MapLumpMismatch {
        map: String,
        expected: &'static str,
        found: String,
    },
}

/// A lump whose length is not a whole number of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lump length {len} is not a multiple of the {record_size} byte record size")]
pub struct RecordSizeError {
    pub len: usize,
    pub record_size: usize,
}
