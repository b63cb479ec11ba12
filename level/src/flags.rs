//! `LineDef.flags` bits, as stored in the LINEDEFS lump

pub struct LineDefFlags;

impl LineDefFlags {
    /// Solid, is an obstacle
    pub const BLOCKING: u16 = 1;
    /// Blocks monsters only
    pub const BLOCK_MONSTERS: u16 = 2;
    /// Backside will not be present at all if not two sided
    pub const TWO_SIDED: u16 = 4;
    /// Upper texture unpegged
    pub const DONT_PEG_TOP: u16 = 8;
    /// Lower texture unpegged
    pub const DONT_PEG_BOTTOM: u16 = 16;
    /// In AutoMap: don't map as two sided: IT'S A SECRET!
    pub const SECRET: u16 = 32;
    /// Sound rendering: don't let sound cross two of these
    pub const SOUND_BLOCK: u16 = 64;
    /// Don't draw on the automap at all
    pub const DONT_DRAW: u16 = 128;
    /// Set if already seen, thus drawn in automap
    pub const MAPPED: u16 = 256;
}
