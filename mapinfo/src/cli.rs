use argh::FromArgs;
use level::LoadOptions;

/// Load maps from a WAD and print what was built
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to game WAD
    #[argh(option)]
    pub iwad: String,
    /// path to patch WAD, may be repeated
    #[argh(option)]
    pub pwad: Vec<String>,
    /// map to load, eg; E1M1 or MAP01. All maps if not given
    #[argh(option)]
    pub map: Option<String>,
    /// don't reject subsectors whose segs face more than one sector
    #[argh(switch)]
    pub no_verify: bool,
    /// print BSP tree statistics
    #[argh(switch)]
    pub bsp: bool,
    /// x map coordinate to locate, needs --y
    #[argh(option)]
    pub x: Option<i16>,
    /// y map coordinate to locate, needs --x
    #[argh(option)]
    pub y: Option<i16>,
}

impl CLIOptions {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            verify_subsector_sectors: !self.no_verify,
        }
    }

    pub fn point(&self) -> Option<(i16, i16)> {
        self.x.zip(self.y)
    }
}
