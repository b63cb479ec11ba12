mod cli;

use std::error::Error;
use std::ops::ControlFlow;
use std::path::Path;

use cli::CLIOptions;
use level::{LoadOptions, MapData, NodeChild, PicNames};
use log::{error, info, warn};
use math::FixedPoint;
use simplelog::TermLogger;
use wad::WadData;

fn main() -> Result<(), Box<dyn Error>> {
    let options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Warn),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut wad = WadData::open(Path::new(&options.iwad))?;
    for pwad in &options.pwad {
        wad.add_file(Path::new(pwad))?;
        info!("Added {pwad}");
    }

    let pics = PicNames::from_wad(&wad)?;
    info!(
        "{} flats and {} textures available",
        pics.flat_count(),
        pics.texture_count()
    );

    let maps: Vec<String> = match &options.map {
        Some(name) => vec![name.to_ascii_uppercase()],
        None => {
            // A patch may redefine a map, list it once
            let mut names: Vec<String> = Vec::new();
            for name in wad.map_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            names
        }
    };
    if maps.is_empty() {
        warn!("No maps found in {}", options.iwad);
    }

    let load_options = options.load_options();
    let mut failed = 0;
    for name in &maps {
        match load_map(&wad, name, &pics, &load_options) {
            Ok(map) => {
                print_summary(&map);
                if options.bsp {
                    print_bsp(&map);
                }
                if let Some((x, y)) = options.point() {
                    print_point(&map, x, y);
                }
            }
            Err(e) => {
                error!("{name}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} maps failed to load", maps.len()).into());
    }
    Ok(())
}

fn load_map(
    wad: &WadData,
    name: &str,
    pics: &PicNames,
    options: &LoadOptions,
) -> Result<MapData, Box<dyn Error>> {
    let lumps = wad.map_lumps(name)?;
    Ok(MapData::load(&lumps, pics, options)?)
}

fn print_summary(map: &MapData) {
    println!(
        "{}: {} vertexes, {} sectors, {} sidedefs, {} linedefs, {} segs, {} subsectors, {} nodes",
        map.name(),
        map.vertexes().len(),
        map.sectors().len(),
        map.sidedefs().len(),
        map.linedefs().len(),
        map.segments().len(),
        map.subsectors().len(),
        map.bsp().nodes().len(),
    );

    let ext = map.extents();
    println!(
        "  bounds ({}, {}) to ({}, {}), {} x {}",
        ext.min_vertex.x.to_int(),
        ext.min_vertex.y.to_int(),
        ext.max_vertex.x.to_int(),
        ext.max_vertex.y.to_int(),
        ext.width().to_int(),
        ext.height().to_int(),
    );
    println!(
        "  heights {} to {}",
        ext.min_floor.to_int(),
        ext.max_ceiling.to_int()
    );

    let two_sided = map.linedefs().iter().filter(|l| l.is_two_sided()).count();
    let sky = map
        .sectors()
        .iter()
        .filter(|s| s.is_sky_ceiling(map.sky_flat()))
        .count();
    println!("  {two_sided} two sided linedefs, {sky} sky sectors");
}

fn print_bsp(map: &MapData) {
    let bsp = map.bsp();
    let mut depth = 0;
    let mut stack = vec![(bsp.root(), 1)];
    while let Some((child, d)) = stack.pop() {
        match child {
            NodeChild::SubSector(_) => depth = depth.max(d),
            NodeChild::Node(id) => {
                for c in bsp.node(id).children {
                    stack.push((c, d + 1));
                }
            }
        }
    }
    println!("  bsp root {:?}, depth {depth}", bsp.root());
}

fn print_point(map: &MapData, x: i16, y: i16) {
    let (fx, fy) = (FixedPoint::from_raw(x), FixedPoint::from_raw(y));
    let ss = map.point_in_subsector(fx, fy);
    let sector = map.subsector(ss).sector;
    let s = map.sector(sector);
    println!(
        "  ({x}, {y}) is in subsector {ss}, sector {sector} (floor {}, ceiling {}, light {})",
        s.floorheight.to_int(),
        s.ceilingheight.to_int(),
        s.lightlevel
    );

    let mut nearest = Vec::with_capacity(8);
    let _ = map.bsp().walk_front_to_back(fx, fy, |id| {
        nearest.push(id.to_string());
        if nearest.len() == 8 {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    println!("  nearest subsectors: {}", nearest.join(", "));
}
