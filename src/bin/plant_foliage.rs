//! Build a scene, refresh its foliage chunk by chunk and report totals.
//!
//! Usage: cargo run --release --bin plant_foliage -- [--scene scene.json] [--settings refresh.json] [--write-default out.json]

use std::path::PathBuf;
use std::time::Instant;

use flora::core::logging;
use flora::scene::SceneConfig;
use flora::{RefreshSettings, TerrainHost, TerrainRegion};

fn arg_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn run() -> flora::core::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if let Some(path) = arg_value(&args, "--write-default") {
        SceneConfig::default().save_sync(&path)?;
        log::info!("Wrote default scene to {}", path.display());
        return Ok(());
    }

    let mut config = match arg_value(&args, "--scene") {
        Some(path) => {
            log::info!("Loading scene {}", path.display());
            SceneConfig::load_sync(&path)?
        }
        None => {
            log::info!("No --scene given, using the built-in demo scene");
            SceneConfig::default()
        }
    };
    if let Some(path) = arg_value(&args, "--settings") {
        config.settings = RefreshSettings::load_sync(&path)?;
    }

    let build_start = Instant::now();
    let mut scene = config.build()?;
    log::info!("Scene built in {:.2?}", build_start.elapsed());

    let region = TerrainRegion::full(&scene.host.dimensions());
    let refresh_start = Instant::now();
    let mut cursor = scene.terrain.chunked(&mut scene.host, &region);
    while let Some(progress) = cursor.step() {
        if progress.is_last() || (progress.index + 1) % 8 == 0 {
            log::info!("  chunk {}/{}", progress.index + 1, progress.total);
        }
    }
    log::info!("Refreshed {} in {:.2?}", region, refresh_start.elapsed());

    let cells = (scene.host.dimensions().detail_resolution as i64).pow(2);
    for (index, prototype) in scene.host.detail_prototypes().iter().enumerate() {
        let total = scene.host.detail_total(index);
        log::info!(
            "{:>12}: {:>10} instances ({:.2} per cell)",
            prototype.name,
            total,
            total as f64 / cells.max(1) as f64
        );
    }
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
