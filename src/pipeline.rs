/// Scan -> average -> export, in a single pass

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::Settings;
use crate::database::TextureDiscoveryService;
use crate::export::{self, ExportSummary};
use crate::known_blocks::KnownBlocks;

pub fn run(settings: &Settings) -> Result<ExportSummary> {
    let start = std::time::Instant::now();

    // Both inputs are checked before anything is written
    info!("=== Step 1: Loading Known Blocks ===");
    let blocks = KnownBlocks::load(&settings.blocks_file)?;
    info!("Loaded {} known block names from {:?}", blocks.len(), settings.blocks_file);
    if blocks.is_empty() {
        warn!("Known-block list is empty, block color table will have no rows");
    }

    info!("=== Step 2: Scanning Textures ===");
    let mut records = TextureDiscoveryService::scan(&settings.textures_dir, &settings.extension)?;

    info!("=== Step 3: Averaging Colors ===");
    let colors = TextureDiscoveryService::compute_colors(
        &mut records,
        settings.on_decode_error,
        settings.on_unsupported,
    )
    .context("color averaging aborted, no output written")?;

    if colors.is_empty() {
        warn!("No textures averaged in {:?}", settings.textures_dir);
    }
    info!("\n{}", TextureDiscoveryService::get_statistics(&records));

    let missing = blocks.iter().filter(|name| !colors.contains(name)).count();
    if missing > 0 {
        info!("{} known blocks have no matching texture", missing);
    }

    info!("=== Step 4: Writing Tables ===");
    let summary = export::export_tables(
        &settings.block_colors_file,
        &settings.texture_colors_file,
        &blocks,
        &colors,
    )?;

    info!("Done in {:.2?}", start.elapsed());
    Ok(summary)
}
