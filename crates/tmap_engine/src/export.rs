//! Portable folder export
//!
//! Copies every tile image to `tile_<id>.png` and every animation's frames to
//! `anim_<id>/<n>.png`, then writes `map.tmap` with paths relative to the
//! export folder.

use std::{fs, path::Path};

use crate::{formats::save_map, AssetResolver, EngineError, MapDocument, Result, SaveOptions, TileAnimation};

pub const EXPORT_MAP_NAME: &str = "map.tmap";

/// What an export wrote
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub tiles: usize,
    pub animation_frames: usize,
}

/// Exports `doc` and its assets into `folder`. The document is not modified.
pub fn export_to_folder(doc: &MapDocument, resolver: &AssetResolver, folder: &Path, options: &SaveOptions) -> Result<ExportSummary> {
    if doc.tile_count() == 0 {
        return Err(EngineError::validation("nothing to export, the map has no tiles"));
    }
    fs::create_dir_all(folder)?;

    let mut exported = doc.clone();
    let mut summary = ExportSummary::default();

    for (tile, stored) in doc.tile_paths().iter().enumerate() {
        let src = resolver.resolve(stored);
        if !src.is_file() {
            return Err(EngineError::MissingAsset { path: src });
        }
        let name = format!("tile_{tile}.png");
        fs::copy(&src, folder.join(&name))?;
        exported.tile_paths[tile] = format!("./{name}");
        summary.tiles += 1;
    }

    for (tile, animation) in doc.animations() {
        let src_folder = resolver.resolve_folder(&animation.folder);
        let dst_name = format!("anim_{tile}");
        let dst_folder = folder.join(&dst_name);
        fs::create_dir_all(&dst_folder)?;
        for frame in 1..=animation.frame_count {
            let frame_name = format!("{frame}.png");
            let src = src_folder.join(&frame_name);
            if !src.is_file() {
                return Err(EngineError::MissingAsset { path: src });
            }
            fs::copy(&src, dst_folder.join(&frame_name))?;
            summary.animation_frames += 1;
        }
        exported.animations.insert(
            *tile,
            TileAnimation {
                folder: format!("./{dst_name}"),
                ..animation.clone()
            },
        );
    }

    save_map(&exported, &folder.join(EXPORT_MAP_NAME), options)?;
    log::info!(
        "exported {} tiles and {} animation frames to {}",
        summary.tiles,
        summary.animation_frames,
        folder.display()
    );
    Ok(summary)
}
