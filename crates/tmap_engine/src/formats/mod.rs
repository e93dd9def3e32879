use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{MapDocument, Result, Size};

mod tmap;
pub use tmap::*;

/// Options for writing map files
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveOptions {
    /// Store rows bottom-up (row 0 of the file is the last canvas row)
    pub flip_y: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { flip_y: true }
    }
}

/// Options for reading map files
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Inverse of [`SaveOptions::flip_y`]; must match the value used for writing
    pub flip_y: bool,
    /// Configured maximum canvas the loaded map is placed into
    pub max_canvas: Size,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            flip_y: true,
            max_canvas: Size::new(40, 30),
        }
    }
}

/// Result of [`load_map`]
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub document: MapDocument,
    /// Map size stored in the file, now the drawable size
    pub file_size: Size,
    /// Canvas size after placement
    pub canvas: Size,
    /// The file did not fit the configured maximum canvas, which had to grow
    pub canvas_grown: bool,
}

/// Reads a map file as stored: canvas and drawable both equal the file's map size.
pub fn read_map(path: &Path, options: &LoadOptions) -> Result<MapDocument> {
    let data = fs::read(path)?;
    from_bytes(&data, options)
}

/// Reads a map file and places it centered into the configured maximum canvas.
///
/// If the file is larger than the configured canvas, the canvas grows to fit.
pub fn load_map(path: &Path, options: &LoadOptions) -> Result<LoadedMap> {
    let mut document = read_map(path, options)?;
    let file_size = document.canvas_size();
    let canvas = document.fit_into_canvas(options.max_canvas)?;
    log::info!("loaded {} ({} tiles, {} layers, {file_size} map)", path.display(), document.tile_count(), document.layer_count());
    Ok(LoadedMap {
        document,
        file_size,
        canvas,
        canvas_grown: canvas != options.max_canvas,
    })
}

/// Writes the whole canvas of `doc` to `path`
pub fn save_map(doc: &MapDocument, path: &Path, options: &SaveOptions) -> Result<()> {
    let bytes = to_bytes(doc, options)?;
    write_atomic(path, &bytes)?;
    log::info!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Writes the drawable content of `doc` centered in a `target` sized map.
/// The document is not modified.
pub fn save_padded(doc: &MapDocument, path: &Path, target: impl Into<Size>, options: &SaveOptions) -> Result<()> {
    let padded = doc.padded_copy(target, true)?;
    save_map(&padded, path, options)
}

/// Writes to a sibling temp file, then renames it over `path`.
/// A failed write never leaves a partial file under the target name.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    let write_result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(crate::EngineError::write_file(path, err.to_string()));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(|| "map".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
