//! New, open, save and export

use std::path::{Path, PathBuf};

use tmap_engine::{export_to_folder, load_map, save_map, save_padded, ExportSummary, LoadedMap};

use crate::{EngineError, MapDocument, MapOptions, Result, Size};

use super::EditState;

impl EditState {
    /// Opens a map file with the configured options.
    ///
    /// A map larger than the configured maximum canvas raises that maximum,
    /// so later resizes and new maps use the grown size.
    pub fn open(path: impl Into<PathBuf>, mut options: MapOptions) -> Result<Self> {
        let path = path.into();
        let loaded = load_map(&path, &options.load_options())?;
        if loaded.canvas_grown {
            options.grow_max_canvas(loaded.canvas);
        }
        let mut state = Self::with_options(loaded.document, options);
        state.file_name = Some(path);
        Ok(state)
    }

    /// Replaces the current document with the map at `path`
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let LoadedMap {
            document, canvas, canvas_grown, ..
        } = load_map(&path, &self.options.load_options())?;
        if canvas_grown {
            self.options.grow_max_canvas(canvas);
        }
        self.replace_document(document);
        self.file_name = Some(path);
        Ok(())
    }

    /// Starts a new empty map at the configured maximum canvas
    pub fn new_document(&mut self) -> Result<()> {
        let canvas = self.options.max_canvas();
        let document = MapDocument::new(self.options.tile_size(), canvas, canvas)?;
        self.replace_document(document);
        self.file_name = None;
        Ok(())
    }

    /// Saves to the current file name
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_name.clone() else {
            return Err(EngineError::generic("map has no file name yet"));
        };
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.commit_gesture();
        save_map(&self.document, &path, &self.options.save_options())?;
        self.file_name = Some(path);
        self.mark_saved();
        Ok(())
    }

    /// Writes the drawable content centered in a `target` sized map.
    /// The edited document and its file name are unchanged.
    pub fn save_padded(&self, path: &Path, target: impl Into<Size>) -> Result<()> {
        save_padded(&self.document, path, target, &self.options.save_options())
    }

    /// Writes the map and copies of every referenced image into `folder`
    pub fn export_to_folder(&self, folder: &Path) -> Result<ExportSummary> {
        let resolver = self.options.asset_resolver(self.file_name.as_deref());
        export_to_folder(&self.document, &resolver, folder, &self.options.save_options())
    }
}
