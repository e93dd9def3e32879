use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{formats::write_atomic, AssetResolver, LoadOptions, Result, SaveOptions, Size};

const OPTIONS_FILE: &str = "options.toml";

/// Persistent editor options
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MapOptions {
    /// Store rows bottom-up in map files
    pub flip_y_in_file: bool,
    /// Canvas new maps get and loaded maps are centered into
    pub max_canvas_width: i32,
    pub max_canvas_height: i32,
    /// Tile size for new maps
    pub tile_width: i32,
    pub tile_height: i32,
    /// Root folder tile paths are relative to
    pub root_dir: Option<PathBuf>,
    /// Extra folders searched after root, map and install folders
    pub fallback_dirs: Vec<PathBuf>,
    pub undo_depth: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            flip_y_in_file: true,
            max_canvas_width: 40,
            max_canvas_height: 30,
            tile_width: 16,
            tile_height: 16,
            root_dir: None,
            fallback_dirs: Vec::new(),
            undo_depth: 50,
        }
    }
}

impl MapOptions {
    pub fn max_canvas(&self) -> Size {
        Size::new(self.max_canvas_width, self.max_canvas_height)
    }

    /// Raises the configured canvas to at least `size`, returns true if it grew
    pub fn grow_max_canvas(&mut self, size: Size) -> bool {
        let grown = self.max_canvas().max(size);
        if grown == self.max_canvas() {
            return false;
        }
        log::info!("maximum canvas grows from {} to {grown}", self.max_canvas());
        self.max_canvas_width = grown.width;
        self.max_canvas_height = grown.height;
        true
    }

    pub fn tile_size(&self) -> Size {
        Size::new(self.tile_width, self.tile_height)
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions { flip_y: self.flip_y_in_file }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            flip_y: self.flip_y_in_file,
            max_canvas: self.max_canvas(),
        }
    }

    /// Resolver for assets of `map_file` (if any), rooted at the configured root
    /// or the current directory.
    pub fn asset_resolver(&self, map_file: Option<&Path>) -> AssetResolver {
        let root = self.root_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut resolver = AssetResolver::new(root).with_fallback_dirs(self.fallback_dirs.iter().cloned());
        if let Some(map_file) = map_file {
            resolver = resolver.with_map_file(map_file);
        }
        resolver
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn store_to_file(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        write_atomic(path, text.as_bytes())
    }

    /// Loads options from the user configuration directory, falling back to defaults
    pub fn load_user_options() -> Self {
        let Some(dir) = Self::config_dir() else {
            return Self::default();
        };
        let options_file = dir.join(OPTIONS_FILE);
        if !options_file.exists() {
            return Self::default();
        }
        match Self::load_from_file(&options_file) {
            Ok(options) => options,
            Err(err) => {
                log::error!("Error reading options file {}: {err}", options_file.display());
                Self::default()
            }
        }
    }

    pub fn store_user_options(&self) {
        let Some(dir) = Self::config_dir() else {
            log::error!("Cannot determine config directory for saving options");
            return;
        };
        if let Err(err) = fs::create_dir_all(&dir) {
            log::error!("Can't create configuration directory {}: {err}", dir.display());
            return;
        }
        if let Err(err) = self.store_to_file(&dir.join(OPTIONS_FILE)) {
            log::error!("Error writing options file: {err}");
        }
    }

    /// Returns the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "tmap").map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }
}
