//! The map document: layered tile grid plus tile metadata
//!
//! A `MapDocument` is a plain value owned by the host application. Codec,
//! geometry and editing code receive it by reference; nothing in this crate
//! holds on to it.
//!
//! Geometry:
//! - The *canvas* is the full saved grid extent. Every layer holds exactly
//!   `canvas.width * canvas.height` cells in row-major order.
//! - The *drawable* rectangle is the paintable region. It always lies inside
//!   the canvas and is always centered in it; cells outside it are empty.
//!
//! Split into:
//! - `mod.rs` - struct, constructor, getters and invariant checks
//! - `tiles.rs` - tile list, attribute and animation operations
//! - `layers.rs` - layer list and prop layer operations

use std::collections::BTreeMap;

use crate::{is_empty_tile, limits, EngineError, Layer, Position, Rectangle, Result, Size, TileAnimation};

mod layers;
mod tiles;

pub use tiles::TileRemap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDocument {
    pub(crate) tile_size: Size,
    pub(crate) canvas: Size,
    pub(crate) drawable: Rectangle,
    pub(crate) layers: Vec<Layer>,
    pub(crate) prop_layer: Option<usize>,
    pub(crate) tile_paths: Vec<String>,
    pub(crate) attributes: BTreeMap<u32, Vec<String>>,
    pub(crate) animations: BTreeMap<u32, TileAnimation>,
}

impl MapDocument {
    /// Creates a document with one empty layer and a centered drawable region.
    pub fn new(tile_size: impl Into<Size>, canvas: impl Into<Size>, drawable: impl Into<Size>) -> Result<Self> {
        let tile_size = tile_size.into();
        let canvas = canvas.into();
        let drawable = drawable.into();
        check_size("tile size", tile_size)?;
        check_size("canvas", canvas)?;
        check_size("drawable size", drawable)?;
        if drawable.width > canvas.width || drawable.height > canvas.height {
            return Err(EngineError::validation(format!("drawable size {drawable} exceeds canvas {canvas}")));
        }

        let mut doc = Self {
            tile_size,
            canvas,
            drawable: Rectangle::from_min_size((0, 0), drawable),
            layers: vec![Layer::new(canvas)],
            prop_layer: None,
            tile_paths: Vec::new(),
            attributes: BTreeMap::new(),
            animations: BTreeMap::new(),
        };
        doc.recenter();
        Ok(doc)
    }

    /// Tile pixel size
    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Full canvas extent in cells
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    /// Canvas as a rectangle at the origin
    pub fn canvas_rect(&self) -> Rectangle {
        Rectangle::from_min_size((0, 0), self.canvas)
    }

    /// Paintable region inside the canvas
    pub fn drawable(&self) -> Rectangle {
        self.drawable
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn prop_layer(&self) -> Option<usize> {
        self.prop_layer
    }

    pub fn tile_paths(&self) -> &[String] {
        &self.tile_paths
    }

    pub fn tile_count(&self) -> usize {
        self.tile_paths.len()
    }

    pub fn tile_path(&self, tile: u32) -> Option<&str> {
        self.tile_paths.get(tile as usize).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<u32, Vec<String>> {
        &self.attributes
    }

    pub fn tile_attributes(&self, tile: u32) -> &[String] {
        self.attributes.get(&tile).map_or(&[], Vec::as_slice)
    }

    pub fn animations(&self) -> &BTreeMap<u32, TileAnimation> {
        &self.animations
    }

    pub fn animation(&self, tile: u32) -> Option<&TileAnimation> {
        self.animations.get(&tile)
    }

    /// True for the empty sentinel and every id in the tile list
    pub fn is_valid_cell_value(&self, value: u32) -> bool {
        is_empty_tile(value) || (value as usize) < self.tile_paths.len()
    }

    /// Row-major index of `pos`, `None` outside the canvas
    pub fn cell_index(&self, pos: impl Into<Position>) -> Option<usize> {
        let pos = pos.into();
        if !self.canvas_rect().is_inside(pos) {
            return None;
        }
        Some(pos.y as usize * self.canvas.width as usize + pos.x as usize)
    }

    /// Inverse of [`Self::cell_index`]
    pub fn cell_position(&self, index: usize) -> Position {
        let width = self.canvas.width.max(1) as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get_cell(&self, layer: usize, pos: impl Into<Position>) -> Option<u32> {
        let index = self.cell_index(pos)?;
        self.layers.get(layer)?.get(index)
    }

    /// Checks every structural invariant. Used before writing a file.
    pub fn validate(&self) -> Result<()> {
        check_size("tile size", self.tile_size)?;
        check_size("canvas", self.canvas)?;
        if self.layers.is_empty() {
            return Err(EngineError::validation("map has no layers"));
        }
        let expected = self.canvas.area();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.len() != expected {
                return Err(EngineError::validation(format!(
                    "layer {i} has {} cells, expected {expected} for a {} canvas",
                    layer.len(),
                    self.canvas
                )));
            }
        }
        if self.drawable.is_empty() || !self.canvas_rect().contains_rect(&self.drawable) {
            return Err(EngineError::validation(format!("drawable {} outside canvas {}", self.drawable, self.canvas)));
        }
        if let Some(prop) = self.prop_layer {
            if prop >= self.layers.len() {
                return Err(EngineError::validation(format!("prop layer {prop} outside {} layers", self.layers.len())));
            }
        }
        if self.tile_paths.len() > crate::MAX_TILE_COUNT {
            return Err(EngineError::validation(format!("{} tiles exceed the id space", self.tile_paths.len())));
        }
        Ok(())
    }
}

pub(crate) fn check_size(what: &str, size: Size) -> Result<()> {
    if !limits::is_within_limits(size.width, size.height) {
        return Err(EngineError::validation(format!(
            "{what} {size} outside {}..={}",
            limits::MIN_DIMENSION,
            limits::MAX_DIMENSION
        )));
    }
    Ok(())
}
