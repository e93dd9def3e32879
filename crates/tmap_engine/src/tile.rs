//! Tile ids, the empty sentinel and per-tile metadata

use crate::{
    assets::normalize_tile_path,
    limits::{MAX_FRAME_COUNT, MAX_FRAME_MS},
    EngineError, Result,
};

/// Cell value meaning "no tile", both in memory and on disk
pub const EMPTY_TILE: u32 = 0xFFFF_FFFF;

/// Upper bound for the tile list length.
///
/// The top half of the id space is reserved so renumbering can never
/// produce the sentinel.
pub const MAX_TILE_COUNT: usize = 0x7FFF_FFFF;

/// The single comparison point for the empty sentinel
#[inline]
pub fn is_empty_tile(value: u32) -> bool {
    value == EMPTY_TILE
}

/// Animation attached to a tile: frames `1.png..=frame_count.png` in `folder`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileAnimation {
    pub folder: String,
    pub frame_ms: u8,
    pub frame_count: u8,
}

impl TileAnimation {
    pub fn new(folder: impl Into<String>, frame_ms: u32, frame_count: u32) -> Result<Self> {
        if !(1..=MAX_FRAME_MS).contains(&frame_ms) {
            return Err(EngineError::validation(format!("frame duration {frame_ms}ms outside 1..={MAX_FRAME_MS}")));
        }
        if !(1..=MAX_FRAME_COUNT).contains(&frame_count) {
            return Err(EngineError::validation(format!("frame count {frame_count} outside 1..={MAX_FRAME_COUNT}")));
        }
        let folder = folder.into();
        if folder.trim().is_empty() {
            return Err(EngineError::validation("animation folder is empty"));
        }
        if folder.contains([',', '\n', '\r']) {
            return Err(EngineError::validation(format!("animation folder {folder:?} contains a separator")));
        }
        let folder = normalize_tile_path(&folder);
        Ok(Self {
            folder,
            frame_ms: frame_ms as u8,
            frame_count: frame_count as u8,
        })
    }

    /// Zero based frame to show after `elapsed_ms`. Pure, never touches map state.
    pub fn frame_at(&self, elapsed_ms: u64) -> usize {
        let ms = u64::from(self.frame_ms.max(1));
        let count = u64::from(self.frame_count.max(1));
        ((elapsed_ms / ms) % count) as usize
    }
}

/// Trims and validates an attribute so it can be stored in the comma separated map file.
pub fn sanitize_attribute(attr: &str) -> Result<String> {
    let trimmed = attr.trim();
    if trimmed.is_empty() || trimmed.contains([',', '\n', '\r']) {
        return Err(EngineError::InvalidAttribute { value: attr.to_string() });
    }
    Ok(trimmed.to_string())
}
