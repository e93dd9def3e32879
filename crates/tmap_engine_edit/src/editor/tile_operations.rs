//! Tile list, attribute and animation operations
//!
//! Removing or reordering tiles changes cell values across the map. The same
//! [`TileRemap`] is applied to the undo stack and the open gesture, so history
//! stays usable.

use crate::{Result, TileAnimation, TileRemap};

use super::EditState;

impl EditState {
    pub fn add_tile(&mut self, path: &str) -> Result<u32> {
        let id = self.document.add_tile(path)?;
        self.is_dirty = true;
        Ok(id)
    }

    pub fn remove_tile(&mut self, tile: u32) -> Result<()> {
        let remap = self.document.remove_tile(tile)?;
        self.remap_history(&remap);
        Ok(())
    }

    /// `new_order[new_id]` names the old id placed at `new_id`
    pub fn reorder_tiles(&mut self, new_order: &[u32]) -> Result<()> {
        let remap = self.document.reorder_tiles(new_order)?;
        self.remap_history(&remap);
        Ok(())
    }

    /// Swaps `tile` with its neighbour `delta` positions away, returns the new id
    pub fn move_tile(&mut self, tile: u32, delta: i32) -> Result<u32> {
        let (new_id, remap) = self.document.move_tile(tile, delta)?;
        self.remap_history(&remap);
        Ok(new_id)
    }

    pub fn move_tile_to(&mut self, tile: u32, target: u32) -> Result<()> {
        let remap = self.document.move_tile_to(tile, target)?;
        self.remap_history(&remap);
        Ok(())
    }

    /// Adds `attr` to each of `targets`, returns how many tiles gained it
    pub fn add_attribute(&mut self, targets: &[u32], attr: &str) -> Result<usize> {
        let added = self.document.add_attribute(targets, attr)?;
        if added > 0 {
            self.is_dirty = true;
        }
        Ok(added)
    }

    pub fn remove_attribute(&mut self, targets: &[u32], attr: &str) -> usize {
        let removed = self.document.remove_attribute(targets, attr);
        if removed > 0 {
            self.is_dirty = true;
        }
        removed
    }

    pub fn set_animation(&mut self, tile: u32, animation: TileAnimation) -> Result<()> {
        self.document.set_animation(tile, animation)?;
        self.is_dirty = true;
        Ok(())
    }

    pub fn clear_animation(&mut self, tile: u32) -> bool {
        let cleared = self.document.clear_animation(tile);
        if cleared {
            self.is_dirty = true;
        }
        cleared
    }

    fn remap_history(&mut self, remap: &TileRemap) {
        self.undo_stack.remap_tiles(remap);
        if let Some(gesture) = &mut self.gesture {
            gesture.remap_tiles(remap);
        }
        self.is_dirty = true;
    }
}
