//! Layer operations
//!
//! Adding, removing or moving layers shifts layer indices, so the undo stack
//! is cleared. Changing the prop layer only changes metadata.

use crate::Result;

use super::EditState;

impl EditState {
    pub fn add_layer(&mut self) -> usize {
        self.before_structural_change("add layer");
        let index = self.document.add_layer();
        self.is_dirty = true;
        index
    }

    pub fn remove_layer(&mut self, layer: usize) -> Result<()> {
        self.document.remove_layer(layer)?;
        self.before_structural_change("remove layer");
        self.is_dirty = true;
        Ok(())
    }

    /// Moves `layer` by `delta` positions, returns its new index
    pub fn move_layer(&mut self, layer: usize, delta: i32) -> Result<usize> {
        let new_index = self.document.move_layer(layer, delta)?;
        if new_index != layer {
            self.before_structural_change("move layer");
            self.is_dirty = true;
        }
        Ok(new_index)
    }

    pub fn set_prop_layer(&mut self, layer: Option<usize>) -> Result<()> {
        if self.document.prop_layer() == layer {
            return Ok(());
        }
        self.document.set_prop_layer(layer)?;
        self.is_dirty = true;
        Ok(())
    }

    pub fn clear_prop_layer(&mut self) {
        if self.document.prop_layer().is_some() {
            self.document.clear_prop_layer();
            self.is_dirty = true;
        }
    }

    pub(crate) fn before_structural_change(&mut self, what: &str) {
        self.cancel_gesture();
        if !self.undo_stack.is_empty() {
            log::debug!("{what}: clearing {} undo frames", self.undo_stack.len());
            self.undo_stack.clear();
        }
    }
}
