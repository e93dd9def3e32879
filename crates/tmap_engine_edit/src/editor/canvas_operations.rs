use crate::{Result, Size};

use super::EditState;

impl EditState {
    /// Resizes the canvas around the centered drawable content.
    /// Cell indices change, so undo history is cleared.
    pub fn resize_canvas(&mut self, canvas: impl Into<Size>) -> Result<()> {
        let canvas = canvas.into();
        if canvas == self.document.canvas_size() {
            return Ok(());
        }
        self.document.resize_canvas(canvas)?;
        self.before_structural_change("resize canvas");
        self.is_dirty = true;
        Ok(())
    }

    /// Resizes the drawable inside the current canvas. Canvas indices stay
    /// valid, so history is kept; undo may restore cells outside the new drawable.
    pub fn set_drawable_size(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        if size == self.document.drawable().size {
            return Ok(());
        }
        self.cancel_gesture();
        self.document.set_drawable_size(size)?;
        self.is_dirty = true;
        Ok(())
    }
}
