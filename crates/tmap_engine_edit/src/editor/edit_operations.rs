//! Cell editing operations
//!
//! Everything funnels through [`EditState::set_cell`], which validates the
//! write and records it into the open gesture. The batch operations compute
//! their positions with [`crate::brushes`] and run inside a gesture of their
//! own unless the caller already opened one.

use crate::{brushes, Position, EMPTY_TILE};

use super::EditState;

impl EditState {
    /// Writes `tile` to `pos` on `layer`.
    ///
    /// Returns false without touching anything if the layer does not exist,
    /// `pos` is outside the canvas, `pos` is outside the drawable (unless
    /// `allow_outside`), `tile` is neither empty nor a known tile, or the cell
    /// already holds `tile`.
    pub fn set_cell(&mut self, layer: usize, pos: impl Into<Position>, tile: u32, allow_outside: bool) -> bool {
        let pos = pos.into();
        if layer >= self.document.layer_count() {
            return false;
        }
        let Some(index) = self.document.cell_index(pos) else {
            return false;
        };
        if !allow_outside && !self.document.drawable().is_inside(pos) {
            return false;
        }
        if !self.document.is_valid_cell_value(tile) {
            return false;
        }
        let Some(cells) = self.document.layer_mut(layer) else {
            return false;
        };
        let old = match cells.get(index) {
            Some(old) if old != tile => old,
            _ => return false,
        };
        cells.set(index, tile);
        self.is_dirty = true;

        if !self.replaying {
            if let Some(gesture) = &mut self.gesture {
                gesture.record(layer, index, old, tile);
            }
        }
        true
    }

    pub fn erase_cell(&mut self, layer: usize, pos: impl Into<Position>) -> bool {
        self.set_cell(layer, pos, EMPTY_TILE, false)
    }

    /// Replaces the 4-connected region of cells equal to the value at `pos`.
    /// The fill never leaves the drawable. Returns the number of changed cells.
    pub fn flood_fill(&mut self, layer: usize, pos: impl Into<Position>, tile: u32) -> usize {
        let pos = pos.into();
        let drawable = self.document.drawable();
        if !drawable.is_inside(pos) || !self.document.is_valid_cell_value(tile) {
            return 0;
        }
        let Some(seed) = self.document.get_cell(layer, pos) else {
            return 0;
        };
        if seed == tile {
            return 0;
        }

        let document = &self.document;
        let points = brushes::flood_fill_points(pos, drawable, |p| document.get_cell(layer, p) == Some(seed));
        self.write_points(layer, &points, tile, "Flood fill")
    }

    /// Fills the inclusive rectangle spanned by `a` and `b`, clamped to the drawable
    pub fn fill_rectangle(&mut self, layer: usize, a: impl Into<Position>, b: impl Into<Position>, tile: u32) -> usize {
        let points = brushes::rectangle_points(a.into(), b.into(), self.document.drawable());
        self.write_points(layer, &points, tile, "Fill rectangle")
    }

    /// Draws a line from `p0` to `p1`; points outside the drawable are skipped
    pub fn draw_line(&mut self, layer: usize, p0: impl Into<Position>, p1: impl Into<Position>, tile: u32) -> usize {
        let drawable = self.document.drawable();
        let points: Vec<Position> = brushes::line_points(p0.into(), p1.into())
            .into_iter()
            .filter(|p| drawable.is_inside(*p))
            .collect();
        self.write_points(layer, &points, tile, "Draw line")
    }

    fn write_points(&mut self, layer: usize, points: &[Position], tile: u32, description: &str) -> usize {
        if points.is_empty() {
            return 0;
        }
        self.gesture(description, |state| points.iter().filter(|p| state.set_cell(layer, **p, tile, false)).count())
    }
}
