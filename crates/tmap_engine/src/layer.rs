use crate::{is_empty_tile, Size, EMPTY_TILE};

/// One grid of tile references, row-major over the whole canvas.
///
/// The length is fixed at construction; cells can change but the grid
/// can only be resized by replacing the layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    cells: Vec<u32>,
}

impl Layer {
    /// Creates an empty layer for the given canvas size
    pub fn new(size: Size) -> Self {
        Self {
            cells: vec![EMPTY_TILE; size.area()],
        }
    }

    pub fn from_cells(cells: Vec<u32>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied()
    }

    /// Writes a cell and returns the previous value, `None` if out of range
    pub fn set(&mut self, index: usize, value: u32) -> Option<u32> {
        let cell = self.cells.get_mut(index)?;
        Some(std::mem::replace(cell, value))
    }

    /// Number of cells holding a tile
    pub fn used_cells(&self) -> usize {
        self.cells.iter().filter(|c| !is_empty_tile(**c)).count()
    }

    /// Applies `f` to every non-empty cell
    pub fn remap(&mut self, mut f: impl FnMut(u32) -> u32) {
        for cell in &mut self.cells {
            if !is_empty_tile(*cell) {
                *cell = f(*cell);
            }
        }
    }
}
