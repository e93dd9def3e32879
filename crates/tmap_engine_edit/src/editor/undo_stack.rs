//! Undo stack for map editing
//!
//! A gesture (one stroke, one fill click) collects per-cell changes keyed by
//! `(layer, cell)`. Writing the same cell again keeps the first `old` value and
//! only updates `new`. On commit the unchanged entries are dropped and the rest
//! becomes one [`UndoFrame`].

use std::collections::{HashMap, VecDeque};

use crate::TileRemap;

/// Default number of frames kept
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// Trait for types that support undo
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Undo the most recent frame. Returns false if there was nothing to undo.
    fn undo(&mut self) -> bool;
}

/// Net change of one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub layer: usize,
    pub cell: usize,
    pub old: u32,
    pub new: u32,
}

/// One committed gesture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoFrame {
    description: String,
    changes: Vec<CellChange>,
}

impl UndoFrame {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }
}

/// Open gesture, keyed by `(layer, cell)`
#[derive(Clone, Debug, Default)]
pub struct Gesture {
    description: String,
    changes: HashMap<(usize, usize), (u32, u32)>,
}

impl Gesture {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            changes: HashMap::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of touched cells, including ones written back to their original value
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn record(&mut self, layer: usize, cell: usize, old: u32, new: u32) {
        self.changes.entry((layer, cell)).and_modify(|entry| entry.1 = new).or_insert((old, new));
    }

    /// Collapses to the changed cells; `None` if nothing changed
    pub fn into_frame(self) -> Option<UndoFrame> {
        let mut changes: Vec<CellChange> = self
            .changes
            .into_iter()
            .filter(|(_, (old, new))| old != new)
            .map(|((layer, cell), (old, new))| CellChange { layer, cell, old, new })
            .collect();
        if changes.is_empty() {
            return None;
        }
        changes.sort_by_key(|c| (c.layer, c.cell));
        Some(UndoFrame {
            description: self.description,
            changes,
        })
    }

    pub(crate) fn remap_tiles(&mut self, remap: &TileRemap) {
        for (old, new) in self.changes.values_mut() {
            *old = remap.apply(*old);
            *new = remap.apply(*new);
        }
    }
}

/// Bounded stack of undo frames, oldest evicted first
#[derive(Clone, Debug)]
pub struct UndoStack {
    frames: VecDeque<UndoFrame>,
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl UndoStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn push(&mut self, frame: UndoFrame) {
        self.frames.push_back(frame);
        self.trim();
    }

    pub fn pop(&mut self) -> Option<UndoFrame> {
        self.frames.pop_back()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.frames.back().map(|f| f.description.clone())
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn frames(&self) -> impl Iterator<Item = &UndoFrame> {
        self.frames.iter()
    }

    /// Rewrites recorded tile ids after the tile list changed.
    /// Changes that become no-ops are dropped, and so are frames left empty.
    pub fn remap_tiles(&mut self, remap: &TileRemap) {
        for frame in &mut self.frames {
            for change in &mut frame.changes {
                change.old = remap.apply(change.old);
                change.new = remap.apply(change.new);
            }
            frame.changes.retain(|c| c.old != c.new);
        }
        self.frames.retain(|f| !f.changes.is_empty());
    }

    fn trim(&mut self) {
        while self.frames.len() > self.max_depth {
            self.frames.pop_front();
        }
    }
}
