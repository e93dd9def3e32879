//! Map Edit State
//!
//! The state container for map editing. It owns the [`MapDocument`], the
//! options it was opened with, and the undo stack. Hosts only read from the
//! document and call methods here to modify it, so every cell write can be
//! recorded for undo.
//!
//! ## Undo model
//!
//! - Cell edits made inside a gesture coalesce into one undo frame
//! - Undo restores the old values; there is no redo
//! - Structural changes (layers, canvas size, replacing the document) clear the stack
//! - Tile list changes rewrite the stored ids instead

use std::path::{Path, PathBuf};

use crate::{MapDocument, MapOptions, Position, Result};

use super::{Gesture, UndoStack};

// ═══════════════════════════════════════════════════════════════════════════
// Map Edit State
// ═══════════════════════════════════════════════════════════════════════════

pub struct EditState {
    pub(crate) document: MapDocument,
    pub(crate) options: MapOptions,

    // ═══════════════════════════════════════════════════════════════════════
    // Undo
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) undo_stack: UndoStack,

    /// Open gesture collecting cell changes
    pub(crate) gesture: Option<Gesture>,

    /// Set while undo replays a frame; suppresses recording
    pub(crate) replaying: bool,

    // ═══════════════════════════════════════════════════════════════════════
    // File
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) file_name: Option<PathBuf>,

    pub(crate) is_dirty: bool,
}

impl EditState {
    pub fn from_document(document: MapDocument) -> Self {
        Self::with_options(document, MapOptions::default())
    }

    pub fn with_options(document: MapDocument, options: MapOptions) -> Self {
        let undo_stack = UndoStack::new(options.undo_depth);
        Self {
            document,
            options,
            undo_stack,
            gesture: None,
            replaying: false,
            file_name: None,
            is_dirty: false,
        }
    }

    /// Empty map sized to the configured maximum canvas, drawable covering all of it
    pub fn new_map(options: MapOptions) -> Result<Self> {
        let canvas = options.max_canvas();
        let document = MapDocument::new(options.tile_size(), canvas, canvas)?;
        Ok(Self::with_options(document, options))
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Swaps in another document. History of the old one is meaningless, so it goes.
    pub fn replace_document(&mut self, document: MapDocument) {
        self.cancel_gesture();
        self.document = document;
        self.undo_stack.clear();
        self.is_dirty = false;
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, path: Option<PathBuf>) {
        self.file_name = path;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Tile id at `pos` on `layer` (pick tool); `None` outside the canvas
    pub fn tile_at(&self, layer: usize, pos: impl Into<Position>) -> Option<u32> {
        self.document.get_cell(layer, pos)
    }
}
