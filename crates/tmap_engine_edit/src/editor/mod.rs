//! Map edit state module structure
//!
//! - `state.rs` - Struct definition, constructors, getters
//! - `edit_operations.rs` - Cell writes, flood fill, rectangle fill, line draw
//! - `layer_operations.rs` - Layer add/remove/move and prop layer
//! - `tile_operations.rs` - Tile list, attributes and animations
//! - `canvas_operations.rs` - Canvas and drawable resizing
//! - `file_operations.rs` - New, open, save, export
//! - `undo.rs` - Gestures and undo
//! - `undo_stack.rs` - Frames and the bounded stack

mod state;
mod undo_stack;

mod canvas_operations;
mod edit_operations;
mod file_operations;
mod layer_operations;
mod tile_operations;
mod undo;

pub use state::EditState;
pub use undo_stack::{CellChange, Gesture, UndoFrame, UndoStack, UndoState, DEFAULT_UNDO_DEPTH};
