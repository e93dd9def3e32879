#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

mod editor;
pub use editor::*;

pub mod brushes;

// Re-export the document types the editor works on
pub use tmap_engine::{
    is_empty_tile, EngineError, Layer, MapDocument, MapOptions, Position, Rectangle, Result, Size, TileAnimation, TileRemap, EMPTY_TILE,
};
