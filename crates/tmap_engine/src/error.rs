//! Unified error types for tmap_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tmap_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    // === Validation Errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Layer {layer} out of range (0..{max})")]
    LayerOutOfRange { layer: usize, max: usize },

    #[error("Tile {tile} out of range (0..{count})")]
    TileOutOfRange { tile: u32, count: usize },

    #[error("Invalid tile attribute: {value:?}")]
    InvalidAttribute { value: String },

    // === Loading Errors ===
    #[error("Unsupported format: {description}")]
    UnsupportedFormat { description: String },

    #[error("Invalid header: {message}")]
    InvalidHeader { message: String },

    #[error("Truncated data: needed {needed} bytes, {available} available")]
    TruncatedData { needed: usize, available: usize },

    #[error("Unexpected section marker: {found:?}")]
    MissingMarker { found: String },

    // === Asset Errors ===
    #[error("Missing asset: {}", path.display())]
    MissingAsset { path: PathBuf },

    #[error("Asset '{}' has size {}x{}, expected {}x{}", path.display(), actual.0, actual.1, expected.0, expected.1)]
    AssetSizeMismatch {
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Options parse error: {0}")]
    OptionsParse(#[from] toml::de::Error),

    #[error("Options write error: {0}")]
    OptionsWrite(#[from] toml::ser::Error),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for tmap_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a validation error (bad dimensions, counts or indices)
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation { message: msg.into() }
    }

    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader { message: msg.into() }
    }

    pub fn unsupported_format(description: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            description: description.into(),
        }
    }

    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    pub fn write_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}
