//! Map size limits
//!
//! Every dimension stored in a tile map (tile pixel size, canvas size,
//! drawable size) must fit in one byte and be non-zero.

/// Smallest legal value for any map dimension
pub const MIN_DIMENSION: i32 = 1;

/// Largest legal value for any map dimension
pub const MAX_DIMENSION: i32 = 255;

/// Largest legal animation frame duration in milliseconds
pub const MAX_FRAME_MS: u32 = 255;

/// Largest legal animation frame count
pub const MAX_FRAME_COUNT: u32 = 255;

/// Check if a single dimension is within limits
#[inline]
pub fn is_valid_dimension(value: i32) -> bool {
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&value)
}

/// Check if both dimensions are within limits
#[inline]
pub fn is_within_limits(width: i32, height: i32) -> bool {
    is_valid_dimension(width) && is_valid_dimension(height)
}
