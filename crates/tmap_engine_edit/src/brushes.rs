//! Shape rasterization for map painting
//!
//! Contains algorithms for:
//! - Lines (Bresenham's algorithm)
//! - Filled rectangles clamped to a bounds rectangle
//! - Flood fill (4-connected BFS) inside a bounds rectangle
//!
//! These only compute positions; writing cells is up to the caller.

use std::collections::{HashSet, VecDeque};

use crate::{Position, Rectangle};

// ═══════════════════════════════════════════════════════════════════════════
// Bresenham Line Algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Every lattice point from `p0` to `p1`, both inclusive.
///
/// Uses the all-octant error accumulator form, so swapping the endpoints
/// yields the same set of points.
pub fn line_points(p0: Position, p1: Position) -> Vec<Position> {
    let dx = (p1.x - p0.x).abs();
    let dy = -(p1.y - p0.y).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut x = p0.x;
    let mut y = p0.y;
    loop {
        points.push(Position::new(x, y));
        if x == p1.x && y == p1.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

// ═══════════════════════════════════════════════════════════════════════════
// Rectangle
// ═══════════════════════════════════════════════════════════════════════════

/// All points of the rectangle spanned by two corners (inclusive, any order),
/// clamped to `bounds` before enumeration.
pub fn rectangle_points(a: Position, b: Position, bounds: Rectangle) -> Vec<Position> {
    let rect = Rectangle::from_corners_inclusive(a, b).intersect(&bounds);
    if rect.is_empty() {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(rect.size.width as usize * rect.size.height as usize);
    for y in rect.y_range() {
        for x in rect.x_range() {
            points.push(Position::new(x, y));
        }
    }
    points
}

// ═══════════════════════════════════════════════════════════════════════════
// Flood Fill
// ═══════════════════════════════════════════════════════════════════════════

/// Compute flood fill points using 4-connected BFS
///
/// Returns the connected component of `start` among positions for which
/// `matches` is true, in visiting order. Expansion never leaves `bounds`.
pub fn flood_fill_points<F>(start: Position, bounds: Rectangle, matches: F) -> Vec<Position>
where
    F: Fn(Position) -> bool,
{
    let mut result = Vec::new();
    if !bounds.is_inside(start) || !matches(start) {
        return result;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        result.push(pos);
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let next = Position::new(pos.x + dx, pos.y + dy);
            if !bounds.is_inside(next) || visited.contains(&next) {
                continue;
            }
            if matches(next) {
                visited.insert(next);
                queue.push_back(next);
            }
        }
    }

    result
}
