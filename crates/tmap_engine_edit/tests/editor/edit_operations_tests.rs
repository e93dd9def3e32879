use pretty_assertions::assert_eq;
use tmap_engine_edit::{EditState, Position, EMPTY_TILE};

use crate::{create_test_document, create_test_state, layer_cells};

const E: u32 = EMPTY_TILE;

// ============================================================================
// set_cell
// ============================================================================

#[test]
fn test_set_cell_inside_drawable() {
    // 4x3 canvas, 2x2 drawable centered at (1, 0)
    let mut state = create_test_state((4, 3), (2, 2), 2);
    assert_eq!(state.document().drawable().start, Position::new(1, 0));

    assert!(state.set_cell(0, (2, 1), 1, false));
    assert_eq!(state.tile_at(0, (2, 1)), Some(1));
    assert_eq!(layer_cells(&state, 0)[6], 1);
}

#[test]
fn test_set_cell_rejections() {
    let mut state = create_test_state((4, 3), (2, 2), 2);
    let before = layer_cells(&state, 0);

    // unknown layer
    assert!(!state.set_cell(1, (1, 0), 0, false));
    // outside the canvas
    assert!(!state.set_cell(0, (-1, 0), 0, true));
    assert!(!state.set_cell(0, (4, 0), 0, true));
    // padding outside the drawable
    assert!(!state.set_cell(0, (0, 0), 0, false));
    // unknown tile id
    assert!(!state.set_cell(0, (1, 0), 2, false));
    // same value
    assert!(!state.set_cell(0, (1, 0), E, false));

    assert_eq!(layer_cells(&state, 0), before);
    assert!(!state.is_dirty());
}

#[test]
fn test_set_cell_allow_outside() {
    let mut state = create_test_state((4, 3), (2, 2), 2);
    assert!(state.set_cell(0, (0, 0), 1, true));
    assert_eq!(state.tile_at(0, (0, 0)), Some(1));
}

#[test]
fn test_erase_cell() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    state.set_cell(0, (1, 1), 0, false);
    assert!(state.erase_cell(0, (1, 1)));
    assert_eq!(state.tile_at(0, (1, 1)), Some(E));
    assert!(!state.erase_cell(0, (1, 1)));
}

#[test]
fn test_set_cell_without_gesture_is_not_recorded() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    assert!(state.set_cell(0, (0, 0), 0, false));
    assert_eq!(state.undo_stack_len(), 0);
    assert!(state.is_dirty());
}

// ============================================================================
// Flood fill
// ============================================================================

#[test]
fn test_flood_fill_stays_in_drawable() {
    let mut state = create_test_state((4, 3), (2, 2), 1);
    let changed = state.flood_fill(0, (1, 0), 0);
    assert_eq!(changed, 4);
    #[rustfmt::skip]
    assert_eq!(layer_cells(&state, 0), vec![
        E, 0, 0, E,
        E, 0, 0, E,
        E, E, E, E,
    ]);
    assert_eq!(state.undo_stack_len(), 1);
}

#[test]
fn test_flood_fill_respects_borders() {
    #[rustfmt::skip]
    let doc = create_test_document((3, 3), (3, 3), 2, &[
        E, 1, E,
        E, 1, E,
        E, 1, E,
    ]);
    let mut state = EditState::from_document(doc);
    assert_eq!(state.flood_fill(0, (0, 0), 0), 3);
    #[rustfmt::skip]
    assert_eq!(layer_cells(&state, 0), vec![
        0, 1, E,
        0, 1, E,
        0, 1, E,
    ]);
}

#[test]
fn test_flood_fill_replaces_tiles() {
    #[rustfmt::skip]
    let doc = create_test_document((3, 2), (3, 2), 2, &[
        0, 0, 1,
        1, 0, 0,
    ]);
    let mut state = EditState::from_document(doc);
    assert_eq!(state.flood_fill(0, (1, 1), 1), 4);
    assert_eq!(layer_cells(&state, 0), vec![1; 6]);
}

#[test]
fn test_flood_fill_no_ops() {
    let mut state = create_test_state((4, 3), (2, 2), 1);
    // seed already equals the tile
    assert_eq!(state.flood_fill(0, (1, 0), E), 0);
    // start outside the drawable
    assert_eq!(state.flood_fill(0, (0, 0), 0), 0);
    // unknown tile
    assert_eq!(state.flood_fill(0, (1, 0), 7), 0);
    assert_eq!(state.undo_stack_len(), 0);
    assert!(!state.is_dirty());
}

// ============================================================================
// Rectangle and line
// ============================================================================

#[test]
fn test_fill_rectangle_is_clamped() {
    let mut state = create_test_state((4, 3), (2, 2), 1);
    assert_eq!(state.fill_rectangle(0, (3, 2), (0, 0), 0), 4);
    #[rustfmt::skip]
    assert_eq!(layer_cells(&state, 0), vec![
        E, 0, 0, E,
        E, 0, 0, E,
        E, E, E, E,
    ]);
    assert_eq!(state.undo_stack_len(), 1);
}

#[test]
fn test_fill_rectangle_counts_changed_cells() {
    let mut state = create_test_state((3, 3), (3, 3), 1);
    state.set_cell(0, (1, 1), 0, false);
    assert_eq!(state.fill_rectangle(0, (0, 0), (2, 2), 0), 8);
}

#[test]
fn test_draw_line() {
    let mut state = create_test_state((3, 3), (3, 3), 1);
    assert_eq!(state.draw_line(0, (2, 0), (0, 2), 0), 3);
    #[rustfmt::skip]
    assert_eq!(layer_cells(&state, 0), vec![
        E, E, 0,
        E, 0, E,
        0, E, E,
    ]);
}

#[test]
fn test_draw_line_skips_padding() {
    let mut state = create_test_state((4, 3), (2, 2), 1);
    // crosses the whole canvas, only the drawable part is written
    assert_eq!(state.draw_line(0, (0, 0), (3, 0), 0), 2);
    assert_eq!(&layer_cells(&state, 0)[0..4], &[E, 0, 0, E]);
}

#[test]
fn test_batch_operation_joins_open_gesture() {
    let mut state = create_test_state((3, 3), (3, 3), 2);
    assert!(state.begin_gesture("stroke"));
    state.draw_line(0, (0, 0), (2, 0), 0);
    state.fill_rectangle(0, (0, 1), (2, 1), 1);
    assert!(state.in_gesture());
    assert!(state.commit_gesture());

    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(state.undo_stack().frames().next().unwrap().changes().len(), 6);
}
