use pretty_assertions::assert_eq;
use tmap_engine_edit::{CellChange, EditState, UndoState, EMPTY_TILE};

use crate::{create_test_document, create_test_state, layer_cells};

const E: u32 = EMPTY_TILE;

fn state_with_history() -> EditState {
    let mut state = create_test_state((4, 4), (4, 4), 2);
    state.gesture("paint", |s| s.set_cell(0, (0, 0), 0, false));
    assert_eq!(state.undo_stack_len(), 1);
    state
}

// ============================================================================
// Operations that clear history
// ============================================================================

#[test]
fn test_add_layer_clears_undo() {
    let mut state = state_with_history();
    assert_eq!(state.add_layer(), 1);
    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(state.document().layer_count(), 2);
}

#[test]
fn test_remove_layer_clears_undo() {
    let mut state = state_with_history();
    state.add_layer();
    state.gesture("paint", |s| s.set_cell(1, (1, 1), 1, false));
    state.remove_layer(0).unwrap();
    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(state.tile_at(0, (1, 1)), Some(1));
}

#[test]
fn test_failed_layer_removal_keeps_undo() {
    let mut state = state_with_history();
    assert!(state.remove_layer(0).is_err());
    assert!(state.remove_layer(5).is_err());
    assert_eq!(state.undo_stack_len(), 1);
}

#[test]
fn test_move_layer_clears_undo() {
    let mut state = state_with_history();
    state.add_layer();
    state.gesture("paint", |s| s.set_cell(0, (1, 0), 1, false));
    state.set_prop_layer(Some(0)).unwrap();

    assert_eq!(state.move_layer(0, 1).unwrap(), 1);
    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(state.document().prop_layer(), Some(1));
    assert_eq!(state.tile_at(1, (0, 0)), Some(0));
}

#[test]
fn test_resize_canvas_clears_undo() {
    let mut state = state_with_history();
    state.resize_canvas((6, 6)).unwrap();
    assert_eq!(state.undo_stack_len(), 0);
    // content stays centered
    assert_eq!(state.tile_at(0, (1, 1)), Some(0));
    assert!(!state.undo());
}

#[test]
fn test_open_gesture_is_dropped_by_structural_change() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    state.begin_gesture("stroke");
    state.set_cell(0, (0, 0), 0, false);
    state.add_layer();
    assert!(!state.in_gesture());
    assert!(!state.commit_gesture());
    assert_eq!(state.undo_stack_len(), 0);
}

// ============================================================================
// Operations that keep history
// ============================================================================

#[test]
fn test_set_prop_layer_keeps_undo() {
    let mut state = state_with_history();
    state.set_prop_layer(Some(0)).unwrap();
    assert_eq!(state.undo_stack_len(), 1);
    assert!(state.set_prop_layer(Some(3)).is_err());

    state.mark_saved();
    state.clear_prop_layer();
    assert_eq!(state.document().prop_layer(), None);
    assert!(state.is_dirty());
    assert_eq!(state.undo_stack_len(), 1);
}

#[test]
fn test_drawable_shrink_then_undo_restores_outside() {
    let doc = create_test_document((4, 4), (4, 4), 2, &[1; 16]);
    let mut state = EditState::from_document(doc);
    state.gesture("paint", |s| s.set_cell(0, (0, 0), 0, false));

    state.set_drawable_size((2, 2)).unwrap();
    assert_eq!(state.undo_stack_len(), 1);
    // (0,0) is padding now and was cleared
    assert_eq!(state.tile_at(0, (0, 0)), Some(E));
    assert!(!state.set_cell(0, (0, 0), 1, false));

    assert!(state.undo());
    assert_eq!(state.tile_at(0, (0, 0)), Some(1));
    assert_eq!(state.tile_at(0, (1, 1)), Some(1));
}

#[test]
fn test_drawable_larger_than_canvas_fails() {
    let mut state = state_with_history();
    assert!(state.set_drawable_size((5, 4)).is_err());
    assert_eq!(state.undo_stack_len(), 1);
}

// ============================================================================
// Tile list changes rewrite history
// ============================================================================

#[test]
fn test_remove_tile_remaps_undo_frames() {
    let doc = create_test_document((2, 1), (2, 1), 3, &[0, E]);
    let mut state = EditState::from_document(doc);
    state.gesture("paint", |s| {
        s.set_cell(0, (0, 0), 1, false);
        s.set_cell(0, (1, 0), 2, false)
    });

    state.remove_tile(0).unwrap();
    assert_eq!(layer_cells(&state, 0), vec![0, 1]);
    let frame = state.undo_stack().frames().next().unwrap().clone();
    assert_eq!(
        frame.changes(),
        &[
            CellChange { layer: 0, cell: 0, old: E, new: 0 },
            CellChange { layer: 0, cell: 1, old: E, new: 1 },
        ]
    );

    assert!(state.undo());
    assert_eq!(layer_cells(&state, 0), vec![E, E]);
}

#[test]
fn test_reorder_tiles_remaps_undo_frames() {
    let mut state = create_test_state((2, 1), (2, 1), 3);
    state.gesture("first", |s| s.set_cell(0, (0, 0), 2, false));
    state.gesture("second", |s| s.set_cell(0, (1, 0), 0, false));

    // old 2 becomes 0, old 0 becomes 1, old 1 becomes 2
    state.reorder_tiles(&[2, 0, 1]).unwrap();
    assert_eq!(layer_cells(&state, 0), vec![0, 1]);
    assert_eq!(state.document().tile_path(0), Some("./tile_2.png"));

    state.undo();
    assert_eq!(layer_cells(&state, 0), vec![0, E]);
    state.undo();
    assert_eq!(layer_cells(&state, 0), vec![E, E]);
}

#[test]
fn test_move_tile_remaps_open_gesture() {
    let mut state = create_test_state((2, 1), (2, 1), 2);
    state.begin_gesture("stroke");
    state.set_cell(0, (0, 0), 1, false);

    assert_eq!(state.move_tile(1, -1).unwrap(), 0);
    assert_eq!(state.tile_at(0, (0, 0)), Some(0));
    state.set_cell(0, (1, 0), 1, false);
    state.commit_gesture();

    state.undo();
    assert_eq!(layer_cells(&state, 0), vec![E, E]);
}

#[test]
fn test_tile_metadata_marks_dirty() {
    let mut state = create_test_state((2, 1), (2, 1), 2);
    assert_eq!(state.add_attribute(&[0, 1], "solid").unwrap(), 2);
    assert!(state.is_dirty());
    state.mark_saved();

    assert_eq!(state.remove_attribute(&[1], "missing"), 0);
    assert!(!state.is_dirty());
    assert!(!state.clear_animation(0));
    assert!(!state.is_dirty());

    assert_eq!(state.remove_attribute(&[1], "solid"), 1);
    assert!(state.is_dirty());
    assert_eq!(state.document().tile_attributes(0), &["solid".to_string()]);
}
