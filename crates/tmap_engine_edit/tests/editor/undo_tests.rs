use pretty_assertions::assert_eq;
use tmap_engine_edit::{CellChange, EditState, UndoState, DEFAULT_UNDO_DEPTH, EMPTY_TILE};

use crate::{create_test_document, create_test_state, layer_cells};

const E: u32 = EMPTY_TILE;

// ============================================================================
// Gestures
// ============================================================================

#[test]
fn test_undo_restores_single_cell() {
    // A at (1,0), B at (2,0), drawable 2x2 at (1,0); C goes to (1,1)
    let (a, b, c) = (0, 1, 2);
    #[rustfmt::skip]
    let doc = create_test_document((4, 3), (2, 2), 3, &[
        E, a, b, E,
        E, E, E, E,
        E, E, E, E,
    ]);
    let mut state = EditState::from_document(doc);
    let before = layer_cells(&state, 0);

    state.begin_gesture("paint");
    assert!(state.set_cell(0, (1, 1), c, false));
    state.commit_gesture();
    assert_eq!(layer_cells(&state, 0)[5], c);

    assert!(state.undo());
    assert_eq!(layer_cells(&state, 0), before);
    assert_eq!(state.tile_at(0, (1, 0)), Some(a));
    assert_eq!(state.tile_at(0, (2, 0)), Some(b));
    assert!(!state.can_undo());
}

#[test]
fn test_overlapping_writes_coalesce() {
    let doc = create_test_document((3, 1), (3, 1), 3, &[1, E, 2]);
    let mut state = EditState::from_document(doc);
    let before = layer_cells(&state, 0);

    state.begin_gesture("scribble");
    state.set_cell(0, (0, 0), 0, false);
    state.set_cell(0, (0, 0), 2, false);
    state.set_cell(0, (1, 0), 0, false);
    state.set_cell(0, (1, 0), 1, false);
    state.set_cell(0, (2, 0), 0, false);
    // written back to where it started
    state.set_cell(0, (2, 0), 2, false);
    state.commit_gesture();

    let frame = state.undo_stack().frames().next().unwrap().clone();
    assert_eq!(frame.description(), "scribble");
    assert_eq!(
        frame.changes(),
        &[
            CellChange { layer: 0, cell: 0, old: 1, new: 2 },
            CellChange { layer: 0, cell: 1, old: E, new: 1 },
        ]
    );

    state.undo();
    assert_eq!(layer_cells(&state, 0), before);
}

#[test]
fn test_gesture_without_net_change_pushes_nothing() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    state.begin_gesture("nothing");
    state.set_cell(0, (0, 0), 0, false);
    state.set_cell(0, (0, 0), E, false);
    assert!(!state.commit_gesture());
    assert_eq!(state.undo_stack_len(), 0);
}

#[test]
fn test_gestures_do_not_nest() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    assert!(state.begin_gesture("outer"));
    assert!(!state.begin_gesture("inner"));
    state.set_cell(0, (0, 0), 0, false);
    state.commit_gesture();
    assert_eq!(state.undo_description(), Some("outer".to_string()));
    assert!(!state.commit_gesture());
}

#[test]
fn test_cancel_gesture_keeps_cells() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    state.begin_gesture("paint");
    state.set_cell(0, (0, 0), 0, false);
    state.cancel_gesture();

    assert!(!state.in_gesture());
    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(state.tile_at(0, (0, 0)), Some(0));
}

#[test]
fn test_gesture_closure() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    let written = state.gesture("two cells", |s| {
        s.set_cell(0, (0, 0), 0, false);
        s.set_cell(0, (1, 1), 0, false);
        2
    });
    assert_eq!(written, 2);
    assert!(!state.in_gesture());
    assert_eq!(state.undo_description(), Some("two cells".to_string()));
    assert_eq!(state.undo_stack().frames().next().unwrap().changes().len(), 2);
}

// ============================================================================
// Undo
// ============================================================================

#[test]
fn test_undo_on_empty_stack() {
    let mut state = create_test_state((2, 2), (2, 2), 1);
    assert!(!state.undo());
    assert_eq!(state.undo_description(), None);
}

#[test]
fn test_undo_order() {
    let mut state = create_test_state((2, 1), (2, 1), 2);
    state.gesture("first", |s| s.set_cell(0, (0, 0), 0, false));
    state.gesture("second", |s| s.set_cell(0, (0, 0), 1, false));

    assert_eq!(state.undo_description(), Some("second".to_string()));
    state.undo();
    assert_eq!(state.tile_at(0, (0, 0)), Some(0));
    state.undo();
    assert_eq!(state.tile_at(0, (0, 0)), Some(E));
}

#[test]
fn test_undo_is_not_recorded() {
    let mut state = create_test_state((2, 1), (2, 1), 1);
    state.gesture("paint", |s| s.set_cell(0, (0, 0), 0, false));
    state.gesture("paint", |s| s.set_cell(0, (1, 0), 0, false));

    state.undo();
    assert_eq!(state.undo_stack_len(), 1);
    state.undo();
    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(layer_cells(&state, 0), vec![E, E]);
}

#[test]
fn test_undo_cancels_open_gesture() {
    let mut state = create_test_state((2, 1), (2, 1), 1);
    state.gesture("paint", |s| s.set_cell(0, (0, 0), 0, false));

    state.begin_gesture("stroke");
    state.set_cell(0, (1, 0), 0, false);
    assert!(state.undo());

    assert!(!state.in_gesture());
    assert_eq!(state.undo_stack_len(), 0);
    // the cancelled stroke stays painted
    assert_eq!(layer_cells(&state, 0), vec![E, 0]);
}

#[test]
fn test_undo_depth_evicts_oldest() {
    let mut state = create_test_state((10, 10), (10, 10), 1);
    for i in 0..60_i32 {
        state.gesture(format!("cell {i}"), |s| s.set_cell(0, (i % 10, i / 10), 0, false));
    }
    assert_eq!(state.undo_stack_len(), DEFAULT_UNDO_DEPTH);
    assert_eq!(state.undo_description(), Some("cell 59".to_string()));

    let mut undone = 0;
    while state.undo() {
        undone += 1;
    }
    assert_eq!(undone, DEFAULT_UNDO_DEPTH);
    // the first ten strokes fell off the stack
    let painted = layer_cells(&state, 0).iter().filter(|c| **c == 0).count();
    assert_eq!(painted, 10);
    assert_eq!(state.tile_at(0, (9, 0)), Some(0));
    assert_eq!(state.tile_at(0, (0, 1)), Some(E));
}

#[test]
fn test_undo_depth_from_options() {
    let mut options = tmap_engine_edit::MapOptions::default();
    options.undo_depth = 3;
    let mut state = EditState::with_options(create_test_document((4, 1), (4, 1), 1, &[]), options);
    for x in 0..4_i32 {
        state.gesture("paint", |s| s.set_cell(0, (x, 0), 0, false));
    }
    assert_eq!(state.undo_stack_len(), 3);
}

#[test]
fn test_undo_marks_dirty() {
    let mut state = create_test_state((2, 1), (2, 1), 1);
    state.gesture("paint", |s| s.set_cell(0, (0, 0), 0, false));
    state.mark_saved();
    assert!(!state.is_dirty());
    state.undo();
    assert!(state.is_dirty());
}
