//! Gestures and undo
//!
//! A gesture groups every cell write between `begin_gesture` and
//! `commit_gesture` into one undo frame. Gestures do not nest: beginning while
//! one is open (or while undo replays) does nothing.

use super::{EditState, Gesture, UndoState};

impl EditState {
    /// Opens a gesture. Returns false if one is already open or undo is replaying.
    pub fn begin_gesture(&mut self, description: impl Into<String>) -> bool {
        if self.gesture.is_some() || self.replaying {
            return false;
        }
        let description = description.into();
        log::debug!("begin gesture '{description}'");
        self.gesture = Some(Gesture::new(description));
        true
    }

    /// Closes the open gesture and pushes its net changes as one frame.
    /// Returns true if a frame was pushed.
    pub fn commit_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        let description = gesture.description().to_string();
        match gesture.into_frame() {
            Some(frame) => {
                log::debug!("commit gesture '{description}' with {} changes", frame.changes().len());
                self.undo_stack.push(frame);
                true
            }
            None => {
                log::debug!("gesture '{description}' changed nothing");
                false
            }
        }
    }

    /// Drops the open gesture. Cells already written stay as they are.
    pub fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            log::debug!("cancel gesture '{}'", gesture.description());
        }
    }

    /// Runs `f` inside a gesture and commits it afterwards.
    /// If a gesture is already open, `f` joins it and nothing is committed here.
    pub fn gesture<T>(&mut self, description: impl Into<String>, f: impl FnOnce(&mut Self) -> T) -> T {
        let opened = self.begin_gesture(description);
        let result = f(self);
        if opened {
            self.commit_gesture();
        }
        result
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UndoState Trait Implementation
// ═══════════════════════════════════════════════════════════════════════════

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.undo_description()
    }

    fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let Some(frame) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("undo '{}' ({} cells)", frame.description(), frame.changes().len());

        self.replaying = true;
        for change in frame.changes() {
            let pos = self.document.cell_position(change.cell);
            if !self.set_cell(change.layer, pos, change.old, true) && self.document.get_cell(change.layer, pos) != Some(change.old) {
                log::warn!("undo could not restore layer {} cell {}", change.layer, change.cell);
            }
        }
        self.replaying = false;
        true
    }
}
