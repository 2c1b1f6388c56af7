//! DragDrop Utilities
//!
//! Drag gesture state as a plain value, independent of any UI toolkit.
//! Uses a movement threshold to distinguish click from drag.
//!
//! A session lives from press (or native drag start) to release. Dropping
//! the session without calling [`DragSession::finish`] is a cancel; nothing
//! is ever applied on its behalf.

use std::fmt::Debug;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Computed drop action: what was dragged onto what
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction<K> {
    pub dragged: K,
    pub target: K,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Pressed but not moved far enough yet
    Pending { start_x: i32, start_y: i32 },
    Dragging,
}

/// One drag gesture over items keyed by `K`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession<K> {
    dragged: K,
    target: Option<K>,
    phase: Phase,
}

impl<K: Clone + PartialEq + Debug> DragSession<K> {
    /// Pointer pressed on `item`; becomes a drag once it moves past the threshold
    pub fn press(item: K, x: i32, y: i32) -> Self {
        Self {
            dragged: item,
            target: None,
            phase: Phase::Pending { start_x: x, start_y: y },
        }
    }

    /// Native drag start: already dragging
    pub fn begin(item: K) -> Self {
        Self {
            dragged: item,
            target: None,
            phase: Phase::Dragging,
        }
    }

    pub fn dragged(&self) -> &K {
        &self.dragged
    }

    pub fn target(&self) -> Option<&K> {
        self.target.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Pointer moved. Returns true when this move started the drag.
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        if let Phase::Pending { start_x, start_y } = self.phase {
            let dx = (x - start_x).abs();
            let dy = (y - start_y).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                self.phase = Phase::Dragging;
                log::trace!("drag started on {:?}", self.dragged);
                return true;
            }
        }
        false
    }

    /// Pointer entered `item`. Back over the dragged item itself there is
    /// no target.
    pub fn enter(&mut self, item: K) {
        if !self.is_dragging() {
            return;
        }
        self.target = if item == self.dragged { None } else { Some(item) };
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        if self.is_dragging() {
            self.target = None;
        }
    }

    /// Native drop event on `target`
    pub fn finish_on(mut self, target: K) -> Option<DropAction<K>> {
        self.enter(target);
        self.finish()
    }

    /// Release. Yields an action only for a real drag that ended over a target;
    /// a press without movement is a click and yields `None`.
    pub fn finish(self) -> Option<DropAction<K>> {
        if !self.is_dragging() {
            return None;
        }
        match self.target {
            Some(target) => Some(DropAction {
                dragged: self.dragged,
                target,
            }),
            None => {
                log::trace!("drag on {:?} ended without a target", self.dragged);
                None
            }
        }
    }
}
