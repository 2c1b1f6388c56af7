//! Shortcut Drop Handling
//!
//! Turns a finished drag (dragged id onto target id) into a tree change.
//! Only root entries take part: dropping onto a folder moves the link into
//! it, dropping onto a link reorders the root list. Links cannot be dragged
//! back out of a folder, nor reordered inside one.

use crate::domain::{DomainError, DomainResult, ShortcutId};

use super::shortcut_hierarchy::ShortcutHierarchyOperations;
use super::shortcut_positioning::ShortcutPositioningOperations;
use super::shortcut_tree::ShortcutTree;

/// What a drop did to the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped onto itself
    Unchanged,
    /// Root entry moved from one index to another
    Reordered { from: usize, to: usize },
    /// Root link became the last child of `folder`
    MovedIntoFolder { folder: ShortcutId },
}

impl ShortcutTree {
    /// Apply a drop of `dragged` onto `target`. Errors leave the tree as it was.
    pub fn apply_drop(&mut self, dragged: &ShortcutId, target: &ShortcutId) -> DomainResult<DropOutcome> {
        if dragged == target {
            return Ok(DropOutcome::Unchanged);
        }
        if self.root_position(dragged).is_none() {
            return Err(DomainError::NotFound(format!("Root shortcut {} not found", dragged)));
        }
        let target_is_folder = match self.root_position(target) {
            Some(i) => self.root()[i].is_folder(),
            None => return Err(DomainError::NotFound(format!("Root shortcut {} not found", target))),
        };

        if target_is_folder {
            self.move_into_folder(dragged, target)?;
            return Ok(DropOutcome::MovedIntoFolder { folder: target.clone() });
        }

        let (from, to) = self.reorder_root(dragged, target)?;
        Ok(DropOutcome::Reordered { from, to })
    }
}
