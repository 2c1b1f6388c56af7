//! Shortcut Store Module
//!
//! Shortcut collection split into specialized sub-modules:
//! - shortcut_tree: the store, id index and add/update/delete
//! - shortcut_hierarchy: moving links into folders
//! - shortcut_positioning: root ordering
//! - shortcut_drop: drag-and-drop outcomes

mod shortcut_drop;
mod shortcut_hierarchy;
mod shortcut_positioning;
mod shortcut_tree;

pub use shortcut_drop::DropOutcome;
pub use shortcut_tree::{Location, NodeRef, ShortcutTree};

// Re-export operation traits so they can be used alongside ShortcutTree
pub use shortcut_hierarchy::ShortcutHierarchyOperations;
pub use shortcut_positioning::ShortcutPositioningOperations;
