//! Repository Layer
//!
//! In-memory stores (shortcut tree, widget layout) and the persistence
//! abstractions they are saved through.

mod json_store;
mod shortcut;
mod state_repo;
mod traits;
mod widget_layout;


pub use json_store::JsonFileStorage;
pub use shortcut::{
    DropOutcome, Location, NodeRef, ShortcutHierarchyOperations, ShortcutPositioningOperations,
    ShortcutTree,
};
pub use state_repo::{
    default_shortcuts, StateRepository, BACKGROUND_KEY, CLOCK_KEY, LAYOUT_KEY, SHORTCUTS_KEY,
    VIEW_STATE_KEY,
};
pub use traits::{MemoryStorage, Storage, StorageError, StorageResult};
pub use widget_layout::WidgetLayout;
