//! Widget Entity
//!
//! The fixed set of dashboard panels. Identities never change; only
//! visibility and order do.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetId {
    Clock,
    Search,
    Tasks,
    Categories,
    Shortcuts,
}

impl WidgetId {
    /// Canonical order restored by a layout reset
    pub const CANONICAL: [WidgetId; 5] = [
        WidgetId::Clock,
        WidgetId::Search,
        WidgetId::Tasks,
        WidgetId::Categories,
        WidgetId::Shortcuts,
    ];

    /// Rendered on its own, outside the draggable list
    pub const PINNED: WidgetId = WidgetId::Tasks;

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetId::Clock => "clock",
            WidgetId::Search => "search",
            WidgetId::Tasks => "tasks",
            WidgetId::Categories => "categories",
            WidgetId::Shortcuts => "shortcuts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetId::Clock => "Clock & Date",
            WidgetId::Search => "Search Bar",
            WidgetId::Tasks => "Tasks",
            WidgetId::Categories => "Category & Profile Filters",
            WidgetId::Shortcuts => "Shortcut Grid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub id: WidgetId,
    pub visible: bool,
    pub order: i32,
}

impl WidgetConfig {
    pub fn new(id: WidgetId, order: i32) -> Self {
        Self { id, visible: true, order }
    }
}

impl Entity for WidgetConfig {
    type Id = WidgetId;

    fn id(&self) -> &WidgetId {
        &self.id
    }
}
