//! Widget Layout
//!
//! Ordered list over the closed set of dashboard widgets. Drag indices refer
//! to the rendered list, which leaves out the pinned widget.

use serde::{Serialize, Serializer};

use crate::domain::{find_by_id, position_by_id, DomainError, DomainResult, WidgetConfig, WidgetId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLayout {
    entries: Vec<WidgetConfig>,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self::canonical()
    }
}

impl WidgetLayout {
    /// All widgets visible, in canonical order
    pub fn canonical() -> Self {
        let entries = WidgetId::CANONICAL
            .iter()
            .enumerate()
            .map(|(i, id)| WidgetConfig::new(*id, i as i32))
            .collect();
        Self { entries }
    }

    /// Build from stored entries: sorted by `order`, duplicates dropped,
    /// missing widgets appended visible, orders renormalized.
    pub fn from_entries(mut entries: Vec<WidgetConfig>) -> Self {
        entries.sort_by_key(|w| w.order);

        let mut repaired: Vec<WidgetConfig> = Vec::with_capacity(WidgetId::CANONICAL.len());
        for entry in entries {
            if repaired.iter().any(|w| w.id == entry.id) {
                log::warn!("Dropping duplicate layout entry {}", entry.id.as_str());
                continue;
            }
            repaired.push(entry);
        }
        for id in WidgetId::CANONICAL {
            if !repaired.iter().any(|w| w.id == id) {
                log::warn!("Layout was missing {}, appending it", id.as_str());
                repaired.push(WidgetConfig::new(id, 0));
            }
        }

        let mut layout = Self { entries: repaired };
        layout.reindex();
        layout
    }

    pub fn entries(&self) -> &[WidgetConfig] {
        &self.entries
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetConfig> {
        find_by_id(&self.entries, &id)
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.get(id).map(|w| w.visible).unwrap_or(false)
    }

    /// The widget rendered outside the draggable list
    pub fn pinned(&self) -> Option<&WidgetConfig> {
        self.get(WidgetId::PINNED)
    }

    /// Draggable list in display order; drag indices point into this list
    pub fn draggable(&self) -> Vec<&WidgetConfig> {
        self.entries.iter().filter(|w| w.id != WidgetId::PINNED).collect()
    }

    /// Widgets to draw. Hidden ones stay in place while editing.
    pub fn rendered(&self, edit_mode: bool) -> Vec<&WidgetConfig> {
        self.draggable()
            .into_iter()
            .filter(|w| edit_mode || w.visible)
            .collect()
    }

    /// Flip one widget's visibility. Order is untouched.
    pub fn toggle_visibility(&mut self, id: WidgetId) -> bool {
        match self.entries.iter_mut().find(|w| w.id == id) {
            Some(w) => {
                w.visible = !w.visible;
                w.visible
            }
            None => false,
        }
    }

    /// Move the widget at draggable index `drag` to the slot of the widget at
    /// draggable index `target`, then renormalize orders to 0..n-1.
    pub fn reorder(&mut self, drag: usize, target: usize) -> DomainResult<()> {
        let (dragged_id, target_id) = {
            let draggable = self.draggable();
            let dragged = draggable
                .get(drag)
                .ok_or_else(|| DomainError::NotFound(format!("No widget at index {}", drag)))?;
            let target = draggable
                .get(target)
                .ok_or_else(|| DomainError::NotFound(format!("No widget at index {}", target)))?;
            (dragged.id, target.id)
        };

        let from = self.position(dragged_id)?;
        let to = self.position(target_id)?;
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);

        self.reindex();
        Ok(())
    }

    /// Restore the canonical list, all visible
    pub fn reset(&mut self) {
        *self = Self::canonical();
    }

    fn position(&self, id: WidgetId) -> DomainResult<usize> {
        position_by_id(&self.entries, &id)
            .ok_or_else(|| DomainError::NotFound(format!("Widget {} not in layout", id.as_str())))
    }

    /// Reindex orders to be sequential (0, 1, 2, ...)
    fn reindex(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.order = i as i32;
        }
    }
}

impl Serialize for WidgetLayout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(layout: &WidgetLayout) -> Vec<WidgetId> {
        layout.entries().iter().map(|w| w.id).collect()
    }

    fn orders(layout: &WidgetLayout) -> Vec<i32> {
        layout.entries().iter().map(|w| w.order).collect()
    }

    #[test]
    fn test_canonical_layout() {
        let layout = WidgetLayout::canonical();
        assert_eq!(ids(&layout), WidgetId::CANONICAL.to_vec());
        assert_eq!(orders(&layout), vec![0, 1, 2, 3, 4]);
        assert!(layout.entries().iter().all(|w| w.visible));
        assert_eq!(layout.pinned().map(|w| w.id), Some(WidgetId::Tasks));
    }

    #[test]
    fn test_draggable_skips_pinned() {
        let layout = WidgetLayout::canonical();
        let draggable: Vec<_> = layout.draggable().iter().map(|w| w.id).collect();
        assert_eq!(
            draggable,
            vec![WidgetId::Clock, WidgetId::Search, WidgetId::Categories, WidgetId::Shortcuts]
        );
    }

    #[test]
    fn test_reorder_maps_filtered_indices() {
        let mut layout = WidgetLayout::canonical();
        // draggable[3] = shortcuts onto draggable[1] = search
        layout.reorder(3, 1).unwrap();
        assert_eq!(
            ids(&layout),
            vec![
                WidgetId::Clock,
                WidgetId::Shortcuts,
                WidgetId::Search,
                WidgetId::Tasks,
                WidgetId::Categories
            ]
        );
        assert_eq!(orders(&layout), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reorder_forward_across_pinned() {
        let mut layout = WidgetLayout::canonical();
        // clock onto categories (true index 3)
        layout.reorder(0, 2).unwrap();
        assert_eq!(
            ids(&layout),
            vec![
                WidgetId::Search,
                WidgetId::Tasks,
                WidgetId::Categories,
                WidgetId::Clock,
                WidgetId::Shortcuts
            ]
        );
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut layout = WidgetLayout::canonical();
        let before = layout.clone();
        assert!(layout.reorder(0, 4).is_err());
        assert!(layout.reorder(9, 0).is_err());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_toggles_after_reset_only_touch_visibility() {
        let mut layout = WidgetLayout::canonical();
        layout.reorder(1, 0).unwrap();
        layout.reset();
        let orders_before = orders(&layout);
        let ids_before = ids(&layout);
        for id in [WidgetId::Clock, WidgetId::Tasks, WidgetId::Clock, WidgetId::Search] {
            layout.toggle_visibility(id);
        }
        assert_eq!(orders(&layout), orders_before);
        assert_eq!(ids(&layout), ids_before);
        assert!(layout.is_visible(WidgetId::Clock));
        assert!(!layout.is_visible(WidgetId::Tasks));
        assert!(!layout.is_visible(WidgetId::Search));
    }

    #[test]
    fn test_rendered_hides_invisible_outside_edit_mode() {
        let mut layout = WidgetLayout::canonical();
        layout.toggle_visibility(WidgetId::Search);
        assert_eq!(layout.rendered(false).len(), 3);
        assert_eq!(layout.rendered(true).len(), 4);
    }

    #[test]
    fn test_from_entries_repairs_layout() {
        let stored = vec![
            WidgetConfig { id: WidgetId::Shortcuts, visible: false, order: 10 },
            WidgetConfig { id: WidgetId::Clock, visible: true, order: 2 },
            WidgetConfig { id: WidgetId::Clock, visible: false, order: 7 },
        ];
        let layout = WidgetLayout::from_entries(stored);
        assert_eq!(
            ids(&layout),
            vec![
                WidgetId::Clock,
                WidgetId::Shortcuts,
                WidgetId::Search,
                WidgetId::Tasks,
                WidgetId::Categories
            ]
        );
        assert_eq!(orders(&layout), vec![0, 1, 2, 3, 4]);
        assert!(layout.is_visible(WidgetId::Clock));
        assert!(!layout.is_visible(WidgetId::Shortcuts));
    }
}
