//! Shortcut Hierarchy Operations
//!
//! Moving links between the root list and folders.

use crate::domain::{DomainError, DomainResult, Shortcut, ShortcutId};

use super::shortcut_tree::{Location, ShortcutTree};

/// Trait for shortcut hierarchy operations
pub trait ShortcutHierarchyOperations {
    /// Folder holding `id`, `None` for root entries and unknown ids
    fn parent_of(&self, id: &ShortcutId) -> Option<&ShortcutId>;

    /// Move a root link to the end of a root folder's children
    fn move_into_folder(&mut self, id: &ShortcutId, folder_id: &ShortcutId) -> DomainResult<()>;
}

impl ShortcutHierarchyOperations for ShortcutTree {
    fn parent_of(&self, id: &ShortcutId) -> Option<&ShortcutId> {
        match self.location(id)? {
            Location::Child { folder, .. } => Some(folder),
            Location::Root(_) => None,
        }
    }

    fn move_into_folder(&mut self, id: &ShortcutId, folder_id: &ShortcutId) -> DomainResult<()> {
        if id == folder_id {
            return Err(DomainError::InvalidInput(format!("Cannot move {} into itself", id)));
        }
        let from = self
            .root_index(id)
            .ok_or_else(|| DomainError::NotFound(format!("Root shortcut {} not found", id)))?;
        let folder_at = self
            .root_index(folder_id)
            .ok_or_else(|| DomainError::NotFound(format!("Folder {} not found", folder_id)))?;

        if !self.root[folder_at].is_folder() {
            return Err(DomainError::InvalidInput(format!("{} is not a folder", folder_id)));
        }
        if self.root[from].is_folder() {
            return Err(DomainError::Conflict(format!(
                "Folder {} cannot be placed inside folder {}",
                id, folder_id
            )));
        }

        let link = match self.root.remove(from) {
            Shortcut::Link(link) => link,
            Shortcut::Folder(_) => {
                return Err(DomainError::Internal(format!("{} changed kind during move", id)))
            }
        };
        // Removal shifts the folder left when it came after the link
        let folder_at = if folder_at > from { folder_at - 1 } else { folder_at };
        if let Shortcut::Folder(folder) = &mut self.root[folder_at] {
            folder.children.push(link);
        }

        self.reindex();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Folder, Link, SequentialIds};

    fn sample() -> ShortcutTree {
        let mut f = Folder::new("F".into(), "Folder");
        f.children.push(Link::new("b".into(), "B", "b.com", Category::Other));
        let items = vec![
            Link::new("a".into(), "A", "a.com", Category::Other).into(),
            Shortcut::Folder(f),
            Link::new("d".into(), "D", "d.com", Category::Other).into(),
            Shortcut::Folder(Folder::new("G".into(), "Other folder")),
        ];
        ShortcutTree::from_shortcuts(items, &mut SequentialIds::default())
    }

    #[test]
    fn test_move_before_and_after_folder() {
        let mut tree = sample();
        tree.move_into_folder(&"a".into(), &"F".into()).unwrap();
        tree.move_into_folder(&"d".into(), &"F".into()).unwrap();
        let ids: Vec<_> = tree.folder(&"F".into()).unwrap().children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "d"]);
        assert_eq!(tree.root().len(), 2);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.parent_of(&"d".into()), Some(&"F".into()));
    }

    #[test]
    fn test_rejected_moves_leave_tree_unchanged() {
        let mut tree = sample();
        let before = tree.clone();
        assert!(tree.move_into_folder(&"G".into(), &"F".into()).is_err());
        assert!(tree.move_into_folder(&"a".into(), &"d".into()).is_err());
        assert!(tree.move_into_folder(&"b".into(), &"G".into()).is_err());
        assert!(tree.move_into_folder(&"x".into(), &"F".into()).is_err());
        assert_eq!(tree, before);
    }
}
