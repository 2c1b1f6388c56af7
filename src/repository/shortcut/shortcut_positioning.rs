//! Shortcut Positioning Operations
//!
//! Ordering of root entries. Order is the array order itself; there is no
//! position field to keep in sync.

use crate::domain::{DomainError, DomainResult, ShortcutId};

use super::shortcut_tree::ShortcutTree;

/// Trait for shortcut positioning operations
pub trait ShortcutPositioningOperations {
    /// Position of a root entry
    fn root_position(&self, id: &ShortcutId) -> Option<usize>;

    /// Take `id` out of the root list and reinsert it at the index `target`
    /// occupied. Returns `(from, to)`.
    fn reorder_root(&mut self, id: &ShortcutId, target: &ShortcutId) -> DomainResult<(usize, usize)>;
}

impl ShortcutPositioningOperations for ShortcutTree {
    fn root_position(&self, id: &ShortcutId) -> Option<usize> {
        self.root_index(id)
    }

    fn reorder_root(&mut self, id: &ShortcutId, target: &ShortcutId) -> DomainResult<(usize, usize)> {
        let from = self
            .root_index(id)
            .ok_or_else(|| DomainError::NotFound(format!("Root shortcut {} not found", id)))?;
        let to = self
            .root_index(target)
            .ok_or_else(|| DomainError::NotFound(format!("Root shortcut {} not found", target)))?;
        if from == to {
            return Ok((from, to));
        }

        let node = self.root.remove(from);
        self.root.insert(to, node);

        self.reindex();
        Ok((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Link, SequentialIds, Shortcut};

    fn tree(ids: &[&str]) -> ShortcutTree {
        let items: Vec<Shortcut> = ids
            .iter()
            .map(|id| Link::new((*id).into(), *id, "x.com", Category::Other).into())
            .collect();
        ShortcutTree::from_shortcuts(items, &mut SequentialIds::default())
    }

    fn order(tree: &ShortcutTree) -> Vec<&str> {
        tree.root().iter().map(|s| s.id().as_str()).collect()
    }

    #[test]
    fn test_move_forward_lands_on_target_index() {
        let mut t = tree(&["a", "b", "c", "d"]);
        assert_eq!(t.reorder_root(&"a".into(), &"c".into()).unwrap(), (0, 2));
        assert_eq!(order(&t), vec!["b", "c", "a", "d"]);
        assert_eq!(t.root_position(&"a".into()), Some(2));
    }

    #[test]
    fn test_move_backward_lands_on_target_index() {
        let mut t = tree(&["a", "b", "c", "d"]);
        t.reorder_root(&"d".into(), &"b".into()).unwrap();
        assert_eq!(order(&t), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_unknown_ids_leave_order() {
        let mut t = tree(&["a", "b"]);
        assert!(t.reorder_root(&"a".into(), &"zz".into()).unwrap_err().is_not_found());
        assert!(t.reorder_root(&"zz".into(), &"a".into()).is_err());
        assert_eq!(order(&t), vec!["a", "b"]);
    }
}
