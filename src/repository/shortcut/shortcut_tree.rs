//! Shortcut Tree Store
//!
//! Owns the shortcut collection: a root list whose entries are links or
//! folders of links. Every node is addressable by id through an auxiliary
//! id → [`Location`] index that is rebuilt after each mutation, so callers
//! never need to know at which depth an id lives.

use std::collections::{HashMap, HashSet};

use serde::{Serialize, Serializer};

use crate::domain::{
    DomainError, DomainResult, Folder, IdGenerator, Link, Shortcut, ShortcutId, ShortcutPayload,
};

/// Where a node sits in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Index into the root list
    Root(usize),
    /// Index into the children of a root folder
    Child { folder: ShortcutId, index: usize },
}

impl Location {
    pub fn is_root(&self) -> bool {
        matches!(self, Location::Root(_))
    }
}

/// Borrowed view of a node at any depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Link(&'a Link),
    Folder(&'a Folder),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a ShortcutId {
        match self {
            NodeRef::Link(l) => &l.id,
            NodeRef::Folder(f) => &f.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            NodeRef::Link(l) => &l.title,
            NodeRef::Folder(f) => &f.title,
        }
    }

    pub fn as_link(&self) -> Option<&'a Link> {
        match self {
            NodeRef::Link(l) => Some(l),
            NodeRef::Folder(_) => None,
        }
    }

    pub fn to_shortcut(&self) -> Shortcut {
        match self {
            NodeRef::Link(l) => Shortcut::Link((*l).clone()),
            NodeRef::Folder(f) => Shortcut::Folder((*f).clone()),
        }
    }
}

impl<'a> From<&'a Shortcut> for NodeRef<'a> {
    fn from(s: &'a Shortcut) -> Self {
        match s {
            Shortcut::Link(l) => NodeRef::Link(l),
            Shortcut::Folder(f) => NodeRef::Folder(f),
        }
    }
}

/// The shortcut collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutTree {
    pub(super) root: Vec<Shortcut>,
    index: HashMap<ShortcutId, Location>,
}

impl ShortcutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from stored nodes. Ids seen earlier in depth-first order
    /// win; later duplicates get fresh ids from `ids`.
    pub fn from_shortcuts(items: Vec<Shortcut>, ids: &mut dyn IdGenerator) -> Self {
        let mut seen: HashSet<ShortcutId> = items
            .iter()
            .flat_map(|s| s.ids().into_iter().cloned())
            .collect();
        let mut claimed = HashSet::new();
        let mut claim = |id: &mut ShortcutId, seen: &mut HashSet<ShortcutId>| {
            if !claimed.insert(id.clone()) {
                let fresh = fresh_id(&mut *ids, |candidate| seen.contains(candidate));
                log::warn!("Duplicate shortcut id {}, reassigned to {}", id, fresh);
                seen.insert(fresh.clone());
                claimed.insert(fresh.clone());
                *id = fresh;
            }
        };

        let mut root = items;
        for node in root.iter_mut() {
            match node {
                Shortcut::Link(l) => claim(&mut l.id, &mut seen),
                Shortcut::Folder(f) => {
                    claim(&mut f.id, &mut seen);
                    for child in f.children.iter_mut() {
                        claim(&mut child.id, &mut seen);
                    }
                }
            }
        }

        let mut tree = Self {
            root,
            index: HashMap::new(),
        };
        tree.reindex();
        tree
    }

    /// Root entries in display order
    pub fn root(&self) -> &[Shortcut] {
        &self.root
    }

    pub fn into_shortcuts(self) -> Vec<Shortcut> {
        self.root
    }

    /// Number of nodes at all depths
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn contains(&self, id: &ShortcutId) -> bool {
        self.index.contains_key(id)
    }

    pub fn location(&self, id: &ShortcutId) -> Option<&Location> {
        self.index.get(id)
    }

    /// Index of `id` in the root list, `None` when absent or nested
    pub(super) fn root_index(&self, id: &ShortcutId) -> Option<usize> {
        match self.index.get(id)? {
            Location::Root(i) => Some(*i),
            Location::Child { .. } => None,
        }
    }

    pub fn get(&self, id: &ShortcutId) -> Option<NodeRef<'_>> {
        match self.index.get(id)? {
            Location::Root(i) => self.root.get(*i).map(NodeRef::from),
            Location::Child { folder, index } => {
                let folder = self.folder(folder)?;
                folder.children.get(*index).map(NodeRef::Link)
            }
        }
    }

    pub fn link(&self, id: &ShortcutId) -> Option<&Link> {
        self.get(id)?.as_link()
    }

    pub fn folder(&self, id: &ShortcutId) -> Option<&Folder> {
        let i = self.root_index(id)?;
        self.root.get(i)?.as_folder()
    }

    /// All nodes, depth-first: each root entry followed by its children
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.root.iter().flat_map(|s| {
            let children: &[Link] = match s {
                Shortcut::Folder(f) => &f.children,
                Shortcut::Link(_) => &[],
            };
            std::iter::once(NodeRef::from(s)).chain(children.iter().map(NodeRef::Link))
        })
    }

    /// Add new shortcuts with fresh ids, in call order.
    ///
    /// With `target_folder` naming an existing folder the items become its last
    /// children, otherwise they are appended to the root. Folder payloads
    /// aimed at a folder are skipped. Returns the ids that were added.
    pub fn add(
        &mut self,
        items: Vec<ShortcutPayload>,
        target_folder: Option<&ShortcutId>,
        ids: &mut dyn IdGenerator,
    ) -> Vec<ShortcutId> {
        let folder_index = target_folder.and_then(|fid| {
            let i = self.root_index(fid)?;
            self.root[i].is_folder().then_some(i)
        });
        if let (Some(fid), None) = (target_folder, folder_index) {
            log::debug!("Folder {} not found, adding to root", fid);
        }

        let mut added = Vec::with_capacity(items.len());
        for payload in items {
            if folder_index.is_some() && payload.is_folder {
                log::warn!("Skipping folder {:?}: folders cannot be nested", payload.title);
                continue;
            }
            let id = fresh_id(ids, |candidate| {
                self.index.contains_key(candidate) || added.contains(candidate)
            });
            let node = payload.into_shortcut(id.clone());
            match (folder_index, node) {
                (Some(i), Shortcut::Link(link)) => {
                    if let Shortcut::Folder(folder) = &mut self.root[i] {
                        folder.children.push(link);
                    }
                }
                (_, node) => self.root.push(node),
            }
            added.push(id);
        }

        self.reindex();
        added
    }

    /// Replace the node with the same id, keeping its position.
    ///
    /// Rejected without change when the id is unknown, when a folder would
    /// replace a folder child, or when the replacement carries ids already
    /// used elsewhere in the tree.
    pub fn update(&mut self, updated: Shortcut) -> DomainResult<()> {
        let id = updated.id().clone();
        let location = self
            .index
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Shortcut {} not found", id)))?;

        // Ids owned by the node being replaced may be reused by the replacement
        let replaced: HashSet<&ShortcutId> = match self.get(&id) {
            Some(NodeRef::Folder(f)) => std::iter::once(&f.id)
                .chain(f.children.iter().map(|c| &c.id))
                .collect(),
            _ => std::iter::once(&id).collect(),
        };
        let mut incoming = HashSet::new();
        for nested in updated.ids() {
            if !incoming.insert(nested) || (self.index.contains_key(nested) && !replaced.contains(nested)) {
                return Err(DomainError::Conflict(format!(
                    "Shortcut id {} is already in use",
                    nested
                )));
            }
        }

        match (location, updated) {
            (Location::Root(i), mut node) => {
                match &mut node {
                    Shortcut::Link(link) => {
                        link.clear_dangling_default();
                    }
                    Shortcut::Folder(f) => {
                        for child in f.children.iter_mut() {
                            child.clear_dangling_default();
                        }
                    }
                }
                self.root[i] = node;
            }
            (Location::Child { folder, index }, Shortcut::Link(mut link)) => {
                link.clear_dangling_default();
                let fi = self
                    .root_index(&folder)
                    .ok_or_else(|| DomainError::Internal(format!("Folder {} not indexed", folder)))?;
                if let Shortcut::Folder(f) = &mut self.root[fi] {
                    f.children[index] = link;
                }
            }
            (Location::Child { .. }, Shortcut::Folder(_)) => {
                return Err(DomainError::InvalidInput(format!(
                    "Shortcut {} is inside a folder and cannot become a folder",
                    id
                )));
            }
        }

        self.reindex();
        Ok(())
    }

    /// Edit a link in place, wherever it lives. The link keeps its id.
    pub fn update_link<R>(
        &mut self,
        id: &ShortcutId,
        edit: impl FnOnce(&mut Link) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let location = self
            .index
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Shortcut {} not found", id)))?;
        let link = match location {
            Location::Root(i) => match &mut self.root[i] {
                Shortcut::Link(l) => l,
                Shortcut::Folder(_) => {
                    return Err(DomainError::InvalidInput(format!("Shortcut {} is a folder", id)))
                }
            },
            Location::Child { folder, index } => {
                let fi = self
                    .root_index(&folder)
                    .ok_or_else(|| DomainError::Internal(format!("Folder {} not indexed", folder)))?;
                match &mut self.root[fi] {
                    Shortcut::Folder(f) => &mut f.children[index],
                    Shortcut::Link(_) => {
                        return Err(DomainError::Internal(format!("{} is not a folder", folder)))
                    }
                }
            }
        };

        let result = edit(&mut *link);
        link.id = id.clone();
        link.clear_dangling_default();
        result
    }

    /// Remove a node wherever it is. Removing a folder discards its children.
    pub fn delete(&mut self, id: &ShortcutId) -> DomainResult<Shortcut> {
        let location = self
            .index
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Shortcut {} not found", id)))?;

        let removed = match location {
            Location::Root(i) => self.root.remove(i),
            Location::Child { folder, index } => {
                let fi = self
                    .root_index(&folder)
                    .ok_or_else(|| DomainError::Internal(format!("Folder {} not indexed", folder)))?;
                match &mut self.root[fi] {
                    Shortcut::Folder(f) => Shortcut::Link(f.children.remove(index)),
                    Shortcut::Link(_) => {
                        return Err(DomainError::Internal(format!("{} is not a folder", folder)))
                    }
                }
            }
        };

        self.reindex();
        Ok(removed)
    }

    /// Rebuild the id → location index from the current layout
    pub(super) fn reindex(&mut self) {
        self.index.clear();
        for (i, node) in self.root.iter().enumerate() {
            self.index.insert(node.id().clone(), Location::Root(i));
            if let Shortcut::Folder(f) = node {
                for (ci, child) in f.children.iter().enumerate() {
                    self.index.insert(
                        child.id.clone(),
                        Location::Child {
                            folder: f.id.clone(),
                            index: ci,
                        },
                    );
                }
            }
        }
    }
}

impl Serialize for ShortcutTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// Draw ids until one is not taken
fn fresh_id(ids: &mut dyn IdGenerator, taken: impl Fn(&ShortcutId) -> bool) -> ShortcutId {
    loop {
        let id = ids.shortcut_id();
        if !taken(&id) {
            return id;
        }
    }
}
