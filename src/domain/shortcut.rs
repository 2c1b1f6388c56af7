//! Shortcut Entity
//!
//! A shortcut is either a navigable link or a folder of links. Folders hold
//! `Link`s only, so nesting deeper than one level cannot be expressed.
//!
//! On disk shortcuts keep the flat record shape (`isFolder`, `children`), see
//! [`ShortcutRecord`].

use serde::{Deserialize, Serialize};

use super::entity::{find_by_id, position_by_id, DomainError, DomainResult, Entity};
use super::ids::{ProfileId, ShortcutId};
use super::profile::Profile;

/// Fixed set of shortcut categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "Sosyal")]
    Social,
    #[serde(alias = "İş")]
    Work,
    #[serde(alias = "Geliştirme")]
    Dev,
    #[serde(alias = "Eğlence")]
    Entertainment,
    #[serde(alias = "Alışveriş")]
    Shopping,
    #[serde(alias = "Uygulamalar")]
    Apps,
    #[default]
    #[serde(alias = "Diğer")]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Social,
        Category::Work,
        Category::Dev,
        Category::Entertainment,
        Category::Shopping,
        Category::Apps,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Social => "social",
            Category::Work => "work",
            Category::Dev => "dev",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Apps => "apps",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Social => "Social",
            Category::Work => "Work",
            Category::Dev => "Development",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Apps => "Apps",
            Category::Other => "Other",
        }
    }
}

/// How a shortcut tile is drawn
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Icon {
    /// Site favicon derived from the URL
    #[default]
    Favicon,
    /// User-supplied image URL
    Image(String),
}

/// A navigable tile
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: ShortcutId,
    pub title: String,
    /// Raw, unnormalized destination
    pub url: String,
    pub category: Category,
    pub icon: Icon,
    pub profiles: Vec<Profile>,
    pub default_profile_id: Option<ProfileId>,
}

impl Link {
    pub fn new(id: ShortcutId, title: impl Into<String>, url: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            category,
            icon: Icon::Favicon,
            profiles: Vec::new(),
            default_profile_id: None,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&Profile> {
        find_by_id(&self.profiles, id)
    }

    pub fn profile_named(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// The profile `default_profile_id` points at, if it still exists
    pub fn default_profile(&self) -> Option<&Profile> {
        self.default_profile_id.as_ref().and_then(|id| self.profile(id))
    }

    pub fn add_profile(&mut self, profile: Profile) -> DomainResult<()> {
        if self.profile(&profile.id).is_some() {
            return Err(DomainError::Conflict(format!(
                "Profile {} already exists on {}",
                profile.id, self.id
            )));
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Replace a profile in place, keeping its position
    pub fn update_profile(&mut self, updated: Profile) -> DomainResult<()> {
        let pos = position_by_id(&self.profiles, &updated.id)
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", updated.id)))?;
        self.profiles[pos] = updated;
        Ok(())
    }

    /// Remove a profile; a default pointing at it is cleared
    pub fn remove_profile(&mut self, id: &ProfileId) -> DomainResult<Profile> {
        let pos = position_by_id(&self.profiles, id)
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", id)))?;
        if self.default_profile_id.as_ref() == Some(id) {
            self.default_profile_id = None;
        }
        Ok(self.profiles.remove(pos))
    }

    /// Make `id` the default, or clear the default if it already is.
    /// Returns the new default.
    pub fn toggle_default_profile(&mut self, id: &ProfileId) -> DomainResult<Option<ProfileId>> {
        if self.profile(id).is_none() {
            return Err(DomainError::NotFound(format!("Profile {} not found", id)));
        }
        self.default_profile_id = if self.default_profile_id.as_ref() == Some(id) {
            None
        } else {
            Some(id.clone())
        };
        Ok(self.default_profile_id.clone())
    }

    /// Drop a default that no longer references one of our profiles.
    /// Returns true if something was cleared.
    pub fn clear_dangling_default(&mut self) -> bool {
        if self.default_profile_id.is_some() && self.default_profile().is_none() {
            self.default_profile_id = None;
            return true;
        }
        false
    }
}

/// A single-level group of links
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub id: ShortcutId,
    pub title: String,
    pub category: Category,
    pub icon: Icon,
    pub children: Vec<Link>,
}

impl Folder {
    pub fn new(id: ShortcutId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category: Category::Other,
            icon: Icon::Favicon,
            children: Vec::new(),
        }
    }

    pub fn child(&self, id: &ShortcutId) -> Option<&Link> {
        self.children.iter().find(|c| &c.id == id)
    }
}

/// A node of the shortcut collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ShortcutRecord", into = "ShortcutRecord")]
pub enum Shortcut {
    Link(Link),
    Folder(Folder),
}

impl Shortcut {
    pub fn id(&self) -> &ShortcutId {
        match self {
            Shortcut::Link(l) => &l.id,
            Shortcut::Folder(f) => &f.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Shortcut::Link(l) => &l.title,
            Shortcut::Folder(f) => &f.title,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Shortcut::Link(l) => l.category,
            Shortcut::Folder(f) => f.category,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Shortcut::Folder(_))
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Shortcut::Link(l) => Some(l),
            Shortcut::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Shortcut::Folder(f) => Some(f),
            Shortcut::Link(_) => None,
        }
    }

    /// Profiles of a link; folders have none
    pub fn profiles(&self) -> &[Profile] {
        match self {
            Shortcut::Link(l) => &l.profiles,
            Shortcut::Folder(_) => &[],
        }
    }

    /// Number of nodes this entry accounts for (a folder counts its children)
    pub fn node_count(&self) -> usize {
        match self {
            Shortcut::Link(_) => 1,
            Shortcut::Folder(f) => 1 + f.children.len(),
        }
    }

    /// This node's id followed by the ids of its children
    pub fn ids(&self) -> Vec<&ShortcutId> {
        match self {
            Shortcut::Link(l) => vec![&l.id],
            Shortcut::Folder(f) => std::iter::once(&f.id)
                .chain(f.children.iter().map(|c| &c.id))
                .collect(),
        }
    }
}

impl Entity for Shortcut {
    type Id = ShortcutId;

    fn id(&self) -> &ShortcutId {
        Shortcut::id(self)
    }
}

impl From<Link> for Shortcut {
    fn from(link: Link) -> Self {
        Shortcut::Link(link)
    }
}

impl From<Folder> for Shortcut {
    fn from(folder: Folder) -> Self {
        Shortcut::Folder(folder)
    }
}

/// Data for a shortcut that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutPayload {
    pub title: String,
    pub url: String,
    pub category: Category,
    pub icon: Icon,
    pub profiles: Vec<Profile>,
    pub default_profile_id: Option<ProfileId>,
    pub is_folder: bool,
}

impl ShortcutPayload {
    pub fn link(title: impl Into<String>, url: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            category,
            icon: Icon::Favicon,
            profiles: Vec::new(),
            default_profile_id: None,
            is_folder: false,
        }
    }

    /// Folders start empty, without a URL, in the "other" category
    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            is_folder: true,
            ..Self::link(title, "", Category::Other)
        }
    }

    pub fn into_shortcut(self, id: ShortcutId) -> Shortcut {
        if self.is_folder {
            return Shortcut::Folder(Folder {
                id,
                title: self.title,
                category: self.category,
                icon: self.icon,
                children: Vec::new(),
            });
        }
        let mut link = Link {
            id,
            title: self.title,
            url: self.url,
            category: self.category,
            icon: self.icon,
            profiles: self.profiles,
            default_profile_id: self.default_profile_id,
        };
        link.clear_dangling_default();
        Shortcut::Link(link)
    }
}

// ========================
// Wire format
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Favicon,
    #[serde(rename = "custom-image", alias = "image")]
    Image,
    /// Legacy icon-font tiles, drawn as favicons
    Lucide,
}

/// Flat persisted shape of a shortcut node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRecord {
    pub id: ShortcutId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<IconKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile_id: Option<ProfileId>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_folder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ShortcutRecord>>,
}

fn icon_from_record(kind: Option<IconKind>, value: Option<String>) -> Icon {
    match (kind, value) {
        (Some(IconKind::Image), Some(v)) if !v.trim().is_empty() => Icon::Image(v),
        _ => Icon::Favicon,
    }
}

fn link_from_record(r: ShortcutRecord) -> Link {
    let mut link = Link {
        id: r.id,
        title: r.title,
        url: r.url,
        category: r.category,
        icon: icon_from_record(r.icon_type, r.icon_value),
        profiles: r.profiles,
        default_profile_id: r.default_profile_id,
    };
    if link.clear_dangling_default() {
        log::warn!("Cleared dangling default profile on shortcut {}", link.id);
    }
    link
}

/// Flatten a folder's child records into links. A nested folder node is
/// dropped and its own children are hoisted in its place.
fn links_from_records(records: Vec<ShortcutRecord>, out: &mut Vec<Link>) {
    for mut r in records {
        if r.is_folder {
            log::warn!("Flattening nested folder {} into its parent", r.id);
            links_from_records(r.children.take().unwrap_or_default(), out);
        } else {
            out.push(link_from_record(r));
        }
    }
}

impl From<ShortcutRecord> for Shortcut {
    fn from(mut r: ShortcutRecord) -> Self {
        if r.is_folder {
            let mut children = Vec::new();
            links_from_records(r.children.take().unwrap_or_default(), &mut children);
            return Shortcut::Folder(Folder {
                id: r.id,
                title: r.title,
                category: r.category,
                icon: icon_from_record(r.icon_type, r.icon_value),
                children,
            });
        }
        Shortcut::Link(link_from_record(r))
    }
}

fn icon_to_record(icon: Icon) -> (Option<IconKind>, Option<String>) {
    match icon {
        Icon::Favicon => (Some(IconKind::Favicon), None),
        Icon::Image(v) => (Some(IconKind::Image), Some(v)),
    }
}

impl From<Link> for ShortcutRecord {
    fn from(l: Link) -> Self {
        let (icon_type, icon_value) = icon_to_record(l.icon);
        Self {
            id: l.id,
            title: l.title,
            url: l.url,
            category: l.category,
            icon_type,
            icon_value,
            profiles: l.profiles,
            default_profile_id: l.default_profile_id,
            is_folder: false,
            children: None,
        }
    }
}

impl From<Shortcut> for ShortcutRecord {
    fn from(s: Shortcut) -> Self {
        match s {
            Shortcut::Link(l) => l.into(),
            Shortcut::Folder(f) => {
                let (icon_type, icon_value) = icon_to_record(f.icon);
                Self {
                    id: f.id,
                    title: f.title,
                    url: String::new(),
                    category: f.category,
                    icon_type,
                    icon_value,
                    profiles: Vec::new(),
                    default_profile_id: None,
                    is_folder: true,
                    children: Some(f.children.into_iter().map(Into::into).collect()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmail() -> Link {
        Link::new("1".into(), "Gmail", "mail.google.com", Category::Work)
            .with_profile(Profile::new("p1".into(), "Work").with_url("w@x.com"))
            .with_profile(Profile::new("p2".into(), "Home"))
    }

    #[test]
    fn test_remove_profile_clears_default() {
        let mut link = gmail();
        link.default_profile_id = Some("p1".into());
        link.remove_profile(&"p1".into()).unwrap();
        assert_eq!(link.default_profile_id, None);
        assert_eq!(link.profiles.len(), 1);
    }

    #[test]
    fn test_remove_other_profile_keeps_default() {
        let mut link = gmail();
        link.default_profile_id = Some("p1".into());
        link.remove_profile(&"p2".into()).unwrap();
        assert_eq!(link.default_profile_id, Some("p1".into()));
    }

    #[test]
    fn test_toggle_default_profile() {
        let mut link = gmail();
        assert_eq!(link.toggle_default_profile(&"p2".into()).unwrap(), Some("p2".into()));
        assert_eq!(link.toggle_default_profile(&"p2".into()).unwrap(), None);
        assert!(link.toggle_default_profile(&"nope".into()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_duplicate_profile_conflicts() {
        let mut link = gmail();
        let err = link.add_profile(Profile::new("p1".into(), "Again")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_update_profile_keeps_position() {
        let mut link = gmail();
        link.update_profile(Profile::new("p1".into(), "Office")).unwrap();
        assert_eq!(link.profiles[0].name, "Office");
        assert_eq!(link.profiles[1].name, "Home");
    }

    #[test]
    fn test_record_shape_round_trips_through_json() {
        let mut folder = Folder::new("f".into(), "Work stuff");
        folder.children.push(gmail());
        let json = serde_json::to_value(Shortcut::Folder(folder.clone())).unwrap();
        assert_eq!(json["isFolder"], true);
        assert_eq!(json["children"][0]["profiles"][0]["url"], "w@x.com");
        let back: Shortcut = serde_json::from_value(json).unwrap();
        assert_eq!(back, Shortcut::Folder(folder));
    }

    #[test]
    fn test_nested_folder_records_are_flattened() {
        let json = serde_json::json!({
            "id": "f", "title": "Outer", "url": "", "category": "other", "isFolder": true,
            "children": [
                { "id": "a", "title": "A", "url": "a.com", "category": "dev" },
                { "id": "g", "title": "Inner", "url": "", "category": "other", "isFolder": true,
                  "children": [ { "id": "b", "title": "B", "url": "b.com", "category": "dev" } ] }
            ]
        });
        let s: Shortcut = serde_json::from_value(json).unwrap();
        let folder = s.as_folder().unwrap();
        let ids: Vec<_> = folder.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_legacy_record_values() {
        let json = serde_json::json!({
            "id": "1", "title": "X", "url": "x.com", "category": "Eğlence",
            "iconType": "lucide", "defaultProfileId": "gone"
        });
        let s: Shortcut = serde_json::from_value(json).unwrap();
        let link = s.as_link().unwrap();
        assert_eq!(link.category, Category::Entertainment);
        assert_eq!(link.icon, Icon::Favicon);
        assert_eq!(link.default_profile_id, None);
    }

    #[test]
    fn test_folder_payload_is_empty_folder() {
        let s = ShortcutPayload::folder("Later").into_shortcut("f1".into());
        let folder = s.as_folder().unwrap();
        assert!(folder.children.is_empty());
        assert_eq!(folder.category, Category::Other);
    }
}
