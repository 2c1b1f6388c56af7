//! Tree Utilities
//!
//! Read-only derivations the view layer renders from a tree snapshot.

use std::collections::{BTreeSet, HashSet};

use url::Url;

use crate::domain::{
    normalize, resolve_link_target, CategoryFilter, Folder, Link, ProfileFilter, Shortcut,
    ViewState,
};
use crate::repository::ShortcutTree;

/// Tiles shown inside a closed folder
pub const FOLDER_PREVIEW_LEN: usize = 4;

/// Badge color for suggested profiles that never picked one
pub const DEFAULT_AVATAR_COLOR: &str = "bg-red-500";

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE: u32 = 128;

/// Root nodes passing both view filters. A profile filter keeps only nodes
/// carrying a profile with that name, so folders drop out.
pub fn visible_shortcuts<'a>(tree: &'a ShortcutTree, view: &ViewState) -> Vec<&'a Shortcut> {
    tree.root()
        .iter()
        .filter(|s| view.category.matches(s.category()))
        .filter(|s| match &view.profile {
            ProfileFilter::All => true,
            ProfileFilter::Named(name) => s.profiles().iter().any(|p| &p.name == name),
        })
        .collect()
}

/// "All" followed by each root category in first-seen order
pub fn active_categories(tree: &ShortcutTree) -> Vec<CategoryFilter> {
    let mut seen = HashSet::new();
    let mut categories = vec![CategoryFilter::All];
    for s in tree.root() {
        if seen.insert(s.category()) {
            categories.push(CategoryFilter::Only(s.category()));
        }
    }
    categories
}

/// Distinct profile names across root shortcuts, sorted
pub fn profile_names(tree: &ShortcutTree) -> Vec<String> {
    tree.root()
        .iter()
        .flat_map(|s| s.profiles())
        .map(|p| p.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A profile seen on some shortcut, offered when adding one to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSuggestion {
    pub name: String,
    pub color: String,
    pub url: Option<String>,
}

/// First occurrence of each named profile anywhere in the tree
pub fn profile_suggestions(tree: &ShortcutTree) -> Vec<ProfileSuggestion> {
    let mut seen = HashSet::new();
    tree.iter()
        .filter_map(|node| node.as_link())
        .flat_map(|link| link.profiles.iter())
        .filter(|p| !p.name.is_empty() && seen.insert(p.name.clone()))
        .map(|p| ProfileSuggestion {
            name: p.name.clone(),
            color: p
                .avatar_color
                .clone()
                .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
            url: p.url.clone(),
        })
        .collect()
}

pub fn folder_preview(folder: &Folder) -> &[Link] {
    let len = folder.children.len().min(FOLDER_PREVIEW_LEN);
    &folder.children[..len]
}

/// Favicon service URL for the host of `url`, `None` when it has no host
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = Url::parse(&normalize(url)).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}?domain={}&sz={}", FAVICON_SERVICE, host, FAVICON_SIZE))
}

/// Favicon of the destination a click would open. Mail targets use the
/// shortcut's own site instead.
pub fn link_favicon(link: &Link, filter: &ProfileFilter) -> Option<String> {
    let target = resolve_link_target(link, filter);
    if target.starts_with("mailto:") {
        return favicon_url(&link.url);
    }
    favicon_url(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Profile, SequentialIds};

    fn tree() -> ShortcutTree {
        let mut folder = Folder::new("f".into(), "Docs");
        for i in 0..6 {
            folder.children.push(
                Link::new(format!("c{}", i).as_str().into(), "Child", "child.com", Category::Work)
                    .with_profile(Profile::new("cp".into(), "School").with_url("s.edu")),
            );
        }
        let items = vec![
            Shortcut::Link(
                Link::new("1".into(), "Gmail", "mail.google.com", Category::Work)
                    .with_profile(Profile::new("p1".into(), "Work").with_url("w@x.com").with_color("bg-blue-500")),
            ),
            Shortcut::Link(Link::new("2".into(), "GitHub", "github.com", Category::Dev)),
            Shortcut::Link(
                Link::new("3".into(), "Site", "coolsite.com", Category::Dev)
                    .with_profile(Profile::new("p3".into(), "Home"))
                    .with_profile(Profile::new("p4".into(), "Work").with_url("w2@x.com")),
            ),
            Shortcut::Folder(folder),
        ];
        ShortcutTree::from_shortcuts(items, &mut SequentialIds::default())
    }

    fn titles(shortcuts: &[&Shortcut]) -> Vec<String> {
        shortcuts.iter().map(|s| s.title().to_string()).collect()
    }

    #[test]
    fn test_visible_shortcuts_filters() {
        let tree = tree();
        assert_eq!(visible_shortcuts(&tree, &ViewState::default()).len(), 4);

        let dev = ViewState {
            category: CategoryFilter::Only(Category::Dev),
            profile: ProfileFilter::All,
        };
        assert_eq!(titles(&visible_shortcuts(&tree, &dev)), vec!["GitHub", "Site"]);

        let work = ViewState {
            category: CategoryFilter::All,
            profile: ProfileFilter::named("Work"),
        };
        assert_eq!(titles(&visible_shortcuts(&tree, &work)), vec!["Gmail", "Site"]);
    }

    #[test]
    fn test_active_categories_first_seen_order() {
        assert_eq!(
            active_categories(&tree()),
            vec![
                CategoryFilter::All,
                CategoryFilter::Only(Category::Work),
                CategoryFilter::Only(Category::Dev),
                CategoryFilter::Only(Category::Other),
            ]
        );
    }

    #[test]
    fn test_profile_names_sorted_root_only() {
        assert_eq!(profile_names(&tree()), vec!["Home", "Work"]);
    }

    #[test]
    fn test_profile_suggestions_first_wins() {
        let suggestions = profile_suggestions(&tree());
        let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Home", "School"]);
        assert_eq!(suggestions[0].color, "bg-blue-500");
        assert_eq!(suggestions[0].url.as_deref(), Some("w@x.com"));
        assert_eq!(suggestions[1].color, DEFAULT_AVATAR_COLOR);
    }

    #[test]
    fn test_folder_preview_caps_at_four() {
        let tree = tree();
        let folder = tree.folder(&"f".into()).unwrap();
        assert_eq!(folder_preview(folder).len(), 4);
        assert_eq!(folder_preview(&Folder::new("e".into(), "Empty")).len(), 0);
    }

    #[test]
    fn test_favicons() {
        assert_eq!(
            favicon_url("github.com").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=github.com&sz=128")
        );
        assert_eq!(favicon_url(""), None);
        assert_eq!(favicon_url("spotify:album:1"), None);

        let tree = tree();
        let site = tree.link(&"3".into()).unwrap();
        // mailto target falls back to the site itself
        assert_eq!(
            link_favicon(site, &ProfileFilter::named("Work")).as_deref(),
            Some("https://www.google.com/s2/favicons?domain=coolsite.com&sz=128")
        );
        let gmail = tree.link(&"1".into()).unwrap();
        assert_eq!(
            link_favicon(gmail, &ProfileFilter::named("Work")).as_deref(),
            Some("https://www.google.com/s2/favicons?domain=mail.google.com&sz=128")
        );
    }
}
