//! Shortcut Commands
//!
//! Add/edit/delete, profile editing, drag-and-drop and click resolution for
//! the shortcut grid. Every command returns the snapshot to render next.
//! Operations on ids that no longer exist leave the tree as it was.

use std::sync::Arc;

use dragdrop::DragSession;

use crate::domain::{
    resolve_link_target, resolve_profile_target, Category, DomainError, DomainResult, Icon, Link,
    Profile, ProfileId, Shortcut, ShortcutId, ShortcutPayload,
};
use crate::repository::{DropOutcome, ShortcutTree};
use crate::tree::{self, ProfileSuggestion};
use crate::AppState;

/// Current snapshot
pub fn list_shortcuts(state: &AppState) -> Arc<ShortcutTree> {
    state.shortcuts()
}

/// Add payloads at the root, or inside `folder` when it names a folder
pub fn add_shortcuts(
    state: &mut AppState,
    items: Vec<ShortcutPayload>,
    folder: Option<&ShortcutId>,
) -> Arc<ShortcutTree> {
    if items.is_empty() {
        return state.shortcuts();
    }
    state.mutate_shortcuts("add shortcuts", |tree, ids| {
        let added = tree.add(items, folder, ids);
        log::debug!("Added {:?}", added);
        Ok(added)
    });
    state.shortcuts()
}

/// Manual entry form: title and URL are both required
pub fn add_link(
    state: &mut AppState,
    title: &str,
    url: &str,
    category: Category,
    folder: Option<&ShortcutId>,
) -> DomainResult<Arc<ShortcutTree>> {
    let title = required("Title", title)?;
    let url = required("URL", url)?;
    Ok(add_shortcuts(
        state,
        vec![ShortcutPayload::link(title, url, category)],
        folder,
    ))
}

/// New empty folder at the root
pub fn create_folder(state: &mut AppState, title: &str) -> DomainResult<Arc<ShortcutTree>> {
    let title = required("Folder title", title)?;
    Ok(add_shortcuts(state, vec![ShortcutPayload::folder(title)], None))
}

/// Replace the node with the same id, wherever it is
pub fn update_shortcut(state: &mut AppState, updated: Shortcut) -> Arc<ShortcutTree> {
    let id = updated.id().clone();
    state.mutate_shortcuts(&format!("update {}", id), |tree, _| tree.update(updated));
    state.shortcuts()
}

/// Remove a node; a folder takes its children with it
pub fn delete_shortcut(state: &mut AppState, id: &ShortcutId) -> Arc<ShortcutTree> {
    state.mutate_shortcuts(&format!("delete {}", id), |tree, _| tree.delete(id));
    state.shortcuts()
}

// ========================
// Profiles
// ========================

/// Attach a new profile to a link. Blank override URL means "use the link's".
pub fn add_profile(
    state: &mut AppState,
    link_id: &ShortcutId,
    name: &str,
    url: &str,
    avatar_color: Option<&str>,
) -> DomainResult<Arc<ShortcutTree>> {
    let name = required("Profile name", name)?;
    state.mutate_shortcuts(&format!("add profile to {}", link_id), |tree, ids| {
        let mut profile = Profile::new(ids.profile_id(), name).with_url(url);
        if let Some(color) = avatar_color {
            profile = profile.with_color(color);
        }
        tree.update_link(link_id, |link| link.add_profile(profile))
    });
    Ok(state.shortcuts())
}

pub fn update_profile(state: &mut AppState, link_id: &ShortcutId, profile: Profile) -> Arc<ShortcutTree> {
    state.mutate_shortcuts(&format!("update profile on {}", link_id), |tree, _| {
        tree.update_link(link_id, |link| link.update_profile(profile))
    });
    state.shortcuts()
}

pub fn remove_profile(state: &mut AppState, link_id: &ShortcutId, profile_id: &ProfileId) -> Arc<ShortcutTree> {
    state.mutate_shortcuts(&format!("remove profile from {}", link_id), |tree, _| {
        tree.update_link(link_id, |link| link.remove_profile(profile_id))
    });
    state.shortcuts()
}

/// Make `profile_id` the link's default, or clear it if it already is
pub fn toggle_default_profile(
    state: &mut AppState,
    link_id: &ShortcutId,
    profile_id: &ProfileId,
) -> Arc<ShortcutTree> {
    state.mutate_shortcuts(&format!("toggle default profile on {}", link_id), |tree, _| {
        tree.update_link(link_id, |link| link.toggle_default_profile(profile_id))
    });
    state.shortcuts()
}

// ========================
// Drag and drop
// ========================

/// Native drag start on a root tile. Replaces any unfinished session.
pub fn begin_shortcut_drag(state: &mut AppState, id: &ShortcutId) {
    if state.shortcut_drag.is_some() {
        log::debug!("Dropping unfinished shortcut drag");
    }
    state.shortcut_drag = Some(DragSession::begin(id.clone()));
}

/// Pointer pressed on a root tile. It only becomes a drag once the pointer
/// moves past the threshold; releasing before that is a click.
pub fn press_shortcut(state: &mut AppState, id: &ShortcutId, x: i32, y: i32) {
    if state.shortcut_drag.is_some() {
        log::debug!("Dropping unfinished shortcut drag");
    }
    state.shortcut_drag = Some(DragSession::press(id.clone(), x, y));
}

/// Pointer moved during a press. Returns true while a drag is in progress.
pub fn move_shortcut_pointer(state: &mut AppState, x: i32, y: i32) -> bool {
    match state.shortcut_drag.as_mut() {
        Some(session) => {
            if session.move_to(x, y) {
                log::debug!("Dragging {}", session.dragged());
            }
            session.is_dragging()
        }
        None => false,
    }
}

pub fn hover_shortcut(state: &mut AppState, id: &ShortcutId) {
    if let Some(session) = state.shortcut_drag.as_mut() {
        session.enter(id.clone());
    }
}

pub fn leave_shortcut(state: &mut AppState) {
    if let Some(session) = state.shortcut_drag.as_mut() {
        session.leave();
    }
}

/// Drop on `target`: reorder, or move into the folder `target` names
pub fn drop_shortcut(state: &mut AppState, target: &ShortcutId) -> Arc<ShortcutTree> {
    let Some(session) = state.shortcut_drag.take() else {
        return state.shortcuts();
    };
    match session.finish_on(target.clone()) {
        Some(action) => apply_drop(state, &action.dragged, &action.target),
        None => state.shortcuts(),
    }
}

/// Drag ended wherever the pointer is; only a hovered target counts
pub fn end_shortcut_drag(state: &mut AppState) -> Arc<ShortcutTree> {
    let Some(session) = state.shortcut_drag.take() else {
        return state.shortcuts();
    };
    match session.finish() {
        Some(action) => apply_drop(state, &action.dragged, &action.target),
        None => state.shortcuts(),
    }
}

/// Abandon the gesture; nothing is applied
pub fn cancel_shortcut_drag(state: &mut AppState) {
    if state.shortcut_drag.take().is_some() {
        log::debug!("Shortcut drag cancelled");
    }
}

fn apply_drop(state: &mut AppState, dragged: &ShortcutId, target: &ShortcutId) -> Arc<ShortcutTree> {
    let action = format!("drop {} on {}", dragged, target);
    if let Some(outcome) = state.mutate_shortcuts(&action, |tree, _| tree.apply_drop(dragged, target)) {
        match outcome {
            DropOutcome::Unchanged => {}
            DropOutcome::Reordered { from, to } => log::debug!("{} moved {} -> {}", dragged, from, to),
            DropOutcome::MovedIntoFolder { folder } => log::debug!("{} moved into {}", dragged, folder),
        }
    }
    state.shortcuts()
}

// ========================
// Navigation
// ========================

/// Where a click on `id` goes under the active profile filter.
/// Folders open in place and have no destination.
pub fn open_shortcut(state: &AppState, id: &ShortcutId) -> Option<String> {
    let tree = state.shortcuts();
    let link = tree.link(id)?;
    Some(resolve_link_target(link, &state.view.profile))
}

/// Where a click on one of a link's profile badges goes
pub fn open_with_profile(state: &AppState, link_id: &ShortcutId, profile_id: &ProfileId) -> Option<String> {
    let tree = state.shortcuts();
    let link = tree.link(link_id)?;
    let profile = link.profile(profile_id)?;
    Some(resolve_profile_target(link, profile))
}

// ========================
// Tiles
// ========================

/// Image for a tile: the custom image, else the favicon of where a click goes
pub fn shortcut_icon(state: &AppState, id: &ShortcutId) -> Option<String> {
    let snapshot = state.shortcuts();
    let link = snapshot.link(id)?;
    match &link.icon {
        Icon::Image(src) => Some(src.clone()),
        Icon::Favicon => tree::link_favicon(link, &state.view.profile),
    }
}

/// Children drawn on a closed folder tile
pub fn folder_preview(state: &AppState, id: &ShortcutId) -> Vec<Link> {
    let snapshot = state.shortcuts();
    snapshot
        .folder(id)
        .map(|f| tree::folder_preview(f).to_vec())
        .unwrap_or_default()
}

/// Profiles used on other shortcuts that `link_id` does not have yet
pub fn suggested_profiles(state: &AppState, link_id: &ShortcutId) -> Vec<ProfileSuggestion> {
    let snapshot = state.shortcuts();
    let existing: Vec<&str> = snapshot
        .link(link_id)
        .map(|l| l.profiles.iter().map(|p| p.name.as_str()).collect())
        .unwrap_or_default();
    tree::profile_suggestions(&snapshot)
        .into_iter()
        .filter(|s| !existing.contains(&s.name.as_str()))
        .collect()
}

fn required<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed)
}
