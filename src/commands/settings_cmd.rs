//! Settings Commands
//!
//! View filters, background and clock. Each setter saves immediately.

use crate::domain::{BackgroundConfig, CategoryFilter, ClockConfig, ProfileFilter, Shortcut, ViewState};
use crate::tree;
use crate::AppState;

pub fn get_view_state(state: &AppState) -> ViewState {
    state.view.clone()
}

pub fn set_category_filter(state: &mut AppState, category: CategoryFilter) -> ViewState {
    state.view.category = category;
    save_view(state)
}

pub fn set_profile_filter(state: &mut AppState, profile: ProfileFilter) -> ViewState {
    state.view.profile = profile;
    save_view(state)
}

pub fn clear_filters(state: &mut AppState) -> ViewState {
    state.view = ViewState::default();
    save_view(state)
}

fn save_view(state: &AppState) -> ViewState {
    state.repo.save_view_state(&state.view);
    log::info!(
        "View filter: category={}, profile={}",
        String::from(state.view.category),
        String::from(state.view.profile.clone())
    );
    state.view.clone()
}

/// Root tiles passing the current filters
pub fn visible_shortcuts(state: &AppState) -> Vec<Shortcut> {
    let snapshot = state.shortcuts();
    tree::visible_shortcuts(&snapshot, &state.view)
        .into_iter()
        .cloned()
        .collect()
}

/// Filter chips: "All" plus every category in use
pub fn category_filters(state: &AppState) -> Vec<CategoryFilter> {
    tree::active_categories(&state.shortcuts())
}

/// Profile chips: every profile name in use, sorted
pub fn profile_filters(state: &AppState) -> Vec<String> {
    tree::profile_names(&state.shortcuts())
}

pub fn get_background(state: &AppState) -> BackgroundConfig {
    state.background.clone()
}

pub fn set_background(state: &mut AppState, config: BackgroundConfig) -> BackgroundConfig {
    state.background = config;
    state.repo.save_background(&state.background);
    log::info!("Background set to {:?}", state.background.kind);
    state.background.clone()
}

pub fn get_clock(state: &AppState) -> ClockConfig {
    state.clock
}

pub fn set_clock(state: &mut AppState, config: ClockConfig) -> ClockConfig {
    state.clock = config;
    state.repo.save_clock(&state.clock);
    state.clock
}
