//! Widget Layout Commands
//!
//! Drag indices are positions in the rendered (draggable) widget list.

use std::sync::Arc;

use dragdrop::DragSession;

use crate::domain::{WidgetConfig, WidgetId};
use crate::repository::WidgetLayout;
use crate::AppState;

pub fn list_layout(state: &AppState) -> Arc<WidgetLayout> {
    state.layout()
}

/// Widgets to draw in the main column
pub fn rendered_widgets(state: &AppState, edit_mode: bool) -> Vec<WidgetConfig> {
    state.layout.rendered(edit_mode).into_iter().cloned().collect()
}

pub fn toggle_widget(state: &mut AppState, id: WidgetId) -> Arc<WidgetLayout> {
    state.mutate_layout(&format!("toggle {}", id.as_str()), |layout| {
        Ok(layout.toggle_visibility(id))
    });
    state.layout()
}

pub fn reset_layout(state: &mut AppState) -> Arc<WidgetLayout> {
    state.mutate_layout("reset layout", |layout| {
        layout.reset();
        Ok(())
    });
    state.layout()
}

pub fn begin_widget_drag(state: &mut AppState, index: usize) {
    state.widget_drag = Some(DragSession::begin(index));
}

pub fn hover_widget(state: &mut AppState, index: usize) {
    if let Some(session) = state.widget_drag.as_mut() {
        session.enter(index);
    }
}

/// Drag end: move onto the last hovered slot, if any
pub fn end_widget_drag(state: &mut AppState) -> Arc<WidgetLayout> {
    let action = state.widget_drag.take().and_then(|session| session.finish());
    if let Some(action) = action {
        state.mutate_layout(
            &format!("move widget {} to {}", action.dragged, action.target),
            |layout| layout.reorder(action.dragged, action.target),
        );
    }
    state.layout()
}

pub fn cancel_widget_drag(state: &mut AppState) {
    state.widget_drag = None;
}
