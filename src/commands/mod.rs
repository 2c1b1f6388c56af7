//! Commands Layer
//!
//! Entry points the view layer calls. Each takes the `AppState`, applies one
//! change and hands back what to render next.

mod settings_cmd;
mod shortcut_cmd;
mod widget_cmd;

pub use settings_cmd::*;
pub use shortcut_cmd::*;
pub use widget_cmd::*;
